pub mod algorithms;
pub mod array;
pub mod config;
pub mod dims;
pub mod direction;
pub mod exits;
pub mod grid;
pub mod search;
pub mod session;
pub mod start;

pub use config::{ConfigError, MazeConfig};
pub use dims::Pos;
pub use grid::{Grid, Tile};
pub use session::{Session, SessionError, Status};
