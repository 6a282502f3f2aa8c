use std::{fmt, time::Duration};

use thiserror::Error;

use crate::{
    algorithms::{random, GenError, MazeAlgorithm, Random, RecursiveBacktracker},
    config::{ConfigError, MazeConfig},
    dims::Pos,
    exits::{choose_exits, ExitSet},
    grid::Grid,
    search::{PathSearcher, SearchPhase, Step},
    start::{center, resolve_start},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenError),
}

/// User-facing status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Generating,
    MazeCreated,
    Searching,
    Found { length: usize },
    NotFound,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Generating => write!(f, "Generating maze..."),
            Status::MazeCreated => write!(f, "New maze created"),
            Status::Searching => write!(f, "Searching for path..."),
            Status::Found { length } => write!(f, "Exit found! Path length: {}", length),
            Status::NotFound => write!(f, "No path found."),
        }
    }
}

/// Owns one maze and the search running over it.
///
/// The timer lives outside: whoever drives the session calls [`Session::tick`] once per
/// [`Session::delay`] and redraws from the accessors.
#[derive(Debug)]
pub struct Session {
    config: MazeConfig,
    rng: Random,
    grid: Grid,
    start: Pos,
    exits: ExitSet,
    searcher: PathSearcher,
    status: Status,
}

impl Session {
    pub fn new(config: MazeConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let mut rng = random(config.seed);
        let (grid, start, exits) = Self::build(&config, &mut rng)?;

        Ok(Self {
            config,
            rng,
            grid,
            start,
            exits,
            searcher: PathSearcher::new(),
            status: Status::Generating,
        })
    }

    fn build(config: &MazeConfig, rng: &mut Random) -> Result<(Grid, Pos, ExitSet), GenError> {
        let mut grid = RecursiveBacktracker.generate(config.size, rng)?;
        let start = resolve_start(&grid, center(&grid));
        let exits = choose_exits(&mut grid, config.exits, rng);

        log::info!(
            "new {}x{} maze, start {:?}, exits {:?}",
            config.size,
            config.size,
            start,
            exits
        );

        Ok((grid, start, exits))
    }

    /// Replaces the maze, dropping any search in progress.
    pub fn new_maze(&mut self) -> Result<(), GenError> {
        if self.searcher.is_running() {
            log::debug!("discarding running search");
        }
        self.searcher.reset();

        let (grid, start, exits) = Self::build(&self.config, &mut self.rng)?;
        self.grid = grid;
        self.start = start;
        self.exits = exits;
        self.status = Status::MazeCreated;

        Ok(())
    }

    /// Starts searching, ignored unless the searcher is idle.
    pub fn start_search(&mut self) -> bool {
        let started = self
            .searcher
            .start_search(&self.grid, self.start, &self.exits);
        if started {
            self.status = Status::Searching;
        }
        started
    }

    /// Advances the search by one step, `None` when no search is running.
    pub fn tick(&mut self) -> Option<Step> {
        if !self.searcher.is_running() {
            return None;
        }

        let step = match self.searcher.step() {
            Ok(step) => step,
            Err(err) => {
                log::error!("search step failed: {}", err);
                return None;
            }
        };

        match &step {
            Step::Found { path, .. } => {
                self.status = Status::Found {
                    length: path.len(),
                }
            }
            Step::Exhausted => self.status = Status::NotFound,
            Step::Skipped | Step::Visited { .. } => {}
        }

        Some(step)
    }

    /// Runs the search until it stops, returning the final step.
    pub fn run_to_end(&mut self) -> Option<Step> {
        let mut last = None;
        while let Some(step) = self.tick() {
            last = Some(step);
        }
        last
    }

    pub fn delay(&self) -> Duration {
        self.config.delay()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn exits(&self) -> &ExitSet {
        &self.exits
    }

    pub fn searcher(&self) -> &PathSearcher {
        &self.searcher
    }

    pub fn phase(&self) -> SearchPhase {
        self.searcher.phase()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Visited cell that is neither the start nor an exit.
    pub fn is_explored(&self, pos: Pos) -> bool {
        pos != self.start && !self.exits.contains(&pos) && self.searcher.is_visited(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> MazeConfig {
        MazeConfig::new().size(15).exits(2).seed(Some(seed))
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(matches!(
            Session::new(MazeConfig::new().size(8)),
            Err(SessionError::Config(ConfigError::InvalidGridSize(8)))
        ));
        assert!(matches!(
            Session::new(MazeConfig::new().exits(0)),
            Err(SessionError::Config(ConfigError::InvalidExitCount(0)))
        ));
    }

    #[test]
    fn seeded_sessions_match() {
        let a = Session::new(config(11)).unwrap();
        let b = Session::new(config(11)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.start(), b.start());
        assert_eq!(a.exits(), b.exits());
    }

    #[test]
    fn fresh_session_layout() {
        let session = Session::new(config(3)).unwrap();
        assert_eq!(session.status(), Status::Generating);
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert!(session.grid().is_open(session.start()));
        assert_eq!(session.exits().len(), 2);
        for &exit in session.exits() {
            assert!(session.grid().is_border(exit));
            assert!(session.grid().is_open(exit));
        }
    }

    #[test]
    fn tick_needs_started_search() {
        let mut session = Session::new(config(4)).unwrap();
        assert_eq!(session.tick(), None);
        assert!(session.start_search());
        assert_eq!(session.status(), Status::Searching);
        assert!(session.tick().is_some());
    }

    #[test]
    fn search_reaches_an_exit() {
        let mut session = Session::new(config(5)).unwrap();
        session.start_search();

        let Some(Step::Found { pos, path }) = session.run_to_end() else {
            panic!("search did not find an exit");
        };
        assert!(session.exits().contains(&pos));
        assert_eq!(
            session.status(),
            Status::Found {
                length: path.len()
            }
        );
        assert_eq!(session.phase(), SearchPhase::Found);
        assert_eq!(session.tick(), None);
        assert!(!session.start_search());

        assert!(!session.is_explored(session.start()));
        assert!(!session.is_explored(pos));
        assert!(path[1..path.len() - 1]
            .iter()
            .all(|&cell| session.is_explored(cell)));
    }

    #[test]
    fn new_maze_cancels_search() {
        let mut session = Session::new(config(6)).unwrap();
        session.start_search();
        session.tick();
        session.tick();
        assert!(session.searcher().visited_count() > 0);

        session.new_maze().unwrap();
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.searcher().visited_count(), 0);
        assert_eq!(session.searcher().current(), None);
        assert_eq!(session.status(), Status::MazeCreated);

        assert!(session.start_search());
        let first = session.tick();
        assert_eq!(
            first,
            Some(Step::Visited {
                pos: session.start(),
                explored: false
            })
        );
    }

    #[test]
    fn walled_off_exit_reports_no_path() {
        let grid: Grid = "
            #####
            #.#.#
            #.#..
            #.#.#
            #####
        "
        .parse()
        .unwrap();
        let mut session = Session {
            config: MazeConfig::new().size(5).exits(1),
            rng: random(Some(0)),
            grid,
            start: Pos(2, 1),
            exits: [Pos(2, 4)].into_iter().collect(),
            searcher: PathSearcher::new(),
            status: Status::MazeCreated,
        };

        assert!(session.start_search());
        assert_eq!(session.run_to_end(), Some(Step::Exhausted));
        assert_eq!(session.status(), Status::NotFound);
        assert_eq!(session.status().to_string(), "No path found.");
        assert_eq!(session.phase(), SearchPhase::Exhausted);
        assert_eq!(session.searcher().visited_count(), 3);
        assert!(session.is_explored(Pos(1, 1)));
        assert!(session.is_explored(Pos(3, 1)));
        assert!(!session.is_explored(Pos(1, 3)));
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn status_messages() {
        assert_eq!(Status::Found { length: 42 }.to_string(), "Exit found! Path length: 42");
        assert_eq!(Status::NotFound.to_string(), "No path found.");
        assert_eq!(Status::Searching.to_string(), "Searching for path...");
    }
}
