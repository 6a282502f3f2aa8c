use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clabirint::MazeConfig;
use crossterm::style::Color;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read or write settings file {0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),
    #[error("Failed to parse settings file {0:?}: {1}")]
    Ron(PathBuf, #[source] ron::error::SpannedError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    pub wall: Color,
    pub open: Color,
    pub start: Color,
    pub exit: Color,
    pub explored: Color,
    pub marker: Color,
    pub text: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            wall: Color::Rgb {
                r: 0x33,
                g: 0x33,
                b: 0x33,
            },
            open: Color::White,
            start: Color::Rgb {
                r: 0x00,
                g: 0xcc,
                b: 0x66,
            },
            exit: Color::Rgb {
                r: 0xff,
                g: 0x50,
                b: 0x50,
            },
            explored: Color::Rgb {
                r: 0xcf,
                g: 0xe9,
                b: 0xff,
            },
            marker: Color::Rgb {
                r: 0xff,
                g: 0x8c,
                b: 0x00,
            },
            text: Color::Reset,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub color_scheme: Option<ColorScheme>,
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::preference_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("labirint")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(path: &Path, source: &str) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(source)
            .map_err(|err| SettingsError::Ron(path.to_path_buf(), err))
    }

    /// Loads the settings, writing the default file first if there is none.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(path, &source),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("creating default settings at {:?}", path);
                Self::reset_config(path)?;
                Self::parse(path, DEFAULT_SETTINGS)
            }
            Err(err) => Err(SettingsError::Io(path.to_path_buf(), err)),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        let io_err = |err| SettingsError::Io(path.to_path_buf(), err);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }

    pub fn get_color_scheme(&self) -> ColorScheme {
        self.color_scheme.clone().unwrap_or_default()
    }

    /// Maze parameters from the file, built-in defaults where a field is missing.
    pub fn maze_config(&self) -> MazeConfig {
        self.maze.clone()
    }
}
