use crate::controls::Controls;
use crate::frontend::{Flat, Frontend, Sliced, CHROME_ROWS};
use crate::palette::Palette;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Path of the configuration file, relative to the working directory, that
/// is read when no configuration file is found anywhere else
const DEFAULT_CONFIG_PATH: &str = "config/dimsnake.toml";

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Config {
    /// Board and speed tuning
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// How much of the terminal to draw in and how often
    #[serde(default)]
    pub(crate) display: DisplayConfig,

    #[serde(default)]
    pub(crate) controls: Controls,

    #[serde(default)]
    pub(crate) colors: Palette,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) player: PlayerConfig,
}

impl Config {
    /// Return the paths searched for a configuration file, in order
    pub(crate) fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(DEFAULT_CONFIG_PATH),
            Path::new("..").join(DEFAULT_CONFIG_PATH),
            Path::new("..").join("..").join(DEFAULT_CONFIG_PATH),
        ];
        if let Some(p) = dirs::config_local_dir() {
            paths.push(p.join("dimsnake").join("config.toml"));
        }
        paths
    }

    /// Return the first candidate path that exists, falling back to
    /// [`DEFAULT_CONFIG_PATH`] if there are none
    pub(crate) fn find_path() -> PathBuf {
        Config::candidate_paths()
            .into_iter()
            .find(|p| p.is_file())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Config file not found in standard locations; using default path {DEFAULT_CONFIG_PATH}"
                );
                PathBuf::from(DEFAULT_CONFIG_PATH)
            })
    }

    /// Read configuration from a file on disk and validate it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if a setting has an unusable value.
    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs_err::read_to_string(path)?;
        let config = toml::from_str::<Config>(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.display.frame_rate == 0 {
            return Err(ConfigError::invalid("display.frame_rate", "must be at least 1"));
        }
        if !self.display.fullscreen {
            let grid_size = self.game.grid_size;
            let board = match self.game.dimensions {
                Dimensions::Two => Flat.board_size(grid_size),
                Dimensions::Three => Sliced.board_size(grid_size),
            };
            if board.width > self.display.width
                || board.height.saturating_add(CHROME_ROWS) > self.display.height
            {
                return Err(ConfigError::invalid(
                    "game.grid_size",
                    "board does not fit in the display area",
                ));
            }
        }
        Ok(())
    }

    /// Return the path at which high scores & settings are stored: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.  Returns `None` if neither is available.
    pub(crate) fn storage_file(&self) -> Option<PathBuf> {
        self.files.storage_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("dimsnake").join("storage.json"))
        })
    }
}

/// Parameters of the snake game proper
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Number of cells along each axis of the board
    pub(crate) grid_size: u16,

    /// Ticks per second at the start of a game
    pub(crate) initial_speed: f64,

    /// Added to the speed each time food is eaten
    pub(crate) speed_increment: f64,

    /// Speed is never raised above this
    pub(crate) max_speed: f64,

    /// Length the snake grows to at the start of a game
    pub(crate) initial_length: u16,

    pub(crate) dimensions: Dimensions,
}

impl GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::invalid("game.grid_size", "must be at least 2"));
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::invalid(
                "game.initial_speed",
                "must be a positive number",
            ));
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(ConfigError::invalid(
                "game.speed_increment",
                "must be zero or a positive number",
            ));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.initial_speed) {
            return Err(ConfigError::invalid(
                "game.max_speed",
                "must be a number no less than game.initial_speed",
            ));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::invalid(
                "game.initial_length",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid_size: 18,
            initial_speed: 5.0,
            speed_increment: 0.5,
            max_speed: 15.0,
            initial_length: 3,
            dimensions: Dimensions::default(),
        }
    }
}

/// Which board (and front-end) to play on
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "u8")]
pub(crate) enum Dimensions {
    #[default]
    Two,
    Three,
}

impl TryFrom<u8> for Dimensions {
    type Error = DimensionsError;

    fn try_from(value: u8) -> Result<Dimensions, DimensionsError> {
        match value {
            2 => Ok(Dimensions::Two),
            3 => Ok(Dimensions::Three),
            _ => Err(DimensionsError),
        }
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsError;

    fn from_str(s: &str) -> Result<Dimensions, DimensionsError> {
        s.parse::<u8>()
            .map_err(|_| DimensionsError)
            .and_then(Dimensions::try_from)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensions::Two => f.pad("2D"),
            Dimensions::Three => f.pad("3D"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("number of dimensions must be 2 or 3")]
pub(crate) struct DimensionsError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct DisplayConfig {
    /// Width of the area to draw in, in terminal cells
    pub(crate) width: u16,

    /// Height of the area to draw in, in terminal cells
    pub(crate) height: u16,

    /// Ignore `width` & `height` and draw in the whole terminal
    pub(crate) fullscreen: bool,

    /// Redraws per second
    pub(crate) frame_rate: u16,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            width: 80,
            height: 24,
            fullscreen: false,
            frame_rate: 60,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct FileConfig {
    /// Path at which high scores & settings should be stored
    pub(crate) storage_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct PlayerConfig {
    /// Name recorded alongside high scores
    pub(crate) name: String,
}

impl Default for PlayerConfig {
    fn default() -> PlayerConfig {
        PlayerConfig {
            name: String::from("Player"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { key, reason }
    }
}
