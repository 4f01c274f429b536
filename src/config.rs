use crate::consts;
use crate::game::{Bounds, Direction, Pace, PaceError, Rules, RulesError};
use crate::highscores::{HighScoreFile, HighScoreStore, NoHighScores};
use crate::input::Variant;
use log::LevelFilter;
use ratatui::layout::{Position, Size};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub(crate) struct Config {
    /// Grid size, starting snake, and scoring
    pub(crate) game: Rules,

    /// How fast the game runs
    pub(crate) pace: Pace,

    pub(crate) tracking: TrackingConfig,

    /// Settings about data files
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("twinsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return where the high score for `variant` should be kept.  If saving
    /// is disabled, or no path is configured and the default one cannot be
    /// determined, the high score lives in memory only.
    pub(crate) fn high_score_store(&self, variant: Variant) -> Box<dyn HighScoreStore> {
        if !self.files.save_high_score {
            return Box::new(NoHighScores);
        }
        match self.files.high_score_file.clone().or_else(HighScoreFile::default_path) {
            Some(path) => Box::new(HighScoreFile::new(path, variant)),
            None => {
                log::warn!(
                    "Could not determine local data directory; high scores will not be saved"
                );
                Box::new(NoHighScores)
            }
        }
    }

    /// Return the filepath to write log messages to: the file given in the
    /// configuration or, if that is not set, the default log file path.
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .log_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| default_log_path().map(Cow::from))
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawConfig {
    game: RawRules,
    pace: RawPace,
    tracking: TrackingConfig,
    files: FileConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = InvalidConfig;

    fn try_from(value: RawConfig) -> Result<Config, InvalidConfig> {
        Ok(Config {
            game: Rules::try_from(value.game)?,
            pace: Pace::try_from(value.pace)?,
            tracking: value.tracking,
            files: value.files,
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
enum InvalidConfig {
    #[error(
        "grid size {0} does not fit on screen; width must be at most {max_w} and height at most {max_h}",
        max_w = consts::MAX_GRID_WIDTH,
        max_h = consts::MAX_GRID_HEIGHT
    )]
    GridTooLarge(Size),
    #[error("invalid [game] settings: {0}")]
    Rules(#[from] RulesError),
    #[error("invalid [pace] settings: {0}")]
    Pace(#[from] PaceError),
}

fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join("twinsnake").join("twinsnake.log"))
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct TrackingConfig {
    /// How far (in cells) the pointer must move before it steers the snake
    pub(crate) dead_zone: u16,
}

impl Default for TrackingConfig {
    fn default() -> TrackingConfig {
        TrackingConfig {
            dead_zone: consts::DEFAULT_DEAD_ZONE,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    save_high_score: bool,

    log_file: Option<PathBuf>,

    pub(crate) log_level: LevelFilter,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_score_file: Option<PathBuf>,
    save_high_score: bool,
    log_file: Option<PathBuf>,
    log_level: String,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
            log_level: String::from("info"),
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = log::ParseLevelError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, log::ParseLevelError> {
        Ok(FileConfig {
            high_score_file: value.high_score_file,
            save_high_score: value.save_high_score,
            log_file: value.log_file,
            log_level: value.log_level.parse()?,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawRules {
    width: u16,
    height: u16,
    /// Defaults to the center of the grid
    start: Option<[u16; 2]>,
    direction: Direction,
    initial_length: usize,
    food_reward: u32,
}

impl Default for RawRules {
    fn default() -> RawRules {
        RawRules {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
            start: None,
            direction: Direction::East,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            food_reward: consts::FOOD_REWARD,
        }
    }
}

impl TryFrom<RawRules> for Rules {
    type Error = InvalidConfig;

    /// Besides the game's own checks, the grid has to fit inside the display
    /// area along with its border, the score bar, and the message lines.
    fn try_from(value: RawRules) -> Result<Rules, InvalidConfig> {
        let bounds = Bounds {
            width: value.width,
            height: value.height,
        };
        if bounds.width > consts::MAX_GRID_WIDTH || bounds.height > consts::MAX_GRID_HEIGHT {
            return Err(InvalidConfig::GridTooLarge(bounds.size()));
        }
        let start = value
            .start
            .map_or_else(|| bounds.center(), |[x, y]| Position::new(x, y));
        Rules::new(
            bounds,
            start,
            value.direction,
            value.initial_length,
            value.food_reward,
        )
        .map_err(Into::into)
    }
}

/// Tick periods in milliseconds; unset fields keep their defaults
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawPace {
    base_ms: Option<u64>,
    step_ms: Option<u64>,
    floor_ms: Option<u64>,
}

impl TryFrom<RawPace> for Pace {
    type Error = PaceError;

    fn try_from(value: RawPace) -> Result<Pace, PaceError> {
        Pace::new(
            value
                .base_ms
                .map_or(consts::BASE_TICK_PERIOD, Duration::from_millis),
            value
                .step_ms
                .map_or(consts::TICK_PERIOD_STEP, Duration::from_millis),
            value
                .floor_ms
                .map_or(consts::MIN_TICK_PERIOD, Duration::from_millis),
        )
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
