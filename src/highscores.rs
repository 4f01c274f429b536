use crate::input::Variant;
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Somewhere to keep the best score achieved with one game variant
pub(crate) trait HighScoreStore: std::fmt::Debug {
    /// Return the stored high score, or 0 if none has been recorded yet
    fn load(&mut self) -> Result<u32, LoadError>;

    fn save(&mut self, score: u32) -> Result<(), SaveError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&mut self) -> Result<u32, LoadError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        (**self).save(score)
    }
}

/// A JSON file holding the high score of every variant
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: PathBuf,
    variant: Variant,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf, variant: Variant) -> HighScoreFile {
        HighScoreFile { path, variant }
    }

    /// Return the default high scores file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("twinsnake").join("highscores.json"))
    }
}

impl HighScoreStore for HighScoreFile {
    fn load(&mut self) -> Result<u32, LoadError> {
        Ok(HighScores::load(&self.path)?.get(self.variant))
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        // Keep the other variants' scores.  A file that cannot be parsed is
        // replaced, but one that cannot be read is left alone.
        let mut scores = match HighScores::load(&self.path) {
            Ok(scores) => scores,
            Err(e) if e.is_corrupt() => HighScores::default(),
            Err(e) => return Err(SaveError::read(e)),
        };
        scores.set(self.variant, score);
        scores.save(&self.path)
    }
}

/// A store that remembers nothing between runs
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct NoHighScores;

impl HighScoreStore for NoHighScores {
    fn load(&mut self) -> Result<u32, LoadError> {
        Ok(0)
    }

    fn save(&mut self, _score: u32) -> Result<(), SaveError> {
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct HighScores(BTreeMap<Variant, u32>);

impl HighScores {
    fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn get(&self, variant: Variant) -> u32 {
        self.0.get(&variant).copied().unwrap_or_default()
    }

    fn set(&mut self, variant: Variant, score: u32) {
        self.0.insert(variant, score);
    }

    fn to_json_array(&self) -> Vec<HighScoreEntry> {
        self.0
            .iter()
            .map(|(&variant, &score)| HighScoreEntry { variant, score })
            .collect()
    }

    fn from_json_array(array: Vec<HighScoreEntry>) -> HighScores {
        let mut scores = HighScores::default();
        for HighScoreEntry { variant, score } in array {
            let best = scores.get(variant).max(score);
            scores.set(variant, best);
        }
        scores
    }
}

impl Serialize for HighScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HighScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<HighScoreEntry>::deserialize(deserializer).map(HighScores::from_json_array)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreEntry {
    variant: Variant,
    score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn read(e: LoadError) -> Self {
        SaveError(SaveErrorSource::Read(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to read existing high scores")]
    Read(#[source] LoadError),
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }

    /// Was the file read successfully but found to contain garbage?
    fn is_corrupt(&self) -> bool {
        matches!(self.0, LoadErrorSource::Deserialize(_))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
