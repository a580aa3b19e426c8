use crate::consts;
use crate::util::ErrorChain;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// High scores & user settings persisted in a JSON file
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Storage {
    path: PathBuf,
    data: GameData,
}

impl Storage {
    /// Load storage from `path`.  If the file is missing or unreadable, it is
    /// replaced with default contents.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the default contents could not be written.
    pub(crate) fn open(path: PathBuf) -> Result<Storage, SaveError> {
        let mut storage = Storage {
            path,
            data: GameData::default(),
        };
        if let Err(e) = storage.load() {
            tracing::warn!(
                path = %storage.path.display(),
                error = %ErrorChain(&e),
                "Could not load stored data; writing defaults"
            );
            storage.data = GameData::default();
            storage.save()?;
        }
        Ok(storage)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory data with the contents of the file
    pub(crate) fn load(&mut self) -> Result<(), LoadError> {
        let src = fs_err::read(&self.path).map_err(LoadError::read)?;
        self.data = serde_json::from_slice(&src).map_err(LoadError::deserialize)?;
        Ok(())
    }

    pub(crate) fn save(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.data).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        tracing::debug!(path = %self.path.display(), "Saved stored data");
        Ok(())
    }

    /// Record a score achieved by `player` now, keeping only the best
    /// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] scores
    pub(crate) fn add_high_score(&mut self, player: &str, score: u32) {
        let date = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        self.insert_high_score(HighScore {
            player: player.to_owned(),
            score,
            date,
        });
    }

    fn insert_high_score(&mut self, entry: HighScore) {
        let scores = &mut self.data.high_scores;
        scores.push(entry);
        // Stable, so older entries stay ahead of newer ones with equal scores
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(consts::MAX_HIGH_SCORES);
    }

    /// Return the stored high scores, best first
    pub(crate) fn high_scores(&self) -> &[HighScore] {
        &self.data.high_scores
    }

    pub(crate) fn best_score(&self) -> Option<u32> {
        self.data.high_scores.first().map(|hs| hs.score)
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.data.settings
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
struct GameData {
    #[serde(default)]
    high_scores: Vec<HighScore>,
    #[serde(default)]
    settings: Settings,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct HighScore {
    pub(crate) player: String,
    pub(crate) score: u32,
    /// Seconds since the Unix epoch
    pub(crate) date: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Settings {
    pub(crate) music_volume: f64,
    pub(crate) sfx_volume: f64,
    pub(crate) difficulty: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            music_volume: consts::DEFAULT_MUSIC_VOLUME,
            sfx_volume: consts::DEFAULT_SFX_VOLUME,
            difficulty: String::from(consts::DEFAULT_DIFFICULTY),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores & settings to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
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
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize stored data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write storage file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores & settings from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read storage file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize stored data")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(player: &str, score: u32, date: u64) -> HighScore {
        HighScore {
            player: player.to_owned(),
            score,
            date,
        }
    }

    #[test]
    fn absent_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("storage.json");
        let storage = Storage::open(path.clone()).unwrap();
        assert!(storage.high_scores().is_empty());
        assert_eq!(storage.best_score(), None);
        assert_eq!(
            storage.settings(),
            &Settings {
                music_volume: 0.7,
                sfx_volume: 0.8,
                difficulty: String::from("medium"),
            }
        );
        let on_disk: serde_json::Value =
            serde_json::from_slice(&fs_err::read(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            json!({
                "high_scores": [],
                "settings": {
                    "music_volume": 0.7,
                    "sfx_volume": 0.8,
                    "difficulty": "medium",
                },
            })
        );
    }

    #[test]
    fn malformed_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs_err::write(&path, "{not json").unwrap();
        let storage = Storage::open(path.clone()).unwrap();
        assert!(storage.high_scores().is_empty());
        let reread = Storage::open(path).unwrap();
        assert_eq!(reread, storage);
    }

    #[test]
    fn existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let src = json!({
            "high_scores": [
                {"player": "Kaa", "score": 120, "date": 1700000000},
                {"player": "Nagini", "score": 40, "date": 1700000500},
            ],
            "settings": {"music_volume": 0.25, "sfx_volume": 1.0, "difficulty": "hard"},
        });
        fs_err::write(&path, src.to_string()).unwrap();
        let storage = Storage::open(path).unwrap();
        assert_eq!(
            storage.high_scores(),
            [
                entry("Kaa", 120, 1_700_000_000),
                entry("Nagini", 40, 1_700_000_500)
            ]
        );
        assert_eq!(storage.best_score(), Some(120));
        assert_eq!(storage.settings().difficulty, "hard");
    }

    #[test]
    fn high_scores_sorted_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path().join("storage.json")).unwrap();
        for (i, score) in [30, 10, 50, 20, 40, 60, 70, 80, 90, 100, 110, 5]
            .into_iter()
            .enumerate()
        {
            storage.insert_high_score(entry(&format!("p{i}"), score, 0));
        }
        let scores = storage
            .high_scores()
            .iter()
            .map(|hs| hs.score)
            .collect::<Vec<_>>();
        assert_eq!(scores, [110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
        assert_eq!(storage.best_score(), Some(110));
    }

    #[test]
    fn ties_keep_earlier_entry_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path().join("storage.json")).unwrap();
        storage.insert_high_score(entry("first", 50, 1));
        storage.insert_high_score(entry("second", 50, 2));
        let players = storage
            .high_scores()
            .iter()
            .map(|hs| hs.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(players, ["first", "second"]);
    }

    #[test]
    fn add_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut storage = Storage::open(path.clone()).unwrap();
        storage.add_high_score("Kaa", 30);
        storage.save().unwrap();
        let mut reread = Storage::open(path).unwrap();
        assert_eq!(reread.high_scores().len(), 1);
        assert_eq!(reread.high_scores()[0].player, "Kaa");
        assert_eq!(reread.high_scores()[0].score, 30);
        assert!(reread.high_scores()[0].date > 0);
        reread.load().unwrap();
        assert_eq!(reread, storage);
    }

    #[test]
    fn load_error_chain() {
        let e = LoadError::read(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(
            ErrorChain(&e).to_string(),
            "Failed to read high scores & settings from disk: failed to read storage file: no such file"
        );
    }
}
