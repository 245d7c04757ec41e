//! Key-value JSON storage for progress and settings
//!
//! Each key maps to `<data dir>/<key>.json`. The data directory is
//! `$FRETWISE_DATA_DIR` when set, otherwise the platform data directory.

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "FRETWISE_DATA_DIR";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at the configured data directory
    pub fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("fretwise")))
            .unwrap_or_else(|| PathBuf::from(".fretwise"));
        Self::at(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load a value, falling back to its default when missing or unreadable
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No stored {} at {}", key, path.display());
                return T::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return T::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring corrupt {}: {}", path.display(), e);
            T::default()
        })
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| anyhow!("Failed to create {}: {}", self.dir.display(), e))?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", key, e))?;

        // Write beside the target and rename so a crash never leaves half a file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| anyhow!("Failed to write {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &path).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;

        log::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }

    /// Delete a stored value; missing keys are not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!("Failed to remove {}: {}", key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fretwise_core::progress::{
        PROGRESS_KEY, PracticeSession, ProgressState, SETTINGS_KEY, Settings, apply_session,
    };

    fn scratch(name: &str) -> Storage {
        let dir = std::env::temp_dir().join(format!("fretwise-test-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        Storage::at(dir)
    }

    #[test]
    fn test_missing_key_loads_default() {
        let storage = scratch("missing");
        let state: ProgressState = storage.load(PROGRESS_KEY);
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_progress_survives_reload() {
        let storage = scratch("reload");
        let session = PracticeSession {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            duration: 300,
            patterns: vec!["A Minor Pentatonic".to_string()],
        };
        let state = apply_session(ProgressState::default(), session);
        storage.save(PROGRESS_KEY, &state).unwrap();

        let loaded: ProgressState = storage.load(PROGRESS_KEY);
        assert_eq!(loaded, state);
        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_corrupt_blob_loads_default() {
        let storage = scratch("corrupt");
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.path_for(SETTINGS_KEY), "{not json").unwrap();

        let settings: Settings = storage.load(SETTINGS_KEY);
        assert_eq!(settings, Settings::default());
        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = scratch("remove");
        storage.save(SETTINGS_KEY, &Settings::default()).unwrap();
        assert!(storage.path_for(SETTINGS_KEY).exists());

        storage.remove(SETTINGS_KEY).unwrap();
        storage.remove(SETTINGS_KEY).unwrap();
        assert!(!storage.path_for(SETTINGS_KEY).exists());
        let _ = fs::remove_dir_all(storage.dir());
    }
}
