// SPDX-License-Identifier: MIT

//! Suggestion history for character and work names

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Sentinel entry always offered alongside real suggestions
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreRecord {
    #[serde(default)]
    characters: Vec<String>,
    #[serde(default)]
    works: Vec<String>,
}

/// Durable set of previously-confirmed character and work names.
///
/// Loads best-effort (a missing or corrupt file is an empty store, never an
/// error) and re-saves the whole record synchronously after every accepted
/// addition. Both sets always contain [`UNKNOWN`].
pub struct SuggestionStore {
    path: PathBuf,
    characters: BTreeSet<String>,
    works: BTreeSet<String>,
}

impl SuggestionStore {
    /// Load the store from `path`, falling back to empty on any failure
    pub fn load(path: &Path) -> Self {
        let record = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<StoreRecord>(&content) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to parse suggestion history {:?}: {}", path, e);
                    StoreRecord::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreRecord::default(),
            Err(e) => {
                warn!("Failed to read suggestion history {:?}: {}", path, e);
                StoreRecord::default()
            }
        };

        let mut characters: BTreeSet<String> = record.characters.into_iter().collect();
        let mut works: BTreeSet<String> = record.works.into_iter().collect();
        characters.insert(UNKNOWN.to_string());
        works.insert(UNKNOWN.to_string());

        Self { path: path.to_path_buf(), characters, works }
    }

    /// Record a confirmed character name; empty input is ignored
    pub fn record_character(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.characters.insert(name.to_string()) {
            self.save();
        }
    }

    /// Record a confirmed work name; empty input is ignored
    pub fn record_work(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.works.insert(name.to_string()) {
            self.save();
        }
    }

    /// Sorted character suggestions, always including [`UNKNOWN`]
    pub fn character_suggestions(&self) -> Vec<String> {
        self.characters.iter().cloned().collect()
    }

    /// Sorted work suggestions, always including [`UNKNOWN`]
    pub fn work_suggestions(&self) -> Vec<String> {
        self.works.iter().cloned().collect()
    }

    /// Path backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the persisted record and reset to the sentinel-only state
    pub fn clear(&mut self) -> crate::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        self.characters.clear();
        self.works.clear();
        self.characters.insert(UNKNOWN.to_string());
        self.works.insert(UNKNOWN.to_string());
        Ok(())
    }

    // Whole-record write; a failure loses at most this addition and never
    // corrupts previously saved state. Non-fatal by design of the caller flow.
    fn save(&self) {
        let record = StoreRecord {
            characters: self.characters.iter().cloned().collect(),
            works: self.works.iter().cloned().collect(),
        };

        let result = (|| -> crate::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&record)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        })();

        if let Err(e) = result {
            warn!("Failed to save suggestion history {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_sentinel_only_store() {
        let dir = TempDir::new().unwrap();
        let store = SuggestionStore::load(&dir.path().join("history.json"));
        assert_eq!(store.character_suggestions(), vec![UNKNOWN]);
        assert_eq!(store.work_suggestions(), vec![UNKNOWN]);
    }

    #[test]
    fn test_corrupt_file_yields_sentinel_only_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SuggestionStore::load(&path);
        assert_eq!(store.character_suggestions(), vec![UNKNOWN]);
    }

    #[test]
    fn test_record_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = SuggestionStore::load(&path);
        store.record_character("Aoi");
        store.record_work("Work A");

        let reloaded = SuggestionStore::load(&path);
        assert_eq!(reloaded.character_suggestions(), vec!["Aoi", UNKNOWN]);
        assert_eq!(reloaded.work_suggestions(), vec!["Work A", UNKNOWN]);
    }

    #[test]
    fn test_whitespace_names_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = SuggestionStore::load(&path);
        store.record_character("   ");
        store.record_character("");
        assert_eq!(store.character_suggestions(), vec![UNKNOWN]);
        assert!(!path.exists());
    }

    #[test]
    fn test_names_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = SuggestionStore::load(&path);
        store.record_character("  Aoi  ");
        assert_eq!(store.character_suggestions(), vec!["Aoi", UNKNOWN]);
    }

    #[test]
    fn test_suggestions_are_sorted() {
        let dir = TempDir::new().unwrap();
        let mut store = SuggestionStore::load(&dir.path().join("history.json"));
        store.record_character("Miko");
        store.record_character("Aoi");
        store.record_character("Hina");
        assert_eq!(store.character_suggestions(), vec!["Aoi", "Hina", "Miko", UNKNOWN]);
    }

    #[test]
    fn test_clear_resets_to_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = SuggestionStore::load(&path);
        store.record_character("Aoi");
        store.clear().unwrap();

        assert!(!path.exists());
        assert_eq!(store.character_suggestions(), vec![UNKNOWN]);
    }
}
