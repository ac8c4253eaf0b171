use crate::app_dirs::AppDirs;
use crate::difficulty::Difficulty;
use chrono::Local;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Best recorded score for one difficulty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighScore {
    pub score: u32,
    pub mode: Difficulty,
    /// ISO-8601 timestamp of when the record was set.
    pub date: String,
}

/// JSON-file high score store, one record per difficulty.
///
/// Every failure mode degrades: a missing or corrupt file reads as "no high
/// scores", a failed write means "save skipped". Nothing here is fatal.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new() -> Option<Self> {
        AppDirs::high_scores_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    /// All stored records, ordered Easy to Hard.
    pub fn get_all(&self) -> Vec<HighScore> {
        let records: Vec<HighScore> = fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();

        records
            .into_iter()
            .sorted_by_key(|record| record.mode as u8)
            .collect()
    }

    /// Best score for `mode`, 0 when none is stored.
    pub fn best_for(&self, mode: Difficulty) -> u32 {
        self.get_all()
            .iter()
            .find(|record| record.mode == mode)
            .map(|record| record.score)
            .unwrap_or(0)
    }

    /// Record `score` when it beats the stored best for `mode`, leaving other
    /// modes untouched. Returns true iff a new best was written.
    pub fn save_if_best(&self, score: u32, mode: Difficulty) -> bool {
        let records = self.get_all();
        let current = records
            .iter()
            .find(|record| record.mode == mode)
            .map(|record| record.score);

        if let Some(best) = current {
            if score <= best {
                return false;
            }
        }

        let mut updated: Vec<HighScore> = records
            .into_iter()
            .filter(|record| record.mode != mode)
            .collect();
        updated.push(HighScore {
            score,
            mode,
            date: Local::now().to_rfc3339(),
        });

        self.write(&updated)
    }

    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }

    fn write(&self, records: &[HighScore]) -> bool {
        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        match serde_json::to_vec_pretty(records) {
            Ok(data) => fs::write(&self.path, data).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_store_reads_as_no_scores() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        assert!(store.get_all().is_empty());
        assert_eq!(store.best_for(Difficulty::Easy), 0);
    }

    #[test]
    fn test_corrupt_store_reads_as_no_scores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high_scores.json");
        fs::write(&path, b"{not json").unwrap();

        let store = ScoreFile::with_path(&path);
        assert!(store.get_all().is_empty());
        assert_eq!(store.best_for(Difficulty::Hard), 0);
    }

    #[test]
    fn test_save_if_best_records_and_rejects() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        assert!(store.save_if_best(7, Difficulty::Easy));
        assert_eq!(store.best_for(Difficulty::Easy), 7);

        assert!(store.save_if_best(10, Difficulty::Easy));
        assert_eq!(store.best_for(Difficulty::Easy), 10);

        assert!(!store.save_if_best(5, Difficulty::Easy));
        assert_eq!(store.best_for(Difficulty::Easy), 10);

        // equal score is not a new best
        assert!(!store.save_if_best(10, Difficulty::Easy));
    }

    #[test]
    fn test_modes_are_independent() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        assert!(store.save_if_best(4, Difficulty::Easy));
        assert!(store.save_if_best(9, Difficulty::Hard));
        assert!(store.save_if_best(6, Difficulty::Easy));

        assert_eq!(store.best_for(Difficulty::Easy), 6);
        assert_eq!(store.best_for(Difficulty::Medium), 0);
        assert_eq!(store.best_for(Difficulty::Hard), 9);
        assert_eq!(store.get_all().len(), 2);
    }

    #[test]
    fn test_get_all_ordered_easy_to_hard() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        store.save_if_best(3, Difficulty::Hard);
        store.save_if_best(2, Difficulty::Easy);
        store.save_if_best(1, Difficulty::Medium);

        let modes: Vec<Difficulty> = store.get_all().iter().map(|r| r.mode).collect();
        assert_eq!(
            modes,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn test_record_carries_date() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        store.save_if_best(1, Difficulty::Medium);
        let records = store.get_all();
        assert!(!records[0].date.is_empty());
        // rfc3339 dates parse back
        assert!(chrono::DateTime::parse_from_rfc3339(&records[0].date).is_ok());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::with_path(dir.path().join("high_scores.json"));

        store.save_if_best(8, Difficulty::Easy);
        store.clear();

        assert!(store.get_all().is_empty());
        // clearing an already-empty store is fine
        store.clear();
    }
}
