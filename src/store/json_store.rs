use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::engine::scoring::GameScore;
use crate::store::keys;
use crate::store::normalize::{
    extract_claimable_anonymous_score, normalize_stored_daily_score, safe_json_parse,
    serialize_stored_daily_score,
};
use crate::store::schema::{ClaimableAnonymousScore, StoredDailyScore};

/// File-backed key-value store for daily scores, one JSON file per key.
///
/// Reads are best-effort: a missing key and unreadable or malformed content
/// are indistinguishable (both yield `None`). Writes go through a temp file
/// and rename so a crash mid-write leaves the previous record intact. Keys
/// are independent; a read racing a write on the same key sees either the
/// old or the new record (last writer wins).
pub struct ScoreStore {
    base_dir: PathBuf,
}

impl ScoreStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intersections");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Raw read. `None` for absent, unreadable, or non-UTF-8 content.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_path(key)).ok()
    }

    /// Raw write: temp file, fsync, rename.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Idempotent delete.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.file_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Load the score stored for a date, migrating legacy records on the way
    /// out. Corrupted or legacy-unreadable content degrades to `None`.
    pub fn load_daily_score(&self, date_key: &str) -> Option<StoredDailyScore> {
        let raw = self.get(&keys::daily_score_key(date_key))?;
        let value = safe_json_parse(&raw)?;
        normalize_stored_daily_score(&value)
    }

    /// Persist a score for a date, tagged with the current identity
    /// (`None` = anonymous). Overwrites any earlier attempt for that date.
    pub fn save_daily_score(
        &self,
        date_key: &str,
        score: &GameScore,
        local_user_id: Option<&str>,
    ) -> Result<()> {
        let record = serialize_stored_daily_score(score.clone(), local_user_id.map(str::to_owned));
        let json = serde_json::to_string(&record)?;
        self.set(&keys::daily_score_key(date_key), &json)
    }

    /// Look for a stored anonymous score eligible for claiming after sign-in.
    pub fn load_claimable_anonymous_score(
        &self,
        date_key: &str,
    ) -> Option<ClaimableAnonymousScore> {
        let raw = self.get(&keys::daily_score_key(date_key))?;
        let value = safe_json_parse(&raw)?;
        extract_claimable_anonymous_score(&value)
    }

    /// Whether the date's puzzle was marked completed. Anything but the
    /// literal stored "true" reads as not completed.
    pub fn load_daily_completed(&self, date_key: &str) -> bool {
        self.get(&keys::daily_completed_key(date_key)).as_deref() == Some("true")
    }

    pub fn save_daily_completed(&self, date_key: &str, completed: bool) -> Result<()> {
        self.set(
            &keys::daily_completed_key(date_key),
            if completed { "true" } else { "false" },
        )
    }

    /// Cached leaderboard rank for a date, if one was stored and parses.
    pub fn load_daily_rank(&self, date_key: &str) -> Option<u32> {
        self.get(&keys::daily_rank_key(date_key))?.trim().parse().ok()
    }

    pub fn save_daily_rank(&self, date_key: &str, rank: u32) -> Result<()> {
        self.set(&keys::daily_rank_key(date_key), &rank.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn make_test_store() -> (TempDir, ScoreStore) {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, store) = make_test_store();
        assert_eq!(store.get("score-2026-01-01"), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (_dir, store) = make_test_store();
        store.set("score-2026-01-01", "{\"a\":1}").unwrap();
        assert_eq!(store.get("score-2026-01-01").as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let (dir, store) = make_test_store();
        store.set("score-2026-01-01", "old").unwrap();
        store.set("score-2026-01-01", "new").unwrap();
        assert_eq!(store.get("score-2026-01-01").as_deref(), Some("new"));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = make_test_store();
        store.set("rank-2026-01-01", "5").unwrap();
        store.remove("rank-2026-01-01").unwrap();
        store.remove("rank-2026-01-01").unwrap();
        assert_eq!(store.get("rank-2026-01-01"), None);
    }

    #[test]
    fn test_completed_flag_round_trip() {
        let (_dir, store) = make_test_store();
        assert!(!store.load_daily_completed("2026-01-01"));
        store.save_daily_completed("2026-01-01", true).unwrap();
        assert!(store.load_daily_completed("2026-01-01"));
        store.save_daily_completed("2026-01-01", false).unwrap();
        assert!(!store.load_daily_completed("2026-01-01"));
    }

    #[test]
    fn test_rank_round_trip_and_garbage() {
        let (_dir, store) = make_test_store();
        assert_eq!(store.load_daily_rank("2026-01-01"), None);
        store.save_daily_rank("2026-01-01", 42).unwrap();
        assert_eq!(store.load_daily_rank("2026-01-01"), Some(42));

        store.set(&keys::daily_rank_key("2026-01-01"), "not a rank").unwrap();
        assert_eq!(store.load_daily_rank("2026-01-01"), None);
    }
}
