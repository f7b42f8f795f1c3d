//! JSON snapshot cache implementation

use crate::profile::ProfileRecord;
use crate::storage::StorageResult;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// File-backed snapshot of the harvested corpus
///
/// The snapshot is a single JSON array of profile records. Readers never
/// fail: a snapshot that is missing or unreadable simply yields an empty
/// corpus, and the file is left in place for inspection. Writers replace
/// the snapshot atomically so a crash mid-save cannot truncate it. At most
/// one harvest cycle is assumed to be writing a given snapshot at a time;
/// concurrent writers would race on the sibling temp file.
pub struct CacheStore {
    path: PathBuf,
    expiration: Duration,
}

impl CacheStore {
    /// Creates a store for the snapshot at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Snapshot file location
    /// * `expiration` - Age beyond which the snapshot counts as stale
    pub fn new(path: PathBuf, expiration: Duration) -> Self {
        Self { path, expiration }
    }

    /// The snapshot file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age of the snapshot file, or `None` if it does not exist
    ///
    /// A modification time in the future reads as zero age.
    pub fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()?;
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Whether the snapshot exists and is younger than the expiration window
    pub fn is_fresh(&self) -> bool {
        match self.age() {
            Some(age) => age < self.expiration,
            None => false,
        }
    }

    /// Loads the snapshot, tolerating absence and corruption
    ///
    /// # Returns
    ///
    /// The cached records, or an empty vector if the snapshot is missing
    /// or cannot be parsed. Parse failures are logged and the file is left
    /// untouched.
    pub fn load(&self) -> Vec<ProfileRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read snapshot");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "snapshot is corrupt, starting from an empty corpus"
                );
                Vec::new()
            }
        }
    }

    /// Replaces the snapshot with `records`
    ///
    /// The new content is written to a sibling temp file and renamed over
    /// the snapshot, so concurrent readers see either the old corpus or
    /// the new one, never a partial write.
    ///
    /// # Arguments
    ///
    /// * `records` - The full corpus to persist
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Snapshot replaced
    /// * `Err(StorageError)` - Serialization or filesystem failure
    pub fn save(&self, records: &[ProfileRecord]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Sibling path used for the atomic-replace temp file
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::NA;
    use tempfile::TempDir;

    fn create_test_record(profile_url: &str, name: &str) -> ProfileRecord {
        ProfileRecord {
            institution: "IITM".to_string(),
            name: name.to_string(),
            department: "Physics".to_string(),
            vidwan_id: NA.to_string(),
            profile_url: profile_url.to_string(),
            image_url: NA.to_string(),
            expertise: "optics".to_string(),
            raw_html: "<html></html>".to_string(),
        }
    }

    fn create_test_store(dir: &TempDir, expiration: Duration) -> CacheStore {
        CacheStore::new(dir.path().join("snapshot.json"), expiration)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        let records = vec![
            create_test_record("https://iitm.irins.org/profile/1", "Ada"),
            create_test_record("https://iitm.irins.org/profile/2", "Grace"),
        ];
        store.save(&records).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_snapshot_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        assert!(store.load().is_empty());
        assert!(store.age().is_none());
    }

    #[test]
    fn test_load_corrupt_snapshot_is_empty_and_preserved() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        fs::write(store.path(), "{ not json [").unwrap();

        assert!(store.load().is_empty());
        // The corrupt file stays on disk for inspection
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json [");
    }

    #[test]
    fn test_freshness_window() {
        let dir = TempDir::new().unwrap();

        let fresh = create_test_store(&dir, Duration::from_secs(3600));
        fresh.save(&[create_test_record("https://x.irins.org/profile/1", "A")]).unwrap();
        assert!(fresh.is_fresh());

        // Zero expiration makes any existing snapshot stale
        let stale = CacheStore::new(fresh.path().to_path_buf(), Duration::ZERO);
        assert!(!stale.is_fresh());
    }

    #[test]
    fn test_missing_snapshot_is_stale() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));
        assert!(!store.is_fresh());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(
            dir.path().join("nested").join("deeper").join("snapshot.json"),
            Duration::from_secs(3600),
        );

        store.save(&[]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        store.save(&[create_test_record("https://x.irins.org/profile/1", "A")]).unwrap();
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        store.save(&[create_test_record("https://x.irins.org/profile/1", "A")]).unwrap();
        store.save(&[create_test_record("https://x.irins.org/profile/2", "B")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "B");
    }

    #[test]
    fn test_snapshot_uses_legacy_field_names() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir, Duration::from_secs(3600));

        store.save(&[create_test_record("https://x.irins.org/profile/1", "A")]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"Profile URL\""));
        assert!(raw.contains("\"Vidwan-ID\""));
        assert!(raw.contains("\"html_content\""));
    }
}
