//! Persistent username -> display name cache.
//!
//! A flat JSON object on disk, loaded once per run and written back once.
//! Both directions treat I/O problems as non-fatal and only log them; a
//! broken cache degrades to extra directory lookups, never to a failed run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Username -> display name map persisted between runs.
///
/// An empty string value means the user is known to have no display name;
/// that still counts as a hit and suppresses the directory lookup.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: HashMap<String, String>,
}

impl NameCache {
    /// Load the cache from `path`.
    ///
    /// A missing, unreadable, or unparsable file yields an empty cache.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No name cache at {}", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read name cache {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Self { entries },
            Err(e) => {
                log::warn!("Ignoring unparsable name cache {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the cache to `path`, replacing the previous contents.
    ///
    /// Failures are logged; the in-memory state is unaffected.
    pub fn save(&self, path: &Path) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to serialize name cache: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(path, raw) {
            log::warn!("Failed to write name cache {}: {}", path.display(), e);
        }
    }

    pub fn get(&self, username: &str) -> Option<&str> {
        self.entries.get(username).map(String::as_str)
    }

    pub fn insert(&mut self, username: &str, name: &str) {
        self.entries.insert(username.to_string(), name.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let cache = NameCache::load(&dir.path().join("cache.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_garbage_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json at all").unwrap();

        let cache = NameCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let mut cache = NameCache::default();
        cache.insert("alice", "Alice A.");
        cache.insert("bob", "");
        cache.save(&path);

        let reloaded = NameCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("alice"), Some("Alice A."));
        assert_eq!(reloaded.get("bob"), Some(""));
        assert_eq!(reloaded.get("carol"), None);
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let mut first = NameCache::default();
        first.insert("alice", "Alice A.");
        first.save(&path);

        let mut second = NameCache::default();
        second.insert("bob", "Bob B.");
        second.save(&path);

        let reloaded = NameCache::load(&path);
        assert_eq!(reloaded.get("alice"), None);
        assert_eq!(reloaded.get("bob"), Some("Bob B."));
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let dir = tempdir().unwrap();

        let mut cache = NameCache::default();
        cache.insert("alice", "Alice A.");
        // Target is a directory, so the write fails and is only logged
        cache.save(dir.path());
        assert_eq!(cache.get("alice"), Some("Alice A."));
    }
}
