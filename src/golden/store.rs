//! Golden Store - Persistence for golden snapshots
//!
//! The whole store lives in one JSON file and is handled as
//! load → mutate in memory → save. There is no locking: callers running
//! captures in parallel must serialize writes themselves.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::StoreError;

use super::snapshot::args_key;
use super::types::GoldenSnapshot;

/// On-disk golden snapshot store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoldenStore {
    /// Format version for forward compatibility
    pub version: u32,

    pub outputs: Vec<GoldenSnapshot>,

    pub last_updated: DateTime<Utc>,
}

impl Default for GoldenStore {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            outputs: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl GoldenStore {
    /// Newest store format this build reads and writes
    pub const VERSION: u32 = 1;

    /// Load a store from a JSON file
    ///
    /// A missing file yields an empty store. A file that exists but is not
    /// a valid store is [`StoreError::Corrupted`]; one written by a newer
    /// version is [`StoreError::VersionMismatch`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "golden store not found, starting empty");
                return Ok(Self::default());
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        // Check the version before the full parse so that unknown future
        // fields are reported as a version problem, not corruption
        let raw: Value =
            serde_json::from_str(&content).map_err(|e| StoreError::corrupted(path, e.to_string()))?;
        let found = raw
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| StoreError::corrupted(path, "missing or non-integer 'version'"))?;
        if found > u64::from(Self::VERSION) {
            return Err(StoreError::VersionMismatch {
                path: path.display().to_string(),
                found,
                supported: Self::VERSION,
            });
        }

        let store: Self =
            serde_json::from_value(raw).map_err(|e| StoreError::corrupted(path, e.to_string()))?;
        debug!(path = %path.display(), snapshots = store.outputs.len(), "loaded golden store");
        Ok(store)
    }

    /// Save the store as pretty JSON, creating parent directories
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        self.last_updated = Utc::now();

        let content =
            serde_json::to_string_pretty(self).map_err(|source| StoreError::Serialize { source })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| StoreError::io(path, e))?;

        info!(path = %path.display(), snapshots = self.outputs.len(), "saved golden store");
        Ok(())
    }

    /// Insert a snapshot, overwriting any with the same tool and args
    ///
    /// Returns true if an existing snapshot was replaced.
    pub fn upsert(&mut self, snapshot: GoldenSnapshot) -> bool {
        let key = args_key(&snapshot.input_args);
        let existing = self
            .outputs
            .iter_mut()
            .find(|s| s.tool_name == snapshot.tool_name && args_key(&s.input_args) == key);

        match existing {
            Some(slot) => {
                debug!(tool = %snapshot.tool_name, "overwriting golden snapshot");
                *slot = snapshot;
                true
            }
            None => {
                debug!(tool = %snapshot.tool_name, "adding golden snapshot");
                self.outputs.push(snapshot);
                false
            }
        }
    }

    /// Get the snapshot for a tool and args
    pub fn get(&self, tool_name: &str, args: &Value) -> Option<&GoldenSnapshot> {
        self.outputs.iter().find(|s| s.matches(tool_name, args))
    }

    /// All snapshots, optionally restricted to one tool
    pub fn list(&self, tool_name: Option<&str>) -> Vec<&GoldenSnapshot> {
        self.outputs
            .iter()
            .filter(|s| tool_name.map_or(true, |t| s.tool_name == t))
            .collect()
    }

    /// Remove the snapshot for a tool and args
    pub fn remove(&mut self, tool_name: &str, args: &Value) -> Option<GoldenSnapshot> {
        let index = self.outputs.iter().position(|s| s.matches(tool_name, args))?;
        Some(self.outputs.remove(index))
    }

    /// Remove every snapshot of a tool, returning how many were removed
    pub fn remove_tool(&mut self, tool_name: &str) -> usize {
        let before = self.outputs.len();
        self.outputs.retain(|s| s.tool_name != tool_name);
        before - self.outputs.len()
    }

    /// Distinct tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.outputs.iter().map(|s| s.tool_name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golden::Tolerance;
    use serde_json::json;
    use tempfile::tempdir;

    fn snapshot(tool: &str, args: Value, raw: &str) -> GoldenSnapshot {
        GoldenSnapshot::capture(tool, args, raw, Tolerance::default())
    }

    #[test]
    fn store_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("golden.json");

        let mut store = GoldenStore::default();
        store.upsert(snapshot("search", json!({ "q": "a" }), r#"{"hits": []}"#));
        store.save(&path).unwrap();
        assert!(path.exists());

        let loaded = GoldenStore::load(&path).unwrap();
        assert_eq!(loaded.version, GoldenStore::VERSION);
        assert_eq!(loaded.outputs, store.outputs);
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = GoldenStore::load(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_json_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golden.json");
        fs::write(&path, "{ not json").unwrap();

        let err = GoldenStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[test]
    fn newer_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golden.json");
        fs::write(
            &path,
            r#"{"version": 2, "outputs": [], "lastUpdated": "2024-01-01T00:00:00Z", "future": {}}"#,
        )
        .unwrap();

        let err = GoldenStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::VersionMismatch { found: 2, supported: 1, .. }));
    }

    #[test]
    fn missing_version_is_corrupted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golden.json");
        fs::write(&path, r#"{"outputs": []}"#).unwrap();
        assert!(matches!(
            GoldenStore::load(&path).unwrap_err(),
            StoreError::Corrupted { .. }
        ));
    }

    #[test]
    fn upsert_overwrites_same_key() {
        let mut store = GoldenStore::default();
        assert!(!store.upsert(snapshot("t", json!({ "a": 1, "b": 2 }), "one")));
        assert!(store.upsert(snapshot("t", json!({ "b": 2, "a": 1 }), "two")));
        assert!(!store.upsert(snapshot("t", json!({ "a": 2 }), "three")));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("t", &json!({ "a": 1, "b": 2 })).unwrap().output.raw, "two");
    }

    #[test]
    fn remove_and_list() {
        let mut store = GoldenStore::default();
        store.upsert(snapshot("b", json!({}), "x"));
        store.upsert(snapshot("a", json!({ "n": 1 }), "y"));
        store.upsert(snapshot("a", json!({ "n": 2 }), "z"));

        assert_eq!(store.tool_names(), vec!["a", "b"]);
        assert_eq!(store.list(Some("a")).len(), 2);
        assert_eq!(store.list(None).len(), 3);

        assert!(store.remove("a", &json!({ "n": 1 })).is_some());
        assert!(store.remove("a", &json!({ "n": 1 })).is_none());
        assert_eq!(store.remove_tool("a"), 1);
        assert_eq!(store.tool_names(), vec!["b"]);
    }
}
