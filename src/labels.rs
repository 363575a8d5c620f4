//! Persisted mapping from provider language codes to display labels.
//!
//! The mapping lives in a human-editable JSON object (`{"en-GB": "English (UK)"}`)
//! that is rewritten wholesale on every change. One [`LabelStore`] is shared by
//! every UI session in the process; all reads and writes go through a single
//! mutex so a writer never races another writer or a reload.
//!
//! Mutations are write-then-commit: the next mapping is written to disk first
//! and only replaces the in-memory state once the write succeeded. A failed
//! save therefore leaves memory and disk agreeing on the previous contents.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::error::StudioError;

/// Ordered code → label mapping, in file order.
pub type LabelMap = IndexMap<String, String>;

#[derive(Debug, Default)]
struct LabelState {
    labels: LabelMap,
    /// Derived label → code view. Rebuilt on every commit, never edited directly.
    by_label: HashMap<String, String>,
}

impl LabelState {
    fn new(labels: LabelMap) -> Self {
        // Folded in store order: when two codes share a label the last one wins.
        let by_label = labels
            .iter()
            .map(|(code, label)| (label.clone(), code.clone()))
            .collect();
        Self { labels, by_label }
    }
}

/// Thread-safe label store bound to one JSON file.
#[derive(Debug)]
pub struct LabelStore {
    path: PathBuf,
    state: Mutex<LabelState>,
}

impl LabelStore {
    /// Open the store at `path`, starting empty if the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let labels = load_labels(&path);
        Self {
            path,
            state: Mutex::new(LabelState::new(labels)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the label for `code`, replacing any previous one, and persist.
    ///
    /// An existing code keeps its position in the file.
    pub fn upsert(&self, code: &str, label: &str) -> Result<(), StudioError> {
        let code = code.trim();
        let label = label.trim();
        if code.is_empty() {
            return Err(StudioError::Validation(
                "Language code must not be empty".to_string(),
            ));
        }
        if label.is_empty() {
            return Err(StudioError::Validation(
                "Display name must not be empty".to_string(),
            ));
        }

        let mut state = self.lock();
        let mut next = state.labels.clone();
        let previous = next.insert(code.to_string(), label.to_string());
        self.commit(&mut state, next)?;

        match previous {
            Some(old) => log::info!("Relabelled {code}: '{old}' -> '{label}'"),
            None => log::info!("Labelled {code} as '{label}'"),
        }
        Ok(())
    }

    /// Remove the first entry whose label equals `label` and persist.
    ///
    /// Returns `Ok(false)` without touching the file when nothing matches,
    /// including for blank labels, so stale UI selections are harmless.
    pub fn delete(&self, label: &str) -> Result<bool, StudioError> {
        if label.trim().is_empty() {
            return Ok(false);
        }

        let mut state = self.lock();
        let Some(index) = state.labels.values().position(|value| value == label) else {
            log::debug!("No language labelled '{label}', nothing to delete");
            return Ok(false);
        };

        let mut next = state.labels.clone();
        if let Some((code, _)) = next.shift_remove_index(index) {
            log::info!("Deleted label '{label}' for {code}");
        }
        self.commit(&mut state, next)?;
        Ok(true)
    }

    /// Discard the in-memory mapping and re-read the file.
    pub fn reload(&self) {
        // Read under the lock so a concurrent commit cannot be overwritten
        // by an older copy of the file.
        let mut state = self.lock();
        *state = LabelState::new(load_labels(&self.path));
    }

    /// Rewrite the file from the in-memory mapping.
    pub fn save(&self) -> Result<(), StudioError> {
        let state = self.lock();
        save_labels(&state.labels, &self.path)
    }

    /// Provider code for a display label, or the input itself if no label matches.
    pub fn resolve_code(&self, display_or_code: &str) -> String {
        self.lock()
            .by_label
            .get(display_or_code)
            .cloned()
            .unwrap_or_else(|| display_or_code.to_string())
    }

    pub fn get(&self, code: &str) -> Option<String> {
        self.lock().labels.get(code).cloned()
    }

    /// `(code, label)` rows in store order.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.lock()
            .labels
            .iter()
            .map(|(code, label)| (code.clone(), label.clone()))
            .collect()
    }

    /// Display labels in store order.
    pub fn labels(&self) -> Vec<String> {
        self.lock().labels.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().labels.is_empty()
    }

    fn commit(&self, state: &mut LabelState, next: LabelMap) -> Result<(), StudioError> {
        save_labels(&next, &self.path)?;
        *state = LabelState::new(next);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, LabelState> {
        // State is only replaced after a successful write, so a poisoned lock
        // still guards a consistent mapping.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read a label mapping, returning an empty one if the file cannot be read or parsed.
pub fn load_labels(path: &Path) -> LabelMap {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No language labels at {}, using raw codes", path.display());
            return LabelMap::new();
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}; using raw codes", path.display());
            return LabelMap::new();
        }
    };

    match serde_json::from_str::<LabelMap>(&content) {
        Ok(labels) => {
            log::info!("Loaded {} language labels from {}", labels.len(), path.display());
            labels
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {e}; using raw codes", path.display());
            LabelMap::new()
        }
    }
}

/// Overwrite `path` with the full mapping.
pub fn save_labels(labels: &LabelMap, path: &Path) -> Result<(), StudioError> {
    let json = serde_json::to_string_pretty(labels)?;
    write_atomic(path, json.as_bytes())
}

/// Write `contents` to a temporary file next to `path`, then rename it into place.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StudioError> {
    let persistence = |source: std::io::Error| StudioError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(persistence)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persistence)?;
    tmp.write_all(contents).map_err(persistence)?;
    // Temp files are created 0600; the renamed file keeps the target's mode.
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file().set_permissions(permissions).map_err(persistence)?;
    }
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|e| persistence(e.error))?;
    Ok(())
}

/// Permissions the committed file should carry: the existing file's, or 0644 for a new one.
fn target_permissions(path: &Path) -> Option<std::fs::Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            Some(std::fs::Permissions::from_mode(0o644))
        }
        #[cfg(not(unix))]
        Err(_) => None,
    }
}
