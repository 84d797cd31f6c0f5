//! The console remembers which service view was open between runs.

use crate::nav::View;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Bumped when the file layout changes; older files are ignored.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default = "current_version")]
    pub version: u32,
    pub active_view: View,
}

fn current_version() -> u32 {
    STATE_VERSION
}

impl PersistedState {
    pub fn new(active_view: View) -> Self {
        Self {
            version: STATE_VERSION,
            active_view,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// `Ok(None)` when nothing was saved yet or the file is from another
/// layout version.
pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let state: PersistedState = serde_json::from_str(&contents)?;
    if state.version != STATE_VERSION {
        tracing::debug!(
            found = state.version,
            expected = STATE_VERSION,
            "ignoring UI state from another version"
        );
        return Ok(None);
    }
    Ok(Some(state))
}

/// Written to a sibling temp file first so a crash never leaves half a file.
pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("tmp");
    std::fs::write(&staging, serde_json::to_vec_pretty(state)?)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use emucon_core::Service;

    #[test]
    fn test_missing_version_reads_as_current() {
        let state: PersistedState = serde_json::from_str(r#"{"active_view":"sqs"}"#).unwrap();
        assert_eq!(state.version, STATE_VERSION);
    }

    #[test]
    fn test_other_version_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut state = PersistedState::new(View(Service::S3));
        state.version = STATE_VERSION + 1;
        save(&path, &state).unwrap();
        assert_eq!(load(&path).unwrap(), None);
        assert!(!path.with_extension("tmp").exists());
    }
}
