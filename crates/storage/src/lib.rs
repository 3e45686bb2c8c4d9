//! Storage layer: JSON snapshots of the knowledge base.
//!
//! Every write is a full snapshot. Reads recover from a missing or corrupt
//! file by starting over with an empty base.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

pub mod models;

pub use models::{Entry, KnowledgeBase};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no knowledge base at {0}")]
    NotFound(PathBuf),
    #[error("malformed knowledge base at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("index {index} out of range (size {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Strict load: distinguishes a missing file from one that does not parse.
pub fn try_load(path: &Path) -> Result<KnowledgeBase, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()))
        }
        // Unreadable files (permissions, invalid UTF-8) count as malformed.
        Err(e) => {
            return Err(StoreError::Malformed {
                path: path.to_path_buf(),
                source: serde_json::Error::io(e),
            })
        }
    };
    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a snapshot, falling back to an empty base when the file is missing
/// or malformed.
pub fn load(path: &Path) -> KnowledgeBase {
    match try_load(path) {
        Ok(kb) => {
            info!("Loaded {} entries from {}", kb.len(), path.display());
            kb
        }
        Err(StoreError::NotFound(_)) => {
            debug!("No knowledge base at {}, starting empty", path.display());
            KnowledgeBase::new()
        }
        Err(e) => {
            debug!("{e}; starting empty");
            KnowledgeBase::new()
        }
    }
}

pub fn save(path: &Path, kb: &KnowledgeBase) -> Result<(), StoreError> {
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(kb).map_err(|e| write_err(e.into()))?;
    fs::write(path, json).map_err(write_err)?;
    debug!("Saved {} entries to {}", kb.len(), path.display());
    Ok(())
}

/// Best-effort save. A failure is logged and handed back so the caller can
/// report it, but the in-memory base stays authoritative either way.
pub fn persist(path: &Path, kb: &KnowledgeBase) -> Result<(), StoreError> {
    save(path, kb).map_err(|e| {
        warn!("{e}");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_order() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kb.json");
        let mut kb = KnowledgeBase::new();
        kb.append("What is Python?", "A programming language");
        kb.append("Who wrote Python?", "Guido van Rossum");
        kb.append("What is Python?", "duplicate");

        save(&path, &kb).unwrap();
        assert_eq!(load(&path), kb);
    }

    #[test]
    fn file_format_matches_contract() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kb.json");
        let mut kb = KnowledgeBase::new();
        kb.append("q", "a");
        save(&path, &kb).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({ "questions": [{ "question": "q", "answer": "a" }] })
        );
    }

    #[test]
    fn reads_hand_written_snapshot() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kb.json");
        fs::write(
            &path,
            r#"{"questions": [{"question": "Hi", "answer": "Hello there"}]}"#,
        )
        .unwrap();
        let kb = load(&path);
        assert_eq!(kb.lookup_answer("Hi"), Some("Hello there"));
    }

    #[test]
    fn missing_file_is_empty_base() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("absent.json");
        assert!(load(&path).is_empty());
        assert!(matches!(try_load(&path), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn malformed_file_is_empty_base() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kb.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load(&path).is_empty());
        assert!(matches!(try_load(&path), Err(StoreError::Malformed { .. })));

        fs::write(&path, r#"{"questions": [{"question": "only"}]}"#).unwrap();
        assert!(load(&path).is_empty());
    }

    #[test]
    fn persist_reports_but_survives_write_failure() {
        let temp = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let path = temp.path().to_path_buf();
        let mut kb = KnowledgeBase::new();
        kb.append("q", "a");
        let err = persist(&path, &kb).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/dir/kb.json");
        save(&path, &KnowledgeBase::new()).unwrap();
        assert!(path.exists());
    }
}
