//! Draft persistence: one JSON file per draft.
//!
//! The store is the scheduler's external collaborator. The save callback
//! wired in [`crate::app`] wraps [`save_draft`] and logs failures; the
//! scheduler itself never sees them.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::autosave::EditorDocument;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read draft {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write draft {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("draft {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Unix seconds of the last save; absent in hand-written files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<u64>,
}

impl From<Draft> for EditorDocument {
    fn from(draft: Draft) -> Self {
        Self {
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Load a draft, returning `Ok(None)` when the file does not exist yet
/// (a fresh draft). A present-but-unreadable or malformed file is an
/// error; silently starting empty would risk overwriting it.
pub fn load_draft(path: &Path) -> Result<Option<EditorDocument>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };
    let draft: Draft = serde_json::from_slice(&bytes).map_err(|err| StoreError::Malformed {
        path: path.to_path_buf(),
        source: err,
    })?;
    Ok(Some(draft.into()))
}

/// Save a draft atomically: serialize to a sibling temp file, then rename
/// over the destination so readers never observe a partial write.
pub fn save_draft(path: &Path, document: &EditorDocument) -> Result<(), StoreError> {
    let draft = Draft {
        title: document.title.clone(),
        content: document.content.clone(),
        saved_at: unix_seconds(),
    };
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_vec_pretty(&draft).map_err(|err| StoreError::Write {
        path: path.to_path_buf(),
        source: io::Error::other(err),
    })?;
    json.push(b'\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = tmp_path(path);
    std::fs::write(&tmp, &json).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;
    tracing::debug!("saved draft to {}", path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("draft"),
        std::borrow::ToOwned::to_owned,
    );
    name.push(".tmp");
    path.with_file_name(name)
}

fn unix_seconds() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_doc() -> EditorDocument {
        EditorDocument {
            title: "Morning pages".to_string(),
            content: "A few lines\nof text.".to_string(),
        }
    }

    #[test]
    fn test_save_then_load_round_trips_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pages.draft.json");

        save_draft(&path, &sample_doc()).unwrap();
        let loaded = load_draft(&path).unwrap().unwrap();
        assert_eq!(loaded, sample_doc());
    }

    #[test]
    fn test_load_missing_file_is_a_fresh_draft() {
        let dir = tempdir().unwrap();
        let loaded = load_draft(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_draft(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_save_creates_parent_directories_and_no_temp_leftover() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("d.json");

        save_draft(&path, &sample_doc()).unwrap();
        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_saved_file_records_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("d.json");

        save_draft(&path, &sample_doc()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let draft: Draft = serde_json::from_str(&raw).unwrap();
        assert!(draft.saved_at.is_some());
    }

    #[test]
    fn test_draft_without_timestamp_still_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hand.json");
        std::fs::write(&path, r#"{"title": "t", "content": "c"}"#).unwrap();

        let loaded = load_draft(&path).unwrap().unwrap();
        assert_eq!(loaded.title, "t");
        assert_eq!(loaded.content, "c");
    }
}
