//! Storage domain: snapshot stores.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::snapshot::Snapshot;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence backend keyed by user id
pub trait SnapshotStore {
    fn load(&self, user_id: &str) -> Result<Option<Snapshot>, StoreError>;
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// One pretty-printed JSON file per user in a local directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot file for a user, always directly inside the store directory
    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir
            .join(format!("life_physics_v1_{}.json", file_safe(user_id)))
    }
}

/// Keep `[A-Za-z0-9_-]` and escape every other byte as `%xx`, so distinct
/// ids never share a file and no id can name a path separator or `..`.
fn file_safe(user_id: &str) -> String {
    let mut out = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{:02x}", byte));
        }
    }
    out
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl SnapshotStore for LocalStore {
    fn load(&self, user_id: &str) -> Result<Option<Snapshot>, StoreError> {
        let path = self.path_for(user_id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Written to a temporary file, then renamed over the previous snapshot
    fn save(&self, user_id: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let path = self.path_for(user_id);
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        let tmp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.flush())
            .map_err(io_error(&tmp_path))?;
        fs::rename(&tmp_path, &path).map_err(io_error(&path))?;
        Ok(())
    }
}
