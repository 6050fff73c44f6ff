use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widgets::groups_dialog::{Group, GroupStore, GroupsError};

/// Current on-disk format version of the groups file.
pub const GROUPS_FILE_VERSION: u32 = 1;

/// Errors emitted while reading, writing, or validating the groups file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("groups IO failed")]
    Io(#[from] std::io::Error),
    #[error("groups JSON failed")]
    Json(#[from] serde_json::Error),
    #[error("unsupported groups file version {0}")]
    Version(u32),
    #[error("group {0} has an unsaved id")]
    UnsavedId(i64),
    #[error("invalid group tree: {0}")]
    Tree(#[from] GroupsError),
}

/// Persisted committed groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsFile {
    pub version: u32,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Default for GroupsFile {
    fn default() -> Self {
        Self {
            version: GROUPS_FILE_VERSION,
            groups: Vec::new(),
        }
    }
}

impl GroupsFile {
    /// Snapshot of the committed values held by `store`.
    ///
    /// Pending changes, uncommitted moves and unsaved groups are left out.
    pub fn from_store(store: &GroupStore) -> Self {
        Self {
            version: GROUPS_FILE_VERSION,
            groups: store.committed_groups(),
        }
    }

    /// Validate the file contents and build a store from them.
    pub fn into_store(self) -> Result<GroupStore, StorageError> {
        if self.version != GROUPS_FILE_VERSION {
            return Err(StorageError::Version(self.version));
        }
        if let Some(group) =
            self.groups.iter().find(|group| !group.id().is_persisted())
        {
            return Err(StorageError::UnsavedId(group.id().0));
        }
        Ok(GroupStore::from_groups(self.groups)?)
    }
}

/// Load and validate the groups file; a missing file is an empty store.
pub fn load_groups(path: &Path) -> Result<GroupStore, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(GroupStore::default());
        },
        Err(err) => return Err(err.into()),
    };
    let file: GroupsFile = serde_json::from_str(&content)?;
    file.into_store()
}

/// Load groups, falling back to an empty store on error.
pub fn load_initial_groups(path: &Path) -> GroupStore {
    match load_groups(path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!(
                "failed to load groups from {}, starting empty: {err}",
                path.display()
            );
            GroupStore::default()
        },
    }
}

/// Save the groups file atomically.
pub fn save_groups(path: &Path, file: &GroupsFile) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let payload = serde_json::to_string_pretty(file)?;
    write_atomic(path, payload.as_bytes())?;
    Ok(())
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
