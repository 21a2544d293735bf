// ============================
// crates/backend-lib/src/directory.rs
// ============================
//! User-record store abstraction with a flat-file implementation.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use memberbook_common::{MemberId, MemberProfile};
use serde::{Deserialize, Serialize};
use tokio::{fs as tokio_fs, sync::RwLock};
use uuid::Uuid;

use crate::error::AppError;

/// A stored member record.
///
/// `password_hash` always holds the PHC-encoded output of
/// [`crate::auth::PasswordHasher`], never raw input. The record is created
/// by registration, mutated by the update operation, and destroyed by an
/// explicit delete. No soft-delete, no versioning.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Assigned by the store; stable for the record's lifetime
    pub internal_id: MemberId,
    /// Generated once at registration, independent of storage internals
    pub external_id: Uuid,
    /// Unique per active account; used for authentication lookup
    pub login_name: String,
    pub password_hash: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    pub profile_image: String,
}

impl UserRecord {
    /// Public projection; never includes the password hash.
    pub fn profile(&self) -> MemberProfile {
        MemberProfile {
            external_id: self.external_id,
            login_name: self.login_name.clone(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Trait for user-record stores.
///
/// Operations are consistent single-record reads and writes; a lookup miss
/// is `Ok(None)`, not an error. The store does not provide cross-record
/// transactions and none are required.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a record by its store-assigned id
    async fn find_by_internal_id(&self, id: MemberId) -> Result<Option<UserRecord>, AppError>;

    /// Look up a record by its external stable id
    async fn find_by_external_id(
        &self,
        external_id: &Uuid,
    ) -> Result<Option<UserRecord>, AppError>;

    /// Look up a record by login name
    async fn find_by_login_name(&self, login_name: &str)
        -> Result<Option<UserRecord>, AppError>;

    /// Persist a new record, assigning and returning its internal id.
    /// Rejects a login name already held by another record.
    async fn insert(&self, record: UserRecord) -> Result<MemberId, AppError>;

    /// Rewrite the record with the same internal id; returns whether a
    /// record existed to rewrite
    async fn update(&self, record: UserRecord) -> Result<bool, AppError>;

    /// Remove a record by internal id; returns whether it existed
    async fn delete(&self, id: MemberId) -> Result<bool, AppError>;

    /// All records, ordered by internal id
    async fn list(&self) -> Result<Vec<UserRecord>, AppError>;
}

/// On-disk layout of `users.json`
#[derive(Serialize, Deserialize, Debug, Default)]
struct DirectoryFile {
    next_id: MemberId,
    users: Vec<UserRecord>,
}

#[derive(Debug)]
struct DirectoryInner {
    next_id: MemberId,
    users: HashMap<MemberId, UserRecord>,
}

/// Flat-file implementation of the `UserDirectory` trait.
///
/// Keeps the working set in memory and rewrites `users.json` after every
/// mutation while still holding the write lock, which gives per-record
/// atomicity without any further coordination.
pub struct FlatFileDirectory {
    path: PathBuf,
    inner: RwLock<DirectoryInner>,
}

impl FlatFileDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let path = root.join("users.json");

        let file = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str::<DirectoryFile>(&content)?
        } else {
            DirectoryFile { next_id: 1, users: Vec::new() }
        };

        let users = file
            .users
            .into_iter()
            .map(|record| (record.internal_id, record))
            .collect();

        Ok(Self {
            path,
            inner: RwLock::new(DirectoryInner { next_id: file.next_id.max(1), users }),
        })
    }

    /// Rewrite `users.json` from the in-memory state. Callers hold the
    /// write lock across this await.
    async fn persist(&self, inner: &DirectoryInner) -> Result<(), AppError> {
        let mut users: Vec<&UserRecord> = inner.users.values().collect();
        users.sort_by_key(|record| record.internal_id);

        let file = DirectoryFile {
            next_id: inner.next_id,
            users: users.into_iter().cloned().collect(),
        };

        let json = serde_json::to_string_pretty(&file)?;
        tokio_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for FlatFileDirectory {
    async fn find_by_internal_id(&self, id: MemberId) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &Uuid,
    ) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|record| record.external_id == *external_id)
            .cloned())
    }

    async fn find_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|record| record.login_name == login_name)
            .cloned())
    }

    async fn insert(&self, mut record: UserRecord) -> Result<MemberId, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|existing| existing.login_name == record.login_name)
        {
            return Err(AppError::Validation(format!(
                "login name '{}' is already taken",
                record.login_name
            )));
        }

        let id = inner.next_id;
        inner.next_id += 1;
        record.internal_id = id;
        inner.users.insert(id, record);

        self.persist(&inner).await?;
        Ok(id)
    }

    async fn update(&self, record: UserRecord) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&record.internal_id) {
            return Ok(false);
        }

        if inner.users.values().any(|existing| {
            existing.internal_id != record.internal_id
                && existing.login_name == record.login_name
        }) {
            return Err(AppError::Validation(format!(
                "login name '{}' is already taken",
                record.login_name
            )));
        }

        inner.users.insert(record.internal_id, record);
        self.persist(&inner).await?;
        Ok(true)
    }

    async fn delete(&self, id: MemberId) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let existed = inner.users.remove(&id).is_some();
        if existed {
            self.persist(&inner).await?;
        }
        Ok(existed)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        let inner = self.inner.read().await;
        let mut records: Vec<UserRecord> = inner.users.values().cloned().collect();
        records.sort_by_key(|record| record.internal_id);
        Ok(records)
    }
}
