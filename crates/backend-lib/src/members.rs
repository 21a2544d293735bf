// ============================
// crates/backend-lib/src/members.rs
// ============================
//! Member registration and profile maintenance.
use std::sync::Arc;

use memberbook_common::MemberId;
use metrics::counter;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::auth::PasswordHasher;
use crate::directory::{UserDirectory, UserRecord};
use crate::error::AppError;
use crate::metrics::{MEMBER_DELETED, MEMBER_REGISTERED, MEMBER_UPDATED};
use crate::validation;

/// Image reference used when a registration carries none
pub const DEFAULT_PROFILE_IMAGE: &str = "noimage.jpg";

/// A validated-on-entry registration submission
pub struct Registration {
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    /// Write-only; consumed by hashing and zeroized on drop
    pub password: Zeroizing<String>,
    pub profile_image: Option<String>,
}

/// Profile update addressed by external stable id
pub struct ProfileUpdate {
    pub external_id: Uuid,
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub contact: String,
    /// The stored hash is rewritten only when a new password is supplied
    pub password: Option<Zeroizing<String>>,
    pub profile_image: Option<String>,
}

/// Creates and maintains member records. The password hash is computed
/// before anything reaches the store; the plaintext never does.
pub struct MemberService<D> {
    directory: Arc<D>,
    hasher: PasswordHasher,
}

impl<D> Clone for MemberService<D> {
    fn clone(&self) -> Self {
        Self { directory: Arc::clone(&self.directory), hasher: self.hasher }
    }
}

impl<D: UserDirectory> MemberService<D> {
    pub fn new(directory: Arc<D>, hasher: PasswordHasher) -> Self {
        Self { directory, hasher }
    }

    /// Register a new member.
    ///
    /// Hashing happens first and on the blocking pool; a hashing failure
    /// aborts the operation before any insert, so a record is never
    /// persisted with an unset or plaintext password field.
    pub async fn register(&self, registration: Registration) -> Result<UserRecord, AppError> {
        validation::validate_login_name(&registration.login_name)?;
        validation::validate_display_name(&registration.display_name)?;
        validation::validate_email(&registration.email)?;
        validation::validate_contact(&registration.contact)?;
        validation::validate_password(&registration.password)?;

        let hasher = self.hasher;
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;

        let record = UserRecord {
            internal_id: 0, // assigned by the store
            external_id: Uuid::new_v4(),
            login_name: registration.login_name,
            password_hash,
            display_name: registration.display_name,
            email: registration.email,
            contact: registration.contact,
            profile_image: registration
                .profile_image
                .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
        };

        let internal_id = self.directory.insert(record.clone()).await?;
        counter!(MEMBER_REGISTERED).increment(1);
        tracing::info!(member = %record.external_id, "member registered");

        Ok(UserRecord { internal_id, ..record })
    }

    /// Rewrite a member's profile, addressed by external stable id.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserRecord, AppError> {
        validation::validate_login_name(&update.login_name)?;
        validation::validate_display_name(&update.display_name)?;
        validation::validate_email(&update.email)?;
        validation::validate_contact(&update.contact)?;
        if let Some(password) = update.password.as_deref() {
            validation::validate_password(password)?;
        }

        let Some(mut user) = self.directory.find_by_external_id(&update.external_id).await?
        else {
            return Err(AppError::NotFound(format!(
                "no member with id {}",
                update.external_id
            )));
        };

        user.login_name = update.login_name;
        user.display_name = update.display_name;
        user.email = update.email;
        user.contact = update.contact;
        if let Some(image) = update.profile_image {
            user.profile_image = image;
        }

        if let Some(password) = update.password {
            let hasher = self.hasher;
            user.password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
                .await
                .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;
        }

        // The record can vanish between the lookup and the rewrite
        if !self.directory.update(user.clone()).await? {
            return Err(AppError::NotFound(format!(
                "no member with id {}",
                update.external_id
            )));
        }

        counter!(MEMBER_UPDATED).increment(1);
        tracing::info!(member = %user.external_id, "member profile updated");
        Ok(user)
    }

    /// Delete a member by internal id; returns whether a record existed.
    pub async fn remove(&self, id: MemberId) -> Result<bool, AppError> {
        let existed = self.directory.delete(id).await?;
        if existed {
            counter!(MEMBER_DELETED).increment(1);
            tracing::info!(member_id = id, "member deleted");
        }
        Ok(existed)
    }

    /// All member records, for the members listing.
    pub async fn roster(&self) -> Result<Vec<UserRecord>, AppError> {
        self.directory.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::FlatFileDirectory;

    fn service(root: &std::path::Path) -> MemberService<FlatFileDirectory> {
        let directory = Arc::new(FlatFileDirectory::new(root).unwrap());
        MemberService::new(directory, PasswordHasher::new(8).unwrap())
    }

    fn registration(login_name: &str, password: &str) -> Registration {
        Registration {
            login_name: login_name.to_string(),
            display_name: "Test Member".to_string(),
            email: format!("{login_name}@example.com"),
            contact: "5551234567".to_string(),
            password: Zeroizing::new(password.to_string()),
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_register_never_stores_the_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let members = service(dir.path());

        let record = members
            .register(registration("alice", "secret123"))
            .await
            .unwrap();

        assert_ne!(record.password_hash, "secret123");
        assert!(record.internal_id > 0);
        assert_eq!(record.profile_image, DEFAULT_PROFILE_IMAGE);

        // The stored value is the self-describing hash and verifies
        let hasher = PasswordHasher::new(8).unwrap();
        assert!(hasher.verify("secret123", &record.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_refuses_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let members = service(dir.path());

        let mut missing_password = registration("alice", "");
        missing_password.password = Zeroizing::new(String::new());
        assert!(matches!(
            members.register(missing_password).await,
            Err(AppError::Validation(_))
        ));

        let mut missing_contact = registration("alice", "p@ss1");
        missing_contact.contact = String::new();
        assert!(matches!(
            members.register(missing_contact).await,
            Err(AppError::Validation(_))
        ));

        let mut missing_login = registration("", "p@ss1");
        missing_login.login_name = String::new();
        assert!(matches!(
            members.register(missing_login).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rehashes_only_when_password_supplied() {
        let dir = tempfile::tempdir().unwrap();
        let members = service(dir.path());

        let record = members
            .register(registration("alice", "p@ss1"))
            .await
            .unwrap();

        // No password in the update: the hash is untouched
        let updated = members
            .update_profile(ProfileUpdate {
                external_id: record.external_id,
                login_name: "alice".to_string(),
                display_name: "Alice S.".to_string(),
                email: "alice@new.example.com".to_string(),
                contact: "5559876543".to_string(),
                password: None,
                profile_image: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.password_hash, record.password_hash);
        assert_eq!(updated.display_name, "Alice S.");

        // With a password: the hash is rewritten and the old plaintext
        // stops verifying
        let rehashed = members
            .update_profile(ProfileUpdate {
                external_id: record.external_id,
                login_name: "alice".to_string(),
                display_name: "Alice S.".to_string(),
                email: "alice@new.example.com".to_string(),
                contact: "5559876543".to_string(),
                password: Some(Zeroizing::new("n3w-p@ss".to_string())),
                profile_image: None,
            })
            .await
            .unwrap();
        assert_ne!(rehashed.password_hash, record.password_hash);

        let hasher = PasswordHasher::new(8).unwrap();
        assert!(!hasher.verify("p@ss1", &rehashed.password_hash).unwrap());
        assert!(hasher.verify("n3w-p@ss", &rehashed.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_external_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let members = service(dir.path());

        let err = members
            .update_profile(ProfileUpdate {
                external_id: Uuid::new_v4(),
                login_name: "ghost".to_string(),
                display_name: "Ghost".to_string(),
                email: "ghost@example.com".to_string(),
                contact: "5550000000".to_string(),
                password: None,
                profile_image: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_and_roster() {
        let dir = tempfile::tempdir().unwrap();
        let members = service(dir.path());

        let alice = members
            .register(registration("alice", "p@ss1"))
            .await
            .unwrap();
        members
            .register(registration("bob", "p@ss2"))
            .await
            .unwrap();

        assert_eq!(members.roster().await.unwrap().len(), 2);
        assert!(members.remove(alice.internal_id).await.unwrap());
        assert!(!members.remove(alice.internal_id).await.unwrap());
        assert_eq!(members.roster().await.unwrap().len(), 1);
    }
}
