use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::auth::UserRole;

/// CredentialStore manages user accounts in the database
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and
    /// password pepper
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn hasher(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| {
            CredentialError::HashingFailed(format!("Failed to initialize Argon2: {}", e)).into()
        })
    }

    /// Add a new user to the database
    ///
    /// # Returns
    /// * `Ok(String)` - The user_id (UUID) of the created user
    /// * `Err(InternalError)` - DuplicateUsername or infrastructure failure
    pub async fn add_user(
        &self,
        username: String,
        password: String,
        role: UserRole,
    ) -> Result<String, InternalError> {
        let existing_user = User::find()
            .filter(user::Column::Username.eq(&username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("check_duplicate_username", e))?;

        if existing_user.is_some() {
            return Err(CredentialError::DuplicateUsername(username).into());
        }

        let user_id = Uuid::new_v4().to_string();

        // Argon2id with the server pepper as secret parameter
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))?
            .to_string();

        let now = Utc::now().timestamp();
        let new_user = ActiveModel {
            id: Set(user_id.clone()),
            username: Set(username.clone()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                InternalError::Credential(CredentialError::DuplicateUsername(username.clone()))
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        Ok(user_id)
    }

    /// Verify user credentials
    ///
    /// # Returns
    /// * `Ok(Some(Model))` - The user row if the credentials are valid
    /// * `Ok(None)` - Unknown username or wrong password
    /// * `Err(InternalError)` - Infrastructure failure
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))?;

        let user = match user {
            Some(u) => u,
            None => return Ok(None),
        };

        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(h) => h,
            // A corrupt stored hash reads as bad credentials, not a 500
            Err(_) => return Ok(None),
        };

        let verified = self
            .hasher()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        Ok(if verified { Some(user) } else { None })
    }

    /// Look up a user row by id
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Look up a user's role, failing if the user does not exist
    pub async fn get_role(&self, user_id: &str) -> Result<UserRole, InternalError> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;
        Ok(UserRole::parse(&user.role))
    }
}
