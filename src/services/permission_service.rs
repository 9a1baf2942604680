use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::CredentialStore;
use crate::types::internal::auth::UserRole;

/// Answers "does this user have explicit permission to access this device?"
///
/// Current policy: admins may access every device; everyone else has no
/// explicit permission. The device id parameter is unused today but stays in
/// the contract as the seam for a per-device ACL.
pub struct PermissionResolver {
    credential_store: Arc<CredentialStore>,
}

impl PermissionResolver {
    pub fn new(credential_store: Arc<CredentialStore>) -> Self {
        Self { credential_store }
    }

    /// Check explicit permission for a (user, device) pair
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the user lookup fails. Callers must treat
    /// a lookup failure as "no permission" (fail closed) after logging it.
    pub async fn has_permission(
        &self,
        user_id: &str,
        _device_id: i32,
    ) -> Result<bool, InternalError> {
        let role = self.credential_store.get_role(user_id).await?;
        Ok(role == UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> (PermissionResolver, String, String) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(CredentialStore::new(db, "test-pepper".to_string()));
        let admin_id = store
            .add_user("root".to_string(), "pw".to_string(), UserRole::Admin)
            .await
            .unwrap();
        let user_id = store
            .add_user("joe".to_string(), "pw".to_string(), UserRole::User)
            .await
            .unwrap();

        (PermissionResolver::new(store), admin_id, user_id)
    }

    #[tokio::test]
    async fn test_admin_has_permission_to_any_device() {
        let (resolver, admin_id, _) = setup().await;
        assert!(resolver.has_permission(&admin_id, 1).await.unwrap());
        assert!(resolver.has_permission(&admin_id, 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_regular_user_has_no_explicit_permission() {
        let (resolver, _, user_id) = setup().await;
        assert!(!resolver.has_permission(&user_id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_is_an_error() {
        let (resolver, _, _) = setup().await;
        assert!(resolver.has_permission("ghost", 1).await.is_err());
    }
}
