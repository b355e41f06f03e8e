use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// This trait defines the data access interface for users.
/// Implementations can use different storage backends (MongoDB, PostgreSQL, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get users by ID, in no particular order
    async fn get_by_ids(&self, ids: &[Uuid]) -> UserResult<Vec<User>>;

    /// Find any user flagged as a seller
    async fn find_first_seller(&self) -> UserResult<Option<User>>;

    /// Check if a user email exists
    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// Insert a batch of users
    async fn insert_many(&self, users: Vec<User>) -> UserResult<Vec<User>>;
}
