//! User Service - Business logic layer

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{SellerSummary, User};
use crate::repository::UserRepository;
use crate::seed::sample_users;

/// User service providing the lookups and seeding the catalog needs
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Resolve seller references into populate summaries, keyed by user id.
    ///
    /// Ids with no matching user are simply absent from the map.
    #[instrument(skip(self, ids), fields(id_count = ids.len()))]
    pub async fn sellers_by_ids(&self, ids: &[Uuid]) -> UserResult<HashMap<Uuid, SellerSummary>> {
        let users = self.repository.get_by_ids(ids).await?;
        Ok(users
            .into_iter()
            .map(|user| (user.id, user.seller_summary()))
            .collect())
    }

    /// Insert the built-in sample users.
    ///
    /// Fails with a conflict when a sample email is already present, so
    /// running the seed twice does not duplicate accounts.
    #[instrument(skip(self))]
    pub async fn seed_users(&self) -> UserResult<Vec<User>> {
        let users = sample_users();

        for user in &users {
            if self.repository.exists_by_email(&user.email).await? {
                return Err(UserError::DuplicateEmail(user.email.clone()));
            }
        }

        let created = self.repository.insert_many(users).await?;
        tracing::info!(count = created.len(), "Sample users seeded");
        Ok(created)
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
