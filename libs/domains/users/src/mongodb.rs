//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB-backed user repository over the `users` collection.
pub struct MongoUserRepository {
    collection: Collection<User>,
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "users")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Create the unique email constraint and the seller-flag index used
    /// by seed and populate lookups.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_email_unique".to_string())
                    .build(),
            )
            .build();
        let seller_flag = IndexModel::builder()
            .keys(doc! { "is_seller": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_is_seller".to_string())
                    .build(),
            )
            .build();

        self.collection.create_indexes([email, seller_flag]).await?;

        tracing::info!("User indexes ensured");
        Ok(())
    }

    /// The underlying collection, for operations outside the trait.
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, ids), fields(id_count = ids.len()))]
    async fn get_by_ids(&self, ids: &[Uuid]) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let encoded: Vec<Bson> = ids
            .iter()
            .map(|id| to_bson(id).unwrap_or(Bson::Null))
            .collect();

        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": encoded } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_first_seller(&self) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "is_seller": true }).await?)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, users), fields(user_count = users.len()))]
    async fn insert_many(&self, users: Vec<User>) -> UserResult<Vec<User>> {
        if users.is_empty() {
            return Ok(users);
        }

        self.collection.insert_many(&users).await?;

        tracing::info!(count = users.len(), "Users inserted");
        Ok(users)
    }
}
