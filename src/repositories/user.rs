//! User repository for reference checks.

use mongodb::bson::oid::ObjectId;

use crate::context::{AppStore, Context};
use crate::di::FromContext;
use crate::models::User;

/// Repository over the `users` collection.
#[derive(FromContext, Clone)]
pub struct UserRepository {
    store: AppStore,
}

impl UserRepository {
    /// Checks whether a user with the given id exists.
    pub async fn exists(&self, id: ObjectId) -> Result<bool, mongodb::error::Error> {
        self.store.id_exists(User::COLLECTION, id).await
    }
}
