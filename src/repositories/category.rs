//! Category repository for CRUD operations.

use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::context::{AppStore, Context};
use crate::di::FromContext;
use crate::models::{Category, PopulatedCategory, User};
use crate::store::{Order, Page, Populate};

/// Repository over the `categories` collection.
#[derive(FromContext, Clone)]
pub struct CategoryRepository {
    store: AppStore,
}

impl CategoryRepository {
    fn collection(&self) -> Collection<Category> {
        self.store.collection(Category::COLLECTION)
    }

    /// Checks whether a category with the given id exists.
    pub async fn exists(&self, id: ObjectId) -> Result<bool, mongodb::error::Error> {
        self.store.id_exists(Category::COLLECTION, id).await
    }

    /// Finds a category by exact name.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, mongodb::error::Error> {
        self.collection().find_one(doc! { "name": name }).await
    }

    /// Inserts a new category, stamping both timestamps.
    pub async fn insert(
        &self,
        name: String,
        creator: ObjectId,
    ) -> Result<Category, mongodb::error::Error> {
        let now = Utc::now();
        let mut category = Category {
            id: None,
            name,
            creator: Some(creator),
            updater: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        let result = self.collection().insert_one(&category).await?;
        category.id = result.inserted_id.as_object_id();
        Ok(category)
    }

    /// Updates a category's fields and returns the post-update document.
    pub async fn update(
        &self,
        id: ObjectId,
        name: String,
        updater: ObjectId,
    ) -> Result<Option<Category>, mongodb::error::Error> {
        self.collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "name": name,
                    "updater": updater,
                    "updated_at": BsonDateTime::now(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Marks a category deleted without removing the record, and returns
    /// the post-update document.
    pub async fn soft_delete(
        &self,
        id: ObjectId,
        updater: ObjectId,
    ) -> Result<Option<Category>, mongodb::error::Error> {
        self.collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "is_deleted": true,
                    "updater": updater,
                    "updated_at": BsonDateTime::now(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Fetches one page of categories with creator/updater expanded.
    pub async fn find_page(
        &self,
        skip: u64,
        limit: u64,
        sort_by: &str,
        order: Order,
        criteria: Document,
    ) -> Result<Page<PopulatedCategory>, mongodb::error::Error> {
        let populate = [user_ref("creator"), user_ref("updater")];
        self.store
            .paginate(
                Category::COLLECTION,
                skip,
                limit,
                sort_by,
                order,
                &populate,
                criteria,
            )
            .await
    }
}

/// Expansion spec for a user reference field.
fn user_ref(field: &'static str) -> Populate {
    Populate {
        field,
        from: User::COLLECTION,
        projection: doc! { "_id": 0, "username": 1, "email": 1, "description": 1 },
    }
}
