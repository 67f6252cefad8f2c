//! Category service: the CRUD operations exposed to callers.
//!
//! Every operation is a short sequence of awaited store calls — at most
//! one existence check plus one mutation, or a concurrent fan-out of
//! name lookups. Nothing is retried; a store failure surfaces
//! immediately as a mapped [`AppError`].

use futures::future::try_join_all;
use mongodb::bson::{oid::ObjectId, Document};

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Category, CategoryInput, PopulatedCategory};
use crate::repositories::{CategoryRepository, UserRepository};
use crate::store::{add_condition, contains_ci, map_store_error, parse_object_id, Order, Page};

const ENTITY: &str = "Category";

const FAILED_RETRIEVE: &str = "Failed to retrieve categories";
const FAILED_CREATE: &str = "Failed to create category";
const FAILED_UPDATE: &str = "Failed to update category";
const FAILED_DELETE: &str = "Failed to delete category";
const FAILED_DUPLICATE_CHECK: &str = "Failed to check category duplicate";

/// Service for category CRUD operations.
#[derive(FromContext, Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
    users: UserRepository,
}

impl CategoryService {
    /// Paginated listing with creator/updater expanded, optionally
    /// filtered by a case-insensitive name substring.
    pub async fn get_categories(
        &self,
        skip: u64,
        limit: u64,
        sort_by: &str,
        order: Order,
        name: Option<&str>,
    ) -> Result<Page<PopulatedCategory>, AppError> {
        let criteria = add_condition(Document::new(), "name", name.map(contains_ci));
        self.categories
            .find_page(skip, limit, sort_by, order, criteria)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "category listing failed");
                AppError::Unprocessable(FAILED_RETRIEVE.to_string())
            })
    }

    /// Resolves category names to their ids, all-or-nothing.
    ///
    /// Lookups run concurrently; the first miss or failure cancels the
    /// outstanding ones and fails the whole call. On success the ids
    /// come back in input order, not store arrival order.
    pub async fn get_categories_by_names(
        &self,
        names: &[String],
    ) -> Result<Vec<ObjectId>, AppError> {
        let lookups = names.iter().map(|name| async move {
            match self.categories.find_by_name(name).await {
                Ok(Some(category)) => category.id.ok_or_else(categories_not_found),
                Ok(None) => Err(categories_not_found()),
                Err(err) => {
                    tracing::error!(error = %err, name = %name, "category lookup failed");
                    Err(categories_not_found())
                }
            }
        });
        try_join_all(lookups).await
    }

    /// Creates a category owned by `creator_id`.
    ///
    /// The creator must reference an existing user; this is checked
    /// before anything is written.
    pub async fn create_category(
        &self,
        input: &CategoryInput,
        creator_id: &str,
    ) -> Result<Category, AppError> {
        let creator = parse_object_id(creator_id)?;
        let creator_exists = self
            .users
            .exists(creator)
            .await
            .map_err(|err| map_store_error(err, ENTITY, FAILED_CREATE))?;
        if !creator_exists {
            return Err(AppError::ItemNotFound(format!(
                "User with id {} not found",
                creator_id
            )));
        }

        let name = input.normalized().map_err(AppError::Invalid)?;
        tracing::debug!(name = %name, "creating category");
        self.categories
            .insert(name, creator)
            .await
            .map_err(|err| map_store_error(err, ENTITY, FAILED_CREATE))
    }

    /// Updates a category and returns the post-update document.
    pub async fn update_category(
        &self,
        id: &str,
        updater_id: &str,
        input: &CategoryInput,
    ) -> Result<Category, AppError> {
        let category_id = self.require_category(id, FAILED_UPDATE).await?;
        let updater = parse_object_id(updater_id)?;
        let name = input.normalized().map_err(AppError::Invalid)?;

        let updated = self
            .categories
            .update(category_id, name, updater)
            .await
            .map_err(|err| map_store_error(err, ENTITY, FAILED_UPDATE))?;
        updated.ok_or_else(|| category_not_found(id))
    }

    /// Soft-deletes a category: the record stays, `is_deleted` flips.
    pub async fn delete_category(
        &self,
        id: &str,
        updater_id: &str,
    ) -> Result<Category, AppError> {
        let category_id = self.require_category(id, FAILED_DELETE).await?;
        let updater = parse_object_id(updater_id)?;

        let deleted = self
            .categories
            .soft_delete(category_id, updater)
            .await
            .map_err(|err| map_store_error(err, ENTITY, FAILED_DELETE))?;
        deleted.ok_or_else(|| category_not_found(id))
    }

    /// Looks up a category by exact name for duplicate detection.
    pub async fn check_duplicate_category(
        &self,
        value: &str,
    ) -> Result<Option<Category>, AppError> {
        self.categories.find_by_name(value).await.map_err(|err| {
            tracing::error!(error = %err, "duplicate check failed");
            AppError::Unprocessable(FAILED_DUPLICATE_CHECK.to_string())
        })
    }

    /// Verifies the id parses and references an existing category.
    async fn require_category(&self, id: &str, fallback: &str) -> Result<ObjectId, AppError> {
        let category_id = parse_object_id(id)?;
        let exists = self
            .categories
            .exists(category_id)
            .await
            .map_err(|err| map_store_error(err, ENTITY, fallback))?;
        if !exists {
            return Err(category_not_found(id));
        }
        Ok(category_id)
    }
}

fn categories_not_found() -> AppError {
    AppError::ItemNotFound("Categories not found".to_string())
}

fn category_not_found(id: &str) -> AppError {
    AppError::ItemNotFound(format!("Category with id {} not found", id))
}
