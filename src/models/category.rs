//! Category model and its input/listing forms.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::UserRef;

/// A record in the `categories` collection.
///
/// `name` is unique across the collection (enforced by the `name_1`
/// index created at init). Records are never hard-deleted: deletion
/// flips `is_deleted` and keeps the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier; `None` only before the first save.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// User who created the category.
    pub creator: Option<ObjectId>,
    /// User who last updated the category; null until the first update.
    #[serde(default)]
    pub updater: Option<ObjectId>,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub const COLLECTION: &'static str = "categories";
}

/// Caller-supplied category fields for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    /// Trims and validates the input, returning the normalized name.
    pub fn normalized(&self) -> Result<String, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        Ok(name.to_string())
    }
}

/// Listing form of a category with creator/updater expanded to their
/// `{username, email, description}` projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedCategory {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub creator: Option<UserRef>,
    #[serde(default)]
    pub updater: Option<UserRef>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_trims_name() {
        let input = CategoryInput {
            name: "  books  ".to_string(),
        };
        assert_eq!(input.normalized().unwrap(), "books");
    }

    #[test]
    fn test_input_rejects_empty_name() {
        let input = CategoryInput {
            name: String::new(),
        };
        assert_eq!(input.normalized().unwrap_err(), "name is required");
    }

    #[test]
    fn test_input_rejects_whitespace_name() {
        let input = CategoryInput {
            name: "   ".to_string(),
        };
        assert!(input.normalized().is_err());
    }
}
