//! Store access layer over the MongoDB driver.
//!
//! [`Store`] wraps a `mongodb::Database` handle and is shared through the
//! DI context; repositories obtain typed collections from it and return
//! raw driver errors. [`map_store_error`] is the single place where those
//! driver errors are pattern-matched into the [`AppError`] taxonomy —
//! services apply it once per operation instead of re-deriving the
//! classification at every call site.

mod criteria;
mod pagination;

pub use criteria::{add_condition, contains_ci};
pub use pagination::{Page, Populate};

use std::str::FromStr;

use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::MongoConfig;
use crate::error::AppError;
use crate::models::Category;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Server error code for a document failing collection validation.
const DOCUMENT_VALIDATION_CODE: i32 = 121;

/// Handle to the document store.
///
/// Cheap to clone through `Arc` in the context; the driver's `Client`
/// maintains the underlying connection pool.
pub struct Store {
    db: Database,
}

impl Store {
    /// Creates a store over an already-selected database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connects to MongoDB and selects the configured database.
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.uri).await?;
        Ok(Self::new(client.database(&config.database)))
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Returns a typed collection handle.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Checks whether a document with the given `_id` exists in a collection.
    pub async fn id_exists(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<bool, mongodb::error::Error> {
        let found = self
            .db
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id })
            .projection(doc! { "_id": 1 })
            .await?;
        Ok(found.is_some())
    }

    /// Creates the indexes the service relies on.
    ///
    /// Idempotent: re-creating an existing index is a no-op on the server.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection::<Category>(Category::COLLECTION)
            .create_index(index)
            .await?;
        Ok(())
    }
}

/// Sort direction for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    /// The value MongoDB expects in a `$sort` stage.
    pub fn sort_value(self) -> i32 {
        match self {
            Order::Asc => 1,
            Order::Desc => -1,
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc => write!(f, "asc"),
            Order::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" | "1" => Ok(Order::Asc),
            "desc" | "descending" | "-1" => Ok(Order::Desc),
            _ => Err(format!(
                "Invalid order '{}'. Valid values: asc, desc",
                s
            )),
        }
    }
}

/// Parses a caller-supplied identifier into an `ObjectId`.
pub fn parse_object_id(value: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value)
        .map_err(|_| AppError::InvalidId(format!("{} is not a valid ObjectId", value)))
}

/// Translates a driver error into the application taxonomy.
///
/// Duplicate key violations become [`AppError::AlreadyExists`] naming the
/// conflicting field(s); document validation failures become
/// [`AppError::Invalid`]; everything else collapses to
/// [`AppError::Unprocessable`] with the operation's fallback message.
pub fn map_store_error(err: mongodb::error::Error, entity: &str, fallback: &str) -> AppError {
    tracing::error!(error = %err, "store operation failed");

    if let Some((code, message, details)) = write_failure(&err) {
        if code == DUPLICATE_KEY_CODE {
            let message = match duplicate_key_fields(details, message) {
                Some(fields) => format!("{} with {} already exists", entity, fields),
                None => format!("{} already exists", entity),
            };
            return AppError::AlreadyExists(message);
        }
        if code == DOCUMENT_VALIDATION_CODE {
            return AppError::Invalid(message.to_string());
        }
    }

    AppError::Unprocessable(fallback.to_string())
}

/// Extracts the server error code, message, and details from the shapes
/// a write can fail with.
fn write_failure(err: &mongodb::error::Error) -> Option<(i32, &str, Option<&Document>)> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => {
            Some((we.code, we.message.as_str(), we.details.as_ref()))
        }
        ErrorKind::Write(WriteFailure::WriteConcernError(wce)) => {
            Some((wce.code, wce.message.as_str(), None))
        }
        ErrorKind::Command(ce) => Some((ce.code, ce.message.as_str(), None)),
        _ => None,
    }
}

/// Names the fields of a violated unique index.
///
/// Prefers the structured `keyPattern` when the server provides one,
/// otherwise falls back to the `dup key: { name: ... }` message shape.
/// Multiple fields are joined with " and ".
fn duplicate_key_fields(details: Option<&Document>, message: &str) -> Option<String> {
    if let Some(pattern) = details.and_then(|d| d.get_document("keyPattern").ok()) {
        let fields: Vec<&str> = pattern.keys().map(String::as_str).collect();
        if !fields.is_empty() {
            return Some(fields.join(" and "));
        }
    }

    let (_, rest) = message.split_once("dup key: {")?;
    let (body, _) = rest.split_once('}')?;
    let fields: Vec<&str> = body
        .split(',')
        .filter_map(|pair| pair.split(':').next())
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    (!fields.is_empty()).then(|| fields.join(" and "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_valid() {
        let id = parse_object_id("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_object_id_malformed() {
        let err = parse_object_id("not-an-id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid ID: not-an-id is not a valid ObjectId"
        );
    }

    #[test]
    fn test_duplicate_fields_from_key_pattern() {
        let details = doc! { "keyPattern": { "name": 1 } };
        assert_eq!(
            duplicate_key_fields(Some(&details), "").as_deref(),
            Some("name")
        );
    }

    #[test]
    fn test_duplicate_fields_from_compound_key_pattern() {
        let details = doc! { "keyPattern": { "name": 1, "owner": 1 } };
        assert_eq!(
            duplicate_key_fields(Some(&details), "").as_deref(),
            Some("name and owner")
        );
    }

    #[test]
    fn test_duplicate_fields_from_message() {
        let message = "E11000 duplicate key error collection: rubric.categories \
                       index: name_1 dup key: { name: \"books\" }";
        assert_eq!(duplicate_key_fields(None, message).as_deref(), Some("name"));
    }

    #[test]
    fn test_duplicate_fields_unrecognized_shape() {
        assert_eq!(duplicate_key_fields(None, "duplicate key"), None);
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Asc);
        assert_eq!("descending".parse::<Order>().unwrap(), Order::Desc);
        assert!("sideways".parse::<Order>().is_err());
    }

    #[test]
    fn test_order_sort_values() {
        assert_eq!(Order::Asc.sort_value(), 1);
        assert_eq!(Order::Desc.sort_value(), -1);
    }
}
