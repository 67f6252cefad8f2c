//! Filter criteria helpers.

use mongodb::bson::{doc, Bson, Document};

/// Adds a condition to a filter document, skipping absent conditions.
///
/// Mirrors how route-level query parameters flow in: an unset parameter
/// leaves the criteria untouched rather than matching against null.
pub fn add_condition(mut criteria: Document, field: &str, condition: Option<Bson>) -> Document {
    if let Some(condition) = condition {
        criteria.insert(field, condition);
    }
    criteria
}

/// Case-insensitive substring condition for a string field.
///
/// The needle is escaped so user input is matched literally, never as a
/// regular expression.
pub fn contains_ci(needle: &str) -> Bson {
    Bson::Document(doc! { "$regex": regex::escape(needle), "$options": "i" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_condition_absent() {
        let criteria = add_condition(Document::new(), "name", None);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_add_condition_present() {
        let criteria = add_condition(Document::new(), "name", Some(Bson::String("x".into())));
        assert_eq!(criteria.get_str("name").unwrap(), "x");
    }

    #[test]
    fn test_add_condition_preserves_existing() {
        let base = doc! { "is_deleted": false };
        let criteria = add_condition(base, "name", Some(contains_ci("foo")));
        assert!(criteria.contains_key("is_deleted"));
        assert!(criteria.contains_key("name"));
    }

    #[test]
    fn test_contains_ci_shape() {
        let Bson::Document(condition) = contains_ci("foo") else {
            panic!("expected a document condition");
        };
        assert_eq!(condition.get_str("$regex").unwrap(), "foo");
        assert_eq!(condition.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_contains_ci_escapes_metacharacters() {
        let Bson::Document(condition) = contains_ci("c++") else {
            panic!("expected a document condition");
        };
        assert_eq!(condition.get_str("$regex").unwrap(), "c\\+\\+");
    }
}
