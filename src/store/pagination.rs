//! Generic paginated queries with reference expansion.
//!
//! [`Store::paginate`] runs an aggregation pipeline: `$match` on the
//! caller's criteria, one `$lookup`/`$unwind` pair per [`Populate`] spec,
//! then `$sort`, `$skip`, `$limit`. The total count is taken against the
//! same criteria so page metadata reflects the full result set, not the
//! returned slice.

use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, Document};
use serde::{de::DeserializeOwned, Serialize};

use super::{Order, Store};

/// Expansion of a reference field into a projected embedded document.
#[derive(Debug, Clone)]
pub struct Populate {
    /// Field on the queried collection holding the referenced `_id`.
    pub field: &'static str,
    /// Collection the reference points into.
    pub from: &'static str,
    /// Fields to keep from the referenced document.
    pub projection: Document,
}

/// One page of a listing plus its metadata.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching documents across all pages.
    pub total: u64,
    /// 1-based page number implied by `skip` and `per_page`.
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, total: u64, skip: u64, limit: u64) -> Self {
        if limit == 0 {
            return Self {
                items,
                total,
                page: 1,
                per_page: 0,
                total_pages: 0,
            };
        }
        Self {
            items,
            total,
            page: skip / limit + 1,
            per_page: limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

impl Store {
    /// Fetches one page of a collection.
    ///
    /// `T` is the deserialized shape of the pipeline output — with
    /// populated reference fields where `populate` specs are given.
    pub async fn paginate<T>(
        &self,
        collection: &str,
        skip: u64,
        limit: u64,
        sort_by: &str,
        order: Order,
        populate: &[Populate],
        criteria: Document,
    ) -> Result<Page<T>, mongodb::error::Error>
    where
        T: DeserializeOwned,
    {
        let coll = self.collection::<Document>(collection);
        let total = coll.count_documents(criteria.clone()).await?;

        // `$limit: 0` is rejected by the server; an empty page needs no query.
        if limit == 0 {
            return Ok(Page::new(Vec::new(), total, skip, limit));
        }

        let mut pipeline = vec![doc! { "$match": criteria }];
        for spec in populate {
            pipeline.push(doc! {
                "$lookup": {
                    "from": spec.from,
                    "localField": spec.field,
                    "foreignField": "_id",
                    "as": spec.field,
                    "pipeline": [ { "$project": spec.projection.clone() } ],
                }
            });
            pipeline.push(doc! {
                "$unwind": {
                    "path": format!("${}", spec.field),
                    "preserveNullAndEmptyArrays": true,
                }
            });
        }

        let mut sort = Document::new();
        sort.insert(sort_by, order.sort_value());
        pipeline.push(doc! { "$sort": sort });
        pipeline.push(doc! { "$skip": skip as i64 });
        pipeline.push(doc! { "$limit": limit as i64 });

        let mut cursor = coll.aggregate(pipeline).await?;
        let mut items = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            items.push(from_document(document).map_err(mongodb::error::Error::from)?);
        }

        Ok(Page::new(items, total, skip, limit))
    }
}
