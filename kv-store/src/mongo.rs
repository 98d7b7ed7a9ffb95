//! # Mongo Repository
//!
//! Grounded in `original_source/core/repository/{StringCacheRepository,
//! ListCacheRepository,DictionaryCacheRepository}.go`: one collection per
//! shard per shape, insert-new/update-changed/delete-absent on every
//! save, `key` as the natural id.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use kv_engine::{CacheEntryData, SnapshotRepository};
use mongodb::{Client, Collection};
use tracing::info;

/// A snapshot entry that knows how to turn itself into (and back from) a
/// MongoDB document. Implemented for each shape's `CacheShape::SnapshotEntry`
/// tuple type below.
pub trait DbEntry: Sized + Send + Sync + 'static {
    fn key(&self) -> &str;
    fn meta(&self) -> &CacheEntryData;
    /// Full document written on first insert.
    fn to_document(&self) -> Document;
    /// Fields written on an in-place update (everything but `key`/`added`).
    fn update_fields(&self) -> Document;
    fn from_document(doc: Document) -> anyhow::Result<Self>;
}

impl DbEntry for (String, String, CacheEntryData) {
    fn key(&self) -> &str {
        &self.0
    }
    fn meta(&self) -> &CacheEntryData {
        &self.2
    }
    fn to_document(&self) -> Document {
        doc! {
            "key": &self.0,
            "value": &self.1,
            "expireAfter": self.2.expire_after,
            "added": self.2.added,
            "updated": self.2.updated,
        }
    }
    fn update_fields(&self) -> Document {
        doc! { "value": &self.1, "updated": self.2.updated }
    }
    fn from_document(doc: Document) -> anyhow::Result<Self> {
        let key = doc.get_str("key")?.to_string();
        let value = doc.get_str("value")?.to_string();
        let meta = meta_from_document(&doc)?;
        Ok((key, value, meta))
    }
}

impl DbEntry for (String, Vec<String>, CacheEntryData) {
    fn key(&self) -> &str {
        &self.0
    }
    fn meta(&self) -> &CacheEntryData {
        &self.2
    }
    fn to_document(&self) -> Document {
        doc! {
            "key": &self.0,
            "values": self.1.clone(),
            "expireAfter": self.2.expire_after,
            "added": self.2.added,
            "updated": self.2.updated,
        }
    }
    fn update_fields(&self) -> Document {
        doc! { "values": self.1.clone(), "updated": self.2.updated }
    }
    fn from_document(doc: Document) -> anyhow::Result<Self> {
        let key = doc.get_str("key")?.to_string();
        let values = doc
            .get_array("values")?
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();
        let meta = meta_from_document(&doc)?;
        Ok((key, values, meta))
    }
}

impl DbEntry for (String, Vec<(String, String)>, CacheEntryData) {
    fn key(&self) -> &str {
        &self.0
    }
    fn meta(&self) -> &CacheEntryData {
        &self.2
    }
    fn to_document(&self) -> Document {
        let values: Vec<Document> = self
            .1
            .iter()
            .map(|(k, v)| doc! { "key": k, "value": v })
            .collect();
        doc! {
            "key": &self.0,
            "values": values,
            "expireAfter": self.2.expire_after,
            "added": self.2.added,
            "updated": self.2.updated,
        }
    }
    fn update_fields(&self) -> Document {
        let values: Vec<Document> = self
            .1
            .iter()
            .map(|(k, v)| doc! { "key": k, "value": v })
            .collect();
        doc! { "values": values, "updated": self.2.updated }
    }
    fn from_document(doc: Document) -> anyhow::Result<Self> {
        let key = doc.get_str("key")?.to_string();
        let values = doc
            .get_array("values")?
            .iter()
            .filter_map(|item| item.as_document())
            .filter_map(|sub| {
                let k = sub.get_str("key").ok()?.to_string();
                let v = sub.get_str("value").ok()?.to_string();
                Some((k, v))
            })
            .collect();
        let meta = meta_from_document(&doc)?;
        Ok((key, values, meta))
    }
}

fn meta_from_document(doc: &Document) -> anyhow::Result<CacheEntryData> {
    Ok(CacheEntryData {
        added: doc.get_i64("added")?,
        updated: doc.get_i64("updated")?,
        expire_after: doc.get_i64("expireAfter")?,
        // Anything loaded from durable storage is, by definition, already
        // persisted — this flag only ever toggles false→true across a
        // restart, never the other way.
        persisted: true,
    })
}

/// One shape's durable store: `shard_index` maps onto its own collection
/// named `"{cluster}.{shape}{shard_index}"`, matching the original's
/// `DBName`/`ColName` convention.
pub struct MongoRepository {
    client: Client,
    database: String,
    shape: &'static str,
}

impl MongoRepository {
    pub async fn connect(uri: &str, database: &str, shape: &'static str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(MongoRepository {
            client,
            database: database.to_string(),
            shape,
        })
    }

    fn collection(&self, shard_index: usize) -> Collection<Document> {
        let name = format!("{}{}", self.shape, shard_index);
        self.client.database(&self.database).collection(&name)
    }
}

#[async_trait]
impl<E: DbEntry> SnapshotRepository<E> for MongoRepository {
    async fn load_all(&self, shard_index: usize) -> anyhow::Result<Vec<E>> {
        let collection = self.collection(shard_index);
        let mut cursor = collection.find(doc! {}, None).await?;
        let mut result = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            result.push(E::from_document(document)?);
        }
        if !result.is_empty() {
            info!(
                shard = shard_index,
                shape = self.shape,
                count = result.len(),
                "restored snapshot from MongoDB"
            );
        }
        Ok(result)
    }

    async fn save_all(&self, shard_index: usize, entries: Vec<E>) -> anyhow::Result<()> {
        let collection = self.collection(shard_index);
        let mut existing_keys = Vec::with_capacity(entries.len());

        for entry in &entries {
            existing_keys.push(entry.key().to_string());
            if !entry.meta().persisted {
                collection.insert_one(entry.to_document(), None).await?;
            } else if entry.meta().updated > entry.meta().added {
                collection
                    .update_one(
                        doc! { "key": entry.key() },
                        doc! { "$set": entry.update_fields() },
                        None,
                    )
                    .await?;
            }
        }

        collection
            .delete_many(doc! { "key": { "$nin": existing_keys } }, None)
            .await?;

        info!(
            shard = shard_index,
            shape = self.shape,
            count = entries.len(),
            "persisted snapshot to MongoDB"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_entry_document_roundtrip() {
        let meta = CacheEntryData {
            added: 100,
            updated: 105,
            expire_after: 0,
            persisted: false,
        };
        let entry = ("k".to_string(), "v".to_string(), meta);
        let restored: (String, String, CacheEntryData) =
            DbEntry::from_document(entry.to_document()).unwrap();
        assert_eq!(restored.0, "k");
        assert_eq!(restored.1, "v");
        assert_eq!(restored.2.added, 100);
        assert_eq!(restored.2.updated, 105);
        assert!(restored.2.persisted);
    }

    #[test]
    fn dictionary_entry_document_roundtrip() {
        let meta = CacheEntryData {
            added: 100,
            updated: 100,
            expire_after: 0,
            persisted: false,
        };
        let entry = (
            "D".to_string(),
            vec![("a".to_string(), "1".to_string())],
            meta,
        );
        let restored: (String, Vec<(String, String)>, CacheEntryData) =
            DbEntry::from_document(entry.to_document()).unwrap();
        assert_eq!(restored.1, vec![("a".to_string(), "1".to_string())]);
    }
}
