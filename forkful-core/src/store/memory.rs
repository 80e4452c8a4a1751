//! In-memory document store for tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::{DocumentStore, StoreError};

/// HashMap-backed fake implementing [`DocumentStore`].
///
/// Collections map keys to documents; queries scan. Good enough for the
/// typed layers' tests, with no network or credentials involved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap()
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

/// Ordering for the `order_by_desc` scan: strings and numbers compare
/// within their own type, everything else ties.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    async fn set(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::Other(
                "Only JSON objects can be stored as documents".to_string(),
            ));
        }
        self.collections
            .write()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        if let Some(c) = self.collections.write().unwrap().get_mut(collection) {
            c.remove(key);
        }
        Ok(())
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        order_by_desc: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut matches: Vec<Value> = self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order_field) = order_by_desc {
            matches.sort_by(|a, b| compare_field(b.get(order_field), a.get(order_field)));
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryStore::new();
        store
            .set("prefs", "u1", json!({"theme": "dark"}))
            .await
            .unwrap();

        let doc = store.get("prefs", "u1").await.unwrap().unwrap();
        assert_eq!(doc["theme"], "dark");

        store.delete("prefs", "u1").await.unwrap();
        assert!(store.get("prefs", "u1").await.unwrap().is_none());
        // Idempotent
        store.delete("prefs", "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_query_eq_with_ordering() {
        let store = MemoryStore::new();
        for (key, owner, at) in [
            ("a", "u1", "2025-01-01T00:00:00Z"),
            ("b", "u2", "2025-01-02T00:00:00Z"),
            ("c", "u1", "2025-01-03T00:00:00Z"),
        ] {
            store
                .set("docs", key, json!({"userId": owner, "createdAt": at}))
                .await
                .unwrap();
        }

        let docs = store
            .query_eq("docs", "userId", &json!("u1"), Some("createdAt"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["createdAt"], "2025-01-03T00:00:00Z");
    }
}
