//! Firestore REST client implementing [`DocumentStore`].
//!
//! Documents live at
//! `projects/{project}/databases/(default)/documents/{collection}/{key}`.
//! Firestore's wire format wraps every field in a typed value object
//! (`{"stringValue": ...}`), so this module carries a bidirectional
//! mapping between plain `serde_json::Value` documents and Firestore
//! fields.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::{DocumentStore, StoreError};

const DEFAULT_API_BASE: &str = "https://firestore.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Firestore-backed document store.
#[derive(Debug)]
pub struct FirestoreStore {
    project_id: String,
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

impl FirestoreStore {
    /// Create a store for the given project, authenticated by API key.
    pub fn new(project_id: String, api_key: String) -> Self {
        Self::with_api_base(project_id, api_key, DEFAULT_API_BASE.to_string())
    }

    /// Create a store pointed at a non-default base URL (tests/emulator).
    pub fn with_api_base(project_id: String, api_key: String, api_base: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            project_id,
            api_key,
            api_base,
            client,
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.api_base, self.project_id
        )
    }

    fn doc_url(&self, collection: &str, key: &str) -> String {
        format!(
            "{}/{}/{}?key={}",
            self.documents_root(),
            collection,
            key,
            self.api_key
        )
    }

    fn classify_status(status: u16, body: String) -> StoreError {
        match status {
            401 | 403 => StoreError::PermissionDenied(body),
            429 | 500..=599 => StoreError::Unavailable(body),
            _ => StoreError::Other(format!("HTTP {status}: {body}")),
        }
    }

    fn classify_transport(e: reqwest::Error) -> StoreError {
        if e.is_timeout() || e.is_connect() {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Other(e.to_string())
        }
    }
}

/// Plain JSON value -> Firestore typed value.
fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore serializes integers as strings
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": to_firestore_fields(fields) } }),
    }
}

fn to_firestore_fields(fields: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    for (k, v) in fields {
        out.insert(k.clone(), to_firestore_value(v));
    }
    Value::Object(out)
}

/// Firestore typed value -> plain JSON value.
fn from_firestore_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = obj.get("stringValue").and_then(|v| v.as_str()) {
        return Value::String(s.to_string());
    }
    if let Some(b) = obj.get("booleanValue").and_then(|v| v.as_bool()) {
        return Value::Bool(b);
    }
    if let Some(i) = obj.get("integerValue") {
        // Arrives as a string; fall back to a raw number if not
        let parsed = i
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| i.as_i64());
        if let Some(n) = parsed {
            return json!(n);
        }
    }
    if let Some(d) = obj.get("doubleValue").and_then(|v| v.as_f64()) {
        return json!(d);
    }
    if let Some(ts) = obj.get("timestampValue").and_then(|v| v.as_str()) {
        return Value::String(ts.to_string());
    }
    if let Some(arr) = obj.get("arrayValue") {
        let values = arr
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(from_firestore_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = obj.get("mapValue") {
        return from_firestore_fields(map.get("fields"));
    }

    Value::Null
}

fn from_firestore_fields(fields: Option<&Value>) -> Value {
    let mut out = Map::new();
    if let Some(fields) = fields.and_then(|f| f.as_object()) {
        for (k, v) in fields {
            out.insert(k.clone(), from_firestore_value(v));
        }
    }
    Value::Object(out)
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.doc_url(collection, key))
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status().as_u16();
        if status == 404 {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(Self::classify_transport)?;

        if status != 200 {
            return Err(Self::classify_status(status, body));
        }

        let document: Value =
            serde_json::from_str(&body).map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(Some(from_firestore_fields(document.get("fields"))))
    }

    async fn set(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        let fields = match &document {
            Value::Object(fields) => to_firestore_fields(fields),
            _ => {
                return Err(StoreError::Other(
                    "Only JSON objects can be stored as documents".to_string(),
                ))
            }
        };

        let response = self
            .client
            .patch(self.doc_url(collection, key))
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.doc_url(collection, key))
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status().as_u16();
        // Deleting a missing document is fine at this layer
        if status == 200 || status == 404 {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::classify_status(status, body))
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        order_by_desc: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut structured_query = json!({
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": to_firestore_value(value)
                }
            }
        });

        if let Some(order_field) = order_by_desc {
            structured_query["orderBy"] = json!([
                { "field": { "fieldPath": order_field }, "direction": "DESCENDING" }
            ]);
        }

        let url = format!("{}:runQuery?key={}", self.documents_root(), self.api_key);
        let response = self
            .client
            .post(url)
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(Self::classify_transport)?;

        if status != 200 {
            return Err(Self::classify_status(status, body));
        }

        let results: Vec<Value> =
            serde_json::from_str(&body).map_err(|e| StoreError::Other(e.to_string()))?;

        Ok(results
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(|doc| from_firestore_fields(doc.get("fields")))
            .collect())
    }
}
