//! Firestore REST client module
//!
//! A thin client for the Firestore REST API (v1). It covers exactly the
//! operations the repositories need: equality queries, document get,
//! create, upsert, masked field update, and delete.
//!
//! Authentication uses a service account key; when no key path is
//! configured the client sends unauthenticated requests, which is how the
//! tests drive it against a mock server (and how a Firestore emulator would
//! be addressed).

use crate::auth::get_datastore_auth_token;
use crate::value::{Document, Value};
use habitly_common::http::default_client;
use habitly_config::FirebaseConfig;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Errors that can occur when interacting with the Firestore REST API
#[derive(Error, Debug)]
pub enum FirestoreError {
    /// Error during authentication with Google
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to the Firestore API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firestore API
    #[error("Firestore API error: {0}")]
    ApiError(String),

    /// A response that could not be decoded into the expected shape
    #[error("Malformed document: {0}")]
    DecodeError(String),
}

/// One streamed result row of a `runQuery` response. Rows carrying only a
/// `readTime` (no document) are skipped.
#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<Document>,
}

/// Client for the Firestore REST API.
pub struct FirestoreClient {
    client: Client,
    config: FirebaseConfig,
    base_url: String,
}

impl FirestoreClient {
    /// Creates a client against the production Firestore endpoint.
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_base_url(config, FIRESTORE_BASE_URL.to_string())
    }

    /// Creates a client against a custom endpoint (mock server, emulator).
    pub fn with_base_url(config: FirebaseConfig, base_url: String) -> Self {
        Self {
            client: default_client().unwrap_or_else(|_| Client::new()),
            config,
            base_url,
        }
    }

    /// `projects/{project}/databases/(default)/documents`
    fn documents_root(&self) -> Result<String, FirestoreError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FirestoreError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;
        Ok(format!(
            "projects/{}/databases/(default)/documents",
            project_id
        ))
    }

    fn document_url(&self, path: &str) -> Result<String, FirestoreError> {
        Ok(format!("{}/{}/{}", self.base_url, self.documents_root()?, path))
    }

    /// Adds the bearer token when a key is configured, then sends.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FirestoreError> {
        let request = if self.config.key_path.is_some() {
            let token = get_datastore_auth_token(&self.config)
                .await
                .map_err(|e| FirestoreError::AuthError(e.to_string()))?;
            request.header(header::AUTHORIZATION, format!("Bearer {}", token))
        } else {
            request
        };
        Ok(request.send().await?)
    }

    async fn fail_from(&self, response: reqwest::Response) -> FirestoreError {
        let status = response.status();
        match response.text().await {
            Ok(body) => FirestoreError::ApiError(format!("{}: {}", status, body)),
            Err(err) => FirestoreError::RequestError(err),
        }
    }

    /// Runs an equality query over one collection.
    ///
    /// Multiple filters are combined with AND. Returns the matching
    /// documents in server order.
    pub async fn run_query(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<Document>, FirestoreError> {
        let url = format!("{}/{}:runQuery", self.base_url, self.documents_root()?);

        let field_filters: Vec<serde_json::Value> = filters
            .iter()
            .map(|(field, value)| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": value,
                    }
                })
            })
            .collect();

        let where_clause = match field_filters.len() {
            0 => serde_json::Value::Null,
            1 => field_filters.into_iter().next().unwrap_or_default(),
            _ => json!({ "compositeFilter": { "op": "AND", "filters": field_filters } }),
        };

        let mut structured_query = json!({ "from": [{ "collectionId": collection }] });
        if !where_clause.is_null() {
            structured_query["where"] = where_clause;
        }

        let response = self
            .send(
                self.client
                    .post(&url)
                    .json(&json!({ "structuredQuery": structured_query })),
            )
            .await?;

        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        let rows: Vec<QueryRow> = response.json().await?;
        Ok(rows.into_iter().filter_map(|row| row.document).collect())
    }

    /// Fetches one document by `collection/id` path. `Ok(None)` when the
    /// document does not exist.
    pub async fn get_document(&self, path: &str) -> Result<Option<Document>, FirestoreError> {
        let url = self.document_url(path)?;
        let response = self.send(self.client.get(&url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(Some(response.json().await?))
    }

    /// Creates a document with a server-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Document, FirestoreError> {
        let url = self.document_url(collection)?;
        let response = self
            .send(self.client.post(&url).json(&json!({ "fields": fields })))
            .await?;

        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Creates or fully overwrites the document at `collection/doc_id`.
    pub async fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
    ) -> Result<Document, FirestoreError> {
        let url = self.document_url(&format!("{}/{}", collection, doc_id))?;
        let response = self
            .send(self.client.patch(&url).json(&json!({ "fields": fields })))
            .await?;

        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Updates only the masked fields of an existing document.
    pub async fn update_fields(
        &self,
        path: &str,
        fields: HashMap<String, Value>,
        mask: &[&str],
    ) -> Result<Document, FirestoreError> {
        let url = self.document_url(path)?;
        let mask_params: Vec<(&str, &str)> = mask
            .iter()
            .map(|field| ("updateMask.fieldPaths", *field))
            .collect();

        let response = self
            .send(
                self.client
                    .patch(&url)
                    .query(&mask_params)
                    .json(&json!({ "fields": fields })),
            )
            .await?;

        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(response.json().await?)
    }

    /// Unconditionally deletes the document at `collection/id`. Deleting a
    /// document that is already gone is not an error.
    pub async fn delete_document(&self, path: &str) -> Result<(), FirestoreError> {
        let url = self.document_url(path)?;
        let response = self.send(self.client.delete(&url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(self.fail_from(response).await);
        }

        Ok(())
    }
}
