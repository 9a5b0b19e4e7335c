//! HTTP backend for the BabelNet REST API.
//!
//! The sole component that issues outbound calls. One `reqwest::Client`
//! with a fixed per-request timeout is shared across sequential calls; the
//! API key rides along as a `key` query parameter on every request, and
//! multi-value filters are sent as repeated parameters (the API
//! OR-matches repeated values).

use crate::backend::{LookupBackend, LookupError, LookupResult};
use crate::types::{Edge, Sense, Synset, SynsetRef};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://babelnet.io/v9";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// BabelNet HTTP API backend.
///
/// # Example
///
/// ```rust,ignore
/// use babelnet_core::{HttpBackend, LookupBackend};
///
/// let backend = HttpBackend::new("your-api-key");
/// let refs = backend.search_synsets("bank", &["EN".into()], &[], &[]).await?;
/// ```
pub struct HttpBackend {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend against the public API endpoint.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a backend against a custom endpoint.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The endpoint this backend talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> LookupResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} ({} params)", path, params.len());

        let response = self
            .client
            .get(&url)
            .query(&params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LookupError::Connection(format!("cannot connect to {url}"))
                } else if e.is_timeout() {
                    LookupError::Timeout(REQUEST_TIMEOUT_SECS)
                } else {
                    LookupError::Api(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LookupError::AuthenticationFailed);
            }

            if status.as_u16() == 429 {
                return Err(LookupError::QuotaExhausted);
            }

            return Err(LookupError::Api(format!(
                "BabelNet API error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))
    }

    fn search_params(
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("lemma", lemma.to_string())];
        for lang in search_langs {
            params.push(("searchLang", lang.clone()));
        }
        for lang in target_langs {
            params.push(("targetLang", lang.clone()));
        }
        for pos in poses {
            params.push(("pos", pos.clone()));
        }
        params
    }
}

#[async_trait]
impl LookupBackend for HttpBackend {
    async fn version(&self) -> LookupResult<Value> {
        self.get("getVersion", Vec::new()).await
    }

    async fn search_synsets(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<SynsetRef>> {
        let params = Self::search_params(lemma, search_langs, target_langs, poses);
        self.get("getSynsetIds", params).await
    }

    async fn search_senses(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<Sense>> {
        let params = Self::search_params(lemma, search_langs, target_langs, poses);
        self.get("getSenses", params).await
    }

    async fn fetch_synset(&self, id: &str) -> LookupResult<Synset> {
        self.get("getSynset", vec![("id", id.to_string())]).await
    }

    async fn outgoing_edges(&self, id: &str, pointer: Option<&str>) -> LookupResult<Vec<Edge>> {
        let mut params = vec![("id", id.to_string())];
        if let Some(pointer) = pointer {
            params.push(("pointer", pointer.to_string()));
        }
        self.get("getOutgoingEdges", params).await
    }
}
