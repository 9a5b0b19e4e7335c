//! Lookup backend trait and error types.
//!
//! Every backend call except [`LookupBackend::version`] bills one unit of
//! the key's daily request quota ("Babelcoin"), so callers must issue
//! exactly the calls a query needs and nothing more. The trait performs no
//! retries and no interpretation of failures; deciding whether to abort or
//! continue is the caller's job.

use crate::types::{Edge, Sense, Synset, SynsetRef};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by lookup backends.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("API error: {0}")]
    Api(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("daily request quota exhausted")]
    QuotaExhausted,
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// A connection to the BabelNet lookup service.
///
/// Language and POS arguments are already-normalized uppercase tags (see
/// [`crate::lang`]); an empty slice means "no filter".
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Service version. Doubles as a credential liveness check and is the
    /// one call that does not bill against the quota.
    async fn version(&self) -> LookupResult<Value>;

    /// Enumerate the synsets a lemma participates in.
    async fn search_synsets(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<SynsetRef>>;

    /// Enumerate the individual senses of a lemma.
    async fn search_senses(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<Sense>>;

    /// Fetch the full record of a single synset.
    async fn fetch_synset(&self, id: &str) -> LookupResult<Synset>;

    /// Enumerate outgoing relation edges from a synset, optionally
    /// restricted server-side to one pointer name.
    async fn outgoing_edges(&self, id: &str, pointer: Option<&str>) -> LookupResult<Vec<Edge>>;
}

/// Number of calls a [`MockBackend`] has served, by operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounts {
    pub version: usize,
    pub synset_searches: usize,
    pub sense_searches: usize,
    pub synset_fetches: usize,
    pub edge_fetches: usize,
}

/// Parameters of one recorded search call.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub lemma: String,
    pub search_langs: Vec<String>,
    pub target_langs: Vec<String>,
    pub poses: Vec<String>,
}

/// A scripted backend for tests.
///
/// Returns canned payloads, can be told to fail specific operations, and
/// counts every call so tests can assert exactly how much quota a query
/// would spend.
#[derive(Default)]
pub struct MockBackend {
    synset_refs: Vec<SynsetRef>,
    synsets: HashMap<String, Synset>,
    senses: Vec<Sense>,
    edges: Vec<Edge>,
    failing_synsets: HashSet<String>,
    fail_search: bool,
    counts: Mutex<CallCounts>,
    searches: Mutex<Vec<RecordedSearch>>,
}

impl MockBackend {
    /// Create an empty mock: every search returns nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the references returned by synset searches.
    pub fn with_synset_refs(mut self, refs: Vec<SynsetRef>) -> Self {
        self.synset_refs = refs;
        self
    }

    /// Set the record returned when fetching `id`.
    pub fn with_synset(mut self, id: &str, synset: Synset) -> Self {
        self.synsets.insert(id.to_string(), synset);
        self
    }

    /// Set the senses returned by sense searches.
    pub fn with_senses(mut self, senses: Vec<Sense>) -> Self {
        self.senses = senses;
        self
    }

    /// Set the edges returned by edge enumeration.
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    /// Make fetches of `id` fail with a transport error.
    pub fn with_failing_synset(mut self, id: &str) -> Self {
        self.failing_synsets.insert(id.to_string());
        self
    }

    /// Make every search call fail with a transport error.
    pub fn with_failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    /// Calls served so far.
    pub fn counts(&self) -> CallCounts {
        *self.counts.lock().unwrap()
    }

    /// Parameters of every search call served so far.
    pub fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.lock().unwrap().clone()
    }

    fn record_search(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) {
        self.searches.lock().unwrap().push(RecordedSearch {
            lemma: lemma.to_string(),
            search_langs: search_langs.to_vec(),
            target_langs: target_langs.to_vec(),
            poses: poses.to_vec(),
        });
    }
}

#[async_trait]
impl LookupBackend for MockBackend {
    async fn version(&self) -> LookupResult<Value> {
        self.counts.lock().unwrap().version += 1;
        Ok(serde_json::json!({"version": "V5_3"}))
    }

    async fn search_synsets(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<SynsetRef>> {
        self.counts.lock().unwrap().synset_searches += 1;
        self.record_search(lemma, search_langs, target_langs, poses);
        if self.fail_search {
            return Err(LookupError::Connection("mock search failure".to_string()));
        }
        Ok(self.synset_refs.clone())
    }

    async fn search_senses(
        &self,
        lemma: &str,
        search_langs: &[String],
        target_langs: &[String],
        poses: &[String],
    ) -> LookupResult<Vec<Sense>> {
        self.counts.lock().unwrap().sense_searches += 1;
        self.record_search(lemma, search_langs, target_langs, poses);
        if self.fail_search {
            return Err(LookupError::Connection("mock search failure".to_string()));
        }
        Ok(self.senses.clone())
    }

    async fn fetch_synset(&self, id: &str) -> LookupResult<Synset> {
        self.counts.lock().unwrap().synset_fetches += 1;
        if self.failing_synsets.contains(id) {
            return Err(LookupError::Api(format!("mock fetch failure for {id}")));
        }
        self.synsets
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::Api(format!("unknown synset {id}")))
    }

    async fn outgoing_edges(&self, _id: &str, _pointer: Option<&str>) -> LookupResult<Vec<Edge>> {
        self.counts.lock().unwrap().edge_fetches += 1;
        Ok(self.edges.clone())
    }
}
