//! # BabelNet Core
//!
//! Typed client and query layer for the BabelNet HTTP API: multilingual
//! synset, sense, and definition lookups against a metered remote service.
//!
//! The crate splits into:
//!
//! - [`lang`]: user-facing code → API tag normalization
//! - [`types`]: typed records with defined-default field extraction
//! - [`backend`]: the [`LookupBackend`] trait, errors, and a scripted mock
//! - [`http`]: the reqwest implementation against `babelnet.io`
//! - [`query`]: request/response envelopes and the per-tool orchestration,
//!   including the fan-out definitions aggregator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use babelnet_core::{HttpBackend, query, query::DefinitionsRequest};
//!
//! let backend = HttpBackend::new("your-api-key");
//! let resp = query::get_definitions(&backend, &DefinitionsRequest {
//!     word: "bank".into(),
//!     from_langs: vec!["en".into()],
//!     pos: None,
//!     max_definitions: 5,
//! }).await?;
//! ```

pub mod backend;
pub mod http;
pub mod lang;
pub mod query;
pub mod types;

pub use backend::{LookupBackend, LookupError, LookupResult, MockBackend};
pub use http::HttpBackend;
pub use types::{Edge, Gloss, Sense, Synset, SynsetRef};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::backend::{LookupBackend, LookupError, LookupResult};
    pub use crate::http::HttpBackend;
    pub use crate::types::{Edge, Gloss, Sense, Synset, SynsetRef};
}
