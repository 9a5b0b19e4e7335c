//! Typed records for BabelNet API responses.
//!
//! Remote payloads are loosely shaped, so every field the query layer reads
//! carries a default: a missing field deserializes to an empty value and
//! never aborts the request. Fields this crate does not model are kept in
//! the flattened `extra` map and survive re-serialization, which keeps the
//! verbatim pass-through tools honest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry from a synset-ID search: an opaque synset identifier plus the
/// part of speech the API attached to it.
///
/// An empty `id` means the entry carries no usable identifier; the
/// aggregation layer skips such entries instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynsetRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub pos: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SynsetRef {
    /// Build a reference from an identifier and POS tag.
    pub fn new(id: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pos: pos.into(),
            extra: Map::new(),
        }
    }
}

/// A definition attached to a synset, possibly one of several languages
/// and provenance sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gloss {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub gloss: String,
    #[serde(default)]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical surface form of a sense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lemma {
    #[serde(default)]
    pub lemma: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Properties of one sense. Only `language` and `lemma` are read by the
/// query layer; the rest rides along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenseProperties {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub lemma: Lemma,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One lexical realization of a synset, passed through to callers largely
/// unmodified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub properties: SenseProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full synset record from a single-synset fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Synset {
    #[serde(default)]
    pub glosses: Vec<Gloss>,
    #[serde(default)]
    pub senses: Vec<Sense>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed pointer metadata on a relation edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgePointer {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "relationGroup")]
    pub relation_group: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One outgoing relation edge from a synset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub pointer: EdgePointer,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
