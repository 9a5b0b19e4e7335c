//! BabelNet MCP Server — Model Context Protocol interface for the
//! BabelNet multilingual semantic network.
//!
//! Provides five tools:
//! - `get_definitions`: glosses for every meaning of a word, with the
//!   representative sense per meaning
//! - `get_senses`: the individual lexical senses of a word
//! - `get_synsets`: the synsets (concepts) a word participates in
//! - `get_synset_by_id`: one synset's full record, verbatim
//! - `get_related_synsets`: relation edges from a synset, by category
//!
//! Every billed call spends one unit of the API key's daily request quota,
//! so tool handlers issue exactly the remote calls a query needs.

pub mod config;
pub mod tools;
