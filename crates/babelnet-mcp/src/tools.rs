//! MCP tool definitions for BabelNet lookups.
//!
//! Wraps the `babelnet_core::query` functions as MCP tools accessible via
//! the rmcp protocol. Every tool except `get_version`-backed startup
//! validation bills the key's daily request quota; the definitions tool
//! bills one unit per retrieved synset on top of the search itself.

use babelnet_core::backend::LookupBackend;
use babelnet_core::query::{
    self, DefinitionsRequest, RelationsRequest, SensesRequest, SynsetsRequest,
};
use rmcp::{
    handler::server::router::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars, tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

type McpError = rmcp::model::ErrorData;

/// MCP tool router for BabelNet operations.
#[derive(Clone)]
pub struct BabelNetTools {
    tool_router: ToolRouter<BabelNetTools>,
    backend: Arc<dyn LookupBackend>,
}

impl std::fmt::Debug for BabelNetTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BabelNetTools").finish()
    }
}

// === Tool parameter types (JSON Schema via schemars) ===

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DefinitionsParams {
    /// The word to get definitions for.
    pub word: String,
    /// Source languages to search in, e.g. ["en", "it"] (default: ["en"]).
    pub from_langs: Option<Vec<String>>,
    /// Part-of-speech filter: "noun", "verb", "adjective", or "adverb".
    pub pos: Option<String>,
    /// Maximum number of meanings to retrieve (default: 20).
    pub max_definitions: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SensesParams {
    /// The word to search for.
    pub word: String,
    /// Source languages to search in (default: ["en"]).
    pub from_langs: Option<Vec<String>>,
    /// Part-of-speech filter: "noun", "verb", "adjective", or "adverb".
    pub pos: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SynsetsParams {
    /// The word to search for.
    pub word: String,
    /// Source languages to search in (default: ["en"]).
    pub from_langs: Option<Vec<String>>,
    /// Target languages for translations.
    pub to_langs: Option<Vec<String>>,
    /// Part-of-speech filter: "noun", "verb", "adjective", or "adverb".
    pub pos: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SynsetByIdParams {
    /// BabelNet synset ID, e.g. "bn:00000356n".
    pub synset_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RelationsParams {
    /// BabelNet synset ID to start from, e.g. "bn:00008364n".
    pub synset_id: String,
    /// Relation category: "hypernym", "hyponym", "meronym", "holonym",
    /// "antonym", or "all" (default: all).
    pub relation: Option<String>,
}

fn internal_error(context: &str, e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(format!("{context}: {e}")),
        data: None,
    }
}

#[tool_router]
impl BabelNetTools {
    pub fn new(backend: Arc<dyn LookupBackend>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            backend,
        }
    }

    /// Retrieve all synsets for a word, fetch each retained one, and
    /// extract its definitions.
    #[tool(
        name = "get_definitions",
        description = "Get definitions (glosses) for a word across all of its meanings, with the representative sense per meaning. Consumes 1 Babelcoin for the search plus 1 per retrieved synset (daily limit: 1000)."
    )]
    async fn get_definitions(
        &self,
        params: Parameters<DefinitionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let req = DefinitionsRequest {
            word: params.word,
            from_langs: params.from_langs.unwrap_or_else(|| vec!["en".to_string()]),
            pos: params.pos,
            max_definitions: params.max_definitions.unwrap_or(20),
        };

        let resp = query::get_definitions(self.backend.as_ref(), &req)
            .await
            .map_err(|e| internal_error("Definition lookup failed", e))?;

        let json = serde_json::to_string_pretty(&resp).unwrap_or_default();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Retrieve all senses of a word. Each sense is one lexical
    /// realization of the word in a synset.
    #[tool(
        name = "get_senses",
        description = "Retrieve all senses of a word. Each sense represents a specific usage of the word in a synset. Consumes 1 Babelcoin."
    )]
    async fn get_senses(
        &self,
        params: Parameters<SensesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let req = SensesRequest {
            word: params.word,
            from_langs: params.from_langs.unwrap_or_else(|| vec!["en".to_string()]),
            pos: params.pos,
        };

        let resp = query::get_senses(self.backend.as_ref(), &req)
            .await
            .map_err(|e| internal_error("Sense lookup failed", e))?;

        let json = serde_json::to_string_pretty(&resp).unwrap_or_default();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Retrieve all synsets (concepts) for a word in one or more languages.
    #[tool(
        name = "get_synsets",
        description = "Retrieve all synsets (concepts) for a word in one or more languages, optionally with translations into target languages. Consumes 1 Babelcoin."
    )]
    async fn get_synsets(
        &self,
        params: Parameters<SynsetsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let req = SynsetsRequest {
            word: params.word,
            from_langs: params.from_langs.unwrap_or_else(|| vec!["en".to_string()]),
            to_langs: params.to_langs,
            pos: params.pos,
        };

        let resp = query::get_synsets(self.backend.as_ref(), &req)
            .await
            .map_err(|e| internal_error("Synset lookup failed", e))?;

        let json = serde_json::to_string_pretty(&resp).unwrap_or_default();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Retrieve a specific synset by its BabelNet ID, returned verbatim.
    #[tool(
        name = "get_synset_by_id",
        description = "Retrieve a specific synset by its BabelNet ID (e.g. 'bn:00000356n') with complete details. Consumes 1 Babelcoin."
    )]
    async fn get_synset_by_id(
        &self,
        params: Parameters<SynsetByIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let synset = query::get_synset_by_id(self.backend.as_ref(), &params.synset_id)
            .await
            .map_err(|e| internal_error("Synset fetch failed", e))?;

        let json = serde_json::to_string_pretty(&synset).unwrap_or_default();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Enumerate synsets related to one synset, optionally restricted to a
    /// relation category.
    #[tool(
        name = "get_related_synsets",
        description = "List synsets related to a synset, optionally filtered by category: 'hypernym', 'hyponym', 'meronym', 'holonym', 'antonym', or 'all'. Consumes 1 Babelcoin."
    )]
    async fn get_related_synsets(
        &self,
        params: Parameters<RelationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let req = RelationsRequest {
            synset_id: params.synset_id,
            relation: params.relation,
        };

        let resp = query::get_related_synsets(self.backend.as_ref(), &req)
            .await
            .map_err(|e| internal_error("Relation lookup failed", e))?;

        let json = serde_json::to_string_pretty(&resp).unwrap_or_default();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for BabelNetTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "babelnet".into(),
                title: Some("BabelNet Semantic Network".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                description: Some(
                    "Multilingual word senses, concepts, and definitions from BabelNet".into(),
                ),
                icons: None,
                website_url: Some("https://babelnet.org".into()),
            },
            instructions: Some(
                "BabelNet multilingual semantic network. Use get_definitions for word \
                 meanings with glosses, get_senses and get_synsets to enumerate senses \
                 and concepts, get_synset_by_id for full concept details, and \
                 get_related_synsets to walk relations. Every query spends the API \
                 key's daily request quota."
                    .into(),
            ),
        }
    }
}
