//! Query orchestration over a lookup backend.
//!
//! Serializable request/response types plus the function behind each tool.
//! `get_definitions` is the only operation with real control flow: it turns
//! one logical query into a candidate search followed by per-candidate
//! detail fetches, tolerating item-level failures so a single bad synset
//! never wastes the quota already spent on its siblings. Everything else is
//! a single remote call reshaped into a stable envelope.
//!
//! All operations use serializable request/response types compatible with
//! MCP or any other transport layer.

use crate::backend::{LookupBackend, LookupResult};
use crate::lang;
use crate::types::{Sense, Synset, SynsetRef};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

fn default_langs() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_max_definitions() -> usize {
    20
}

/// Resolve an optional user-facing POS name into API filter tags.
/// Unrecognized names mean "no filter", never an error.
fn pos_filter(pos: Option<&str>) -> Vec<String> {
    pos.and_then(lang::normalize_pos)
        .map(|tag| vec![tag.to_string()])
        .unwrap_or_default()
}

// === get_definitions ===

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionsRequest {
    pub word: String,
    #[serde(default = "default_langs")]
    pub from_langs: Vec<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default = "default_max_definitions")]
    pub max_definitions: usize,
}

/// A normalized definition. Fields are always present, possibly empty.
#[derive(Debug, Clone, Serialize)]
pub struct GlossEntry {
    pub language: String,
    pub definition: String,
    pub source: String,
}

/// One meaning of the queried word: a synset with its definitions.
#[derive(Debug, Clone, Serialize)]
pub struct Meaning {
    pub synset_id: String,
    pub pos: String,
    pub main_sense: String,
    pub glosses: Vec<GlossEntry>,
}

#[derive(Debug, Serialize)]
pub struct DefinitionsResponse {
    pub word: String,
    pub from_languages: Vec<String>,
    pub pos: Option<String>,
    pub total_meanings: usize,
    pub definitions: Vec<Meaning>,
}

/// Get definitions (glosses) for a word across all its meanings.
///
/// One candidate search, then at most `max_definitions` detail fetches in
/// the order the API returned the candidates. The search failing fails the
/// whole query; a single candidate failing is logged and skipped. An empty
/// result list is a valid success.
pub async fn get_definitions(
    backend: &dyn LookupBackend,
    req: &DefinitionsRequest,
) -> LookupResult<DefinitionsResponse> {
    info!(
        "definitions query for '{}' (langs: {:?}, pos: {:?})",
        req.word, req.from_langs, req.pos
    );

    let search_langs = lang::normalize_languages(&req.from_langs);
    let poses = pos_filter(req.pos.as_deref());

    let refs = backend
        .search_synsets(&req.word, &search_langs, &[], &poses)
        .await?;
    info!("found {} synsets for '{}'", refs.len(), req.word);

    // Truncate before any detail fetch; every fetch is billed.
    let retained = &refs[..refs.len().min(req.max_definitions)];
    if retained.len() < refs.len() {
        debug!(
            "limited to {} synsets out of {}",
            retained.len(),
            refs.len()
        );
    }

    let mut definitions: Vec<Meaning> = Vec::new();

    for (idx, item) in retained.iter().enumerate() {
        if item.id.is_empty() {
            warn!("skipping synset without id at position {}", idx + 1);
            continue;
        }

        debug!("fetching synset {}/{}: {}", idx + 1, retained.len(), item.id);
        let synset = match backend.fetch_synset(&item.id).await {
            Ok(synset) => synset,
            Err(e) => {
                warn!("failed to load synset {}: {}", item.id, e);
                continue;
            }
        };

        if synset.glosses.is_empty() {
            debug!("no glosses for synset {}", item.id);
            continue;
        }

        let glosses = synset
            .glosses
            .iter()
            .map(|g| GlossEntry {
                language: g.language.clone(),
                definition: g.gloss.clone(),
                source: g.source.clone(),
            })
            .collect();

        definitions.push(Meaning {
            synset_id: item.id.clone(),
            pos: item.pos.clone(),
            main_sense: main_sense(&synset, &search_langs, &req.word),
            glosses,
        });
    }

    info!(
        "retrieved {} definitions for '{}'",
        definitions.len(),
        req.word
    );

    Ok(DefinitionsResponse {
        word: req.word.clone(),
        from_languages: req.from_langs.clone(),
        pos: req.pos.clone(),
        total_meanings: definitions.len(),
        definitions,
    })
}

/// Representative lemma for a synset: the first sense whose language
/// matches one of the requested tags decides; a match with an empty lemma,
/// or no match at all, falls back to the query word verbatim.
fn main_sense(synset: &Synset, search_langs: &[String], word: &str) -> String {
    for sense in &synset.senses {
        let language = &sense.properties.language;
        if search_langs
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(language))
        {
            let lemma = &sense.properties.lemma.lemma;
            if lemma.is_empty() {
                return word.to_string();
            }
            return lemma.clone();
        }
    }
    word.to_string()
}

// === get_senses ===

#[derive(Debug, Clone, Deserialize)]
pub struct SensesRequest {
    pub word: String,
    #[serde(default = "default_langs")]
    pub from_langs: Vec<String>,
    #[serde(default)]
    pub pos: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SensesResponse {
    pub word: String,
    pub from_languages: Vec<String>,
    pub pos: Option<String>,
    pub senses: Vec<Sense>,
}

/// Retrieve all senses of a word: one search call, no fan-out.
pub async fn get_senses(
    backend: &dyn LookupBackend,
    req: &SensesRequest,
) -> LookupResult<SensesResponse> {
    let search_langs = lang::normalize_languages(&req.from_langs);
    let poses = pos_filter(req.pos.as_deref());

    let senses = backend
        .search_senses(&req.word, &search_langs, &[], &poses)
        .await?;

    Ok(SensesResponse {
        word: req.word.clone(),
        from_languages: req.from_langs.clone(),
        pos: req.pos.clone(),
        senses,
    })
}

// === get_synsets ===

#[derive(Debug, Clone, Deserialize)]
pub struct SynsetsRequest {
    pub word: String,
    #[serde(default = "default_langs")]
    pub from_langs: Vec<String>,
    #[serde(default)]
    pub to_langs: Option<Vec<String>>,
    #[serde(default)]
    pub pos: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SynsetsResponse {
    pub word: String,
    pub from_languages: Vec<String>,
    pub to_languages: Option<Vec<String>>,
    pub pos: Option<String>,
    pub total_synsets: usize,
    pub synsets: Vec<SynsetRef>,
}

/// Retrieve all synsets for a word: one search call, untruncated.
pub async fn get_synsets(
    backend: &dyn LookupBackend,
    req: &SynsetsRequest,
) -> LookupResult<SynsetsResponse> {
    let search_langs = lang::normalize_languages(&req.from_langs);
    let target_langs = req
        .to_langs
        .as_deref()
        .map(lang::normalize_languages)
        .unwrap_or_default();
    let poses = pos_filter(req.pos.as_deref());

    let synsets = backend
        .search_synsets(&req.word, &search_langs, &target_langs, &poses)
        .await?;

    Ok(SynsetsResponse {
        word: req.word.clone(),
        from_languages: req.from_langs.clone(),
        to_languages: req.to_langs.clone(),
        pos: req.pos.clone(),
        total_synsets: synsets.len(),
        synsets,
    })
}

// === get_synset_by_id ===

/// Retrieve one synset by identifier, returned without reshaping.
pub async fn get_synset_by_id(backend: &dyn LookupBackend, id: &str) -> LookupResult<Synset> {
    backend.fetch_synset(id).await
}

// === get_related_synsets ===

#[derive(Debug, Clone, Deserialize)]
pub struct RelationsRequest {
    pub synset_id: String,
    #[serde(default)]
    pub relation: Option<String>,
}

/// One relation edge, reduced to the fields callers act on.
#[derive(Debug, Clone, Serialize)]
pub struct RelationEntry {
    pub target: String,
    pub relation: String,
    pub relation_group: String,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct RelationsResponse {
    pub synset_id: String,
    pub relation: Option<String>,
    pub total_relations: usize,
    pub relations: Vec<RelationEntry>,
}

/// Enumerate synsets related to one synset, optionally restricted to a
/// relation category.
///
/// Edges are fetched in one call and filtered here: the category tag is
/// matched against the edge's relation group, falling back to the pointer
/// name for relations (like antonymy) that have no group. `"all"` and
/// unrecognized categories disable the filter.
pub async fn get_related_synsets(
    backend: &dyn LookupBackend,
    req: &RelationsRequest,
) -> LookupResult<RelationsResponse> {
    let filter = req
        .relation
        .as_deref()
        .and_then(lang::normalize_relation);

    let edges = backend.outgoing_edges(&req.synset_id, None).await?;
    debug!("{} edges for synset {}", edges.len(), req.synset_id);

    let relations: Vec<RelationEntry> = edges
        .iter()
        .filter(|edge| match filter {
            None => true,
            Some(tag) => {
                edge.pointer.relation_group.eq_ignore_ascii_case(tag)
                    || edge.pointer.name.eq_ignore_ascii_case(tag)
            }
        })
        .map(|edge| RelationEntry {
            target: edge.target.clone(),
            relation: edge.pointer.name.clone(),
            relation_group: edge.pointer.relation_group.clone(),
            language: edge.language.clone(),
        })
        .collect();

    Ok(RelationsResponse {
        synset_id: req.synset_id.clone(),
        relation: req.relation.clone(),
        total_relations: relations.len(),
        relations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::types::{Edge, EdgePointer, Gloss, Lemma, SenseProperties};

    fn synset_with(glosses: Vec<Gloss>, senses: Vec<Sense>) -> Synset {
        Synset {
            glosses,
            senses,
            ..Default::default()
        }
    }

    fn gloss(language: &str, text: &str, source: &str) -> Gloss {
        Gloss {
            language: language.to_string(),
            gloss: text.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }

    fn sense(language: &str, lemma: &str) -> Sense {
        Sense {
            properties: SenseProperties {
                language: language.to_string(),
                lemma: Lemma {
                    lemma: lemma.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn request(word: &str, max: usize) -> DefinitionsRequest {
        DefinitionsRequest {
            word: word.to_string(),
            from_langs: vec!["en".to_string()],
            pos: None,
            max_definitions: max,
        }
    }

    #[tokio::test]
    async fn main_sense_prefers_matching_language() {
        let synset = synset_with(
            vec![gloss("EN", "a financial institution", "WN")],
            vec![sense("IT", "banca"), sense("EN", "bank building")],
        );
        assert_eq!(
            main_sense(&synset, &["EN".to_string()], "bank"),
            "bank building"
        );
    }

    #[tokio::test]
    async fn main_sense_falls_back_to_query_word() {
        let synset = synset_with(
            vec![gloss("IT", "istituto di credito", "WN")],
            vec![sense("IT", "banca")],
        );
        assert_eq!(main_sense(&synset, &["EN".to_string()], "bank"), "bank");
    }

    #[tokio::test]
    async fn empty_lemma_on_matching_sense_falls_back() {
        let synset = synset_with(vec![gloss("EN", "g", "WN")], vec![sense("EN", "")]);
        assert_eq!(main_sense(&synset, &["EN".to_string()], "bank"), "bank");
    }

    #[tokio::test]
    async fn definitions_candidate_pos_wins_over_detail() {
        // The entry's POS comes from the search result, not the fetched record
        let backend = MockBackend::new()
            .with_synset_refs(vec![SynsetRef::new("bn:1", "NOUN")])
            .with_synset("bn:1", synset_with(vec![gloss("EN", "g", "WN")], vec![]));

        let resp = get_definitions(&backend, &request("bank", 20)).await.unwrap();
        assert_eq!(resp.definitions[0].pos, "NOUN");
    }

    #[tokio::test]
    async fn unknown_pos_filter_is_dropped() {
        let backend = MockBackend::new();
        let mut req = request("bank", 20);
        req.pos = Some("gerund".to_string());

        let _ = get_definitions(&backend, &req).await.unwrap();
        let recorded = backend.recorded_searches();
        assert!(recorded[0].poses.is_empty(), "unknown pos must mean no filter");
    }

    #[tokio::test]
    async fn known_pos_filter_is_normalized() {
        let backend = MockBackend::new();
        let mut req = request("bank", 20);
        req.pos = Some("Noun".to_string());

        let _ = get_definitions(&backend, &req).await.unwrap();
        assert_eq!(backend.recorded_searches()[0].poses, vec!["NOUN"]);
    }

    #[tokio::test]
    async fn senses_envelope_echoes_query() {
        let backend = MockBackend::new().with_senses(vec![sense("EN", "bank")]);
        let req = SensesRequest {
            word: "bank".to_string(),
            from_langs: vec!["en".to_string()],
            pos: None,
        };

        let resp = get_senses(&backend, &req).await.unwrap();
        assert_eq!(resp.word, "bank");
        assert_eq!(resp.from_languages, vec!["en"]);
        assert_eq!(resp.senses.len(), 1);
    }

    #[tokio::test]
    async fn synsets_count_matches_list() {
        let backend = MockBackend::new().with_synset_refs(vec![
            SynsetRef::new("bn:1", "NOUN"),
            SynsetRef::new("bn:2", "VERB"),
        ]);
        let req = SynsetsRequest {
            word: "bank".to_string(),
            from_langs: vec!["en".to_string()],
            to_langs: Some(vec!["it".to_string()]),
            pos: None,
        };

        let resp = get_synsets(&backend, &req).await.unwrap();
        assert_eq!(resp.total_synsets, 2);
        assert_eq!(resp.total_synsets, resp.synsets.len());
        assert_eq!(backend.recorded_searches()[0].target_langs, vec!["IT"]);
    }

    fn edge(target: &str, name: &str, group: &str) -> Edge {
        Edge {
            target: target.to_string(),
            language: "MUL".to_string(),
            pointer: EdgePointer {
                name: name.to_string(),
                relation_group: group.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn relations_filter_by_group() {
        let backend = MockBackend::new().with_edges(vec![
            edge("bn:10", "is-a", "HYPERNYM"),
            edge("bn:11", "part-of", "MERONYM"),
        ]);
        let req = RelationsRequest {
            synset_id: "bn:1".to_string(),
            relation: Some("hypernym".to_string()),
        };

        let resp = get_related_synsets(&backend, &req).await.unwrap();
        assert_eq!(resp.total_relations, 1);
        assert_eq!(resp.relations[0].target, "bn:10");
    }

    #[tokio::test]
    async fn relations_all_and_unknown_disable_filter() {
        let edges = vec![
            edge("bn:10", "is-a", "HYPERNYM"),
            edge("bn:11", "part-of", "MERONYM"),
        ];

        for filter in ["all", "sibling"] {
            let backend = MockBackend::new().with_edges(edges.clone());
            let req = RelationsRequest {
                synset_id: "bn:1".to_string(),
                relation: Some(filter.to_string()),
            };
            let resp = get_related_synsets(&backend, &req).await.unwrap();
            assert_eq!(resp.total_relations, 2, "filter {filter:?} must pass all edges");
        }
    }

    #[tokio::test]
    async fn relations_match_pointer_name_for_ungrouped() {
        let backend = MockBackend::new().with_edges(vec![
            edge("bn:12", "antonym", ""),
            edge("bn:13", "is-a", "HYPERNYM"),
        ]);
        let req = RelationsRequest {
            synset_id: "bn:1".to_string(),
            relation: Some("antonym".to_string()),
        };

        let resp = get_related_synsets(&backend, &req).await.unwrap();
        assert_eq!(resp.total_relations, 1);
        assert_eq!(resp.relations[0].target, "bn:12");
    }

    #[test]
    fn requests_deserialize_with_defaults() {
        let req: DefinitionsRequest = serde_json::from_str(r#"{"word": "bank"}"#).unwrap();
        assert_eq!(req.from_langs, vec!["en"]);
        assert_eq!(req.max_definitions, 20);
        assert!(req.pos.is_none());

        let req: SynsetsRequest = serde_json::from_str(r#"{"word": "bank"}"#).unwrap();
        assert!(req.to_langs.is_none());
    }
}
