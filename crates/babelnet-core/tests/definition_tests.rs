//! Definitions aggregator tests: quota spend, truncation, and
//! partial-failure tolerance against a scripted backend.

use babelnet_core::backend::MockBackend;
use babelnet_core::query::{self, DefinitionsRequest, SynsetsRequest};
use babelnet_core::types::{Gloss, Lemma, Sense, SenseProperties, Synset, SynsetRef};

fn glossed_synset(language: &str, text: &str) -> Synset {
    Synset {
        glosses: vec![Gloss {
            language: language.to_string(),
            gloss: text.to_string(),
            source: "WIKI".to_string(),
            ..Default::default()
        }],
        senses: vec![Sense {
            properties: SenseProperties {
                language: language.to_string(),
                lemma: Lemma {
                    lemma: text.split(' ').next().unwrap_or_default().to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn refs(ids: &[&str]) -> Vec<SynsetRef> {
    ids.iter().map(|id| SynsetRef::new(*id, "NOUN")).collect()
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
async fn truncation_happens_before_fan_out() {
    // 5 candidates, cap of 2: exactly one search plus two fetches
    let backend = MockBackend::new()
        .with_synset_refs(refs(&["bn:1", "bn:2", "bn:3", "bn:4", "bn:5"]))
        .with_synset("bn:1", glossed_synset("EN", "riverside land"))
        .with_synset("bn:2", glossed_synset("EN", "financial institution"));

    let resp = query::get_definitions(&backend, &request("bank", 2))
        .await
        .unwrap();

    let counts = backend.counts();
    assert_eq!(counts.synset_searches, 1);
    assert_eq!(counts.synset_fetches, 2, "no fetch beyond the cap");
    assert!(resp.total_meanings <= 2);
    assert_eq!(resp.total_meanings, resp.definitions.len());
}

#[tokio::test]
async fn empty_search_yields_empty_success() {
    let backend = MockBackend::new();

    let resp = query::get_definitions(&backend, &request("qwxzy", 20))
        .await
        .unwrap();

    assert_eq!(resp.total_meanings, 0);
    assert!(resp.definitions.is_empty());
    assert_eq!(backend.counts().synset_fetches, 0, "nothing to fetch");
}

#[tokio::test]
async fn search_failure_propagates() {
    let backend = MockBackend::new().with_failing_search();
    let result = query::get_definitions(&backend, &request("bank", 20)).await;
    assert!(result.is_err(), "no candidates means no partial result");
}

#[tokio::test]
async fn one_failing_fetch_does_not_abort_the_batch() {
    let backend = MockBackend::new()
        .with_synset_refs(refs(&["bn:1", "bn:2", "bn:3"]))
        .with_synset("bn:1", glossed_synset("EN", "riverside land"))
        .with_failing_synset("bn:2")
        .with_synset("bn:3", glossed_synset("EN", "financial institution"));

    let resp = query::get_definitions(&backend, &request("bank", 20))
        .await
        .unwrap();

    assert_eq!(backend.counts().synset_fetches, 3, "all candidates attempted");
    assert_eq!(resp.total_meanings, 2, "count reflects successes only");
    let ids: Vec<_> = resp.definitions.iter().map(|d| d.synset_id.as_str()).collect();
    assert_eq!(ids, vec!["bn:1", "bn:3"], "remote order preserved");
}

#[tokio::test]
async fn candidate_without_id_is_skipped_without_a_fetch() {
    let mut candidates = refs(&["bn:1"]);
    candidates.insert(0, SynsetRef::new("", "NOUN"));

    let backend = MockBackend::new()
        .with_synset_refs(candidates)
        .with_synset("bn:1", glossed_synset("EN", "riverside land"));

    let resp = query::get_definitions(&backend, &request("bank", 20))
        .await
        .unwrap();

    assert_eq!(backend.counts().synset_fetches, 1, "no fetch for a missing id");
    assert_eq!(resp.total_meanings, 1);
}

#[tokio::test]
async fn glossless_synset_contributes_nothing() {
    let backend = MockBackend::new()
        .with_synset_refs(refs(&["bn:1", "bn:2"]))
        .with_synset("bn:1", Synset::default())
        .with_synset("bn:2", glossed_synset("EN", "financial institution"));

    let resp = query::get_definitions(&backend, &request("bank", 20))
        .await
        .unwrap();

    assert_eq!(resp.total_meanings, 1);
    assert_eq!(resp.definitions[0].synset_id, "bn:2");
}

#[tokio::test]
async fn gloss_fields_default_to_empty_strings() {
    // A gloss missing language and source still comes through
    let synset = Synset {
        glosses: vec![Gloss {
            gloss: "a raised ridge".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };
    let backend = MockBackend::new()
        .with_synset_refs(refs(&["bn:1"]))
        .with_synset("bn:1", synset);

    let resp = query::get_definitions(&backend, &request("bank", 20))
        .await
        .unwrap();

    let entry = &resp.definitions[0].glosses[0];
    assert_eq!(entry.definition, "a raised ridge");
    assert_eq!(entry.language, "");
    assert_eq!(entry.source, "");
}

#[tokio::test]
async fn main_sense_falls_back_to_query_word() {
    let synset = Synset {
        glosses: vec![Gloss {
            language: "IT".to_string(),
            gloss: "istituto di credito".to_string(),
            ..Default::default()
        }],
        senses: vec![Sense {
            properties: SenseProperties {
                language: "IT".to_string(),
                lemma: Lemma {
                    lemma: "banca".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }],
        ..Default::default()
    };
    let backend = MockBackend::new()
        .with_synset_refs(refs(&["bn:1"]))
        .with_synset("bn:1", synset);

    let resp = query::get_definitions(&backend, &request("bank", 20))
        .await
        .unwrap();

    assert_eq!(resp.definitions[0].main_sense, "bank");
}

#[tokio::test]
async fn synset_search_is_issued_exactly_once() {
    let backend = MockBackend::new().with_synset_refs(refs(&["bn:1", "bn:2"]));
    let req = SynsetsRequest {
        word: "bank".to_string(),
        from_langs: vec!["en".to_string()],
        to_langs: None,
        pos: None,
    };

    let resp = query::get_synsets(&backend, &req).await.unwrap();

    assert_eq!(backend.counts().synset_searches, 1, "one billed call, not two");
    assert_eq!(resp.total_synsets, 2);
}
