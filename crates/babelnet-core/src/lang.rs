//! Language, part-of-speech, and relation tag normalization.
//!
//! The BabelNet HTTP API speaks an uppercase tag vocabulary (`EN`, `NOUN`,
//! `HYPERNYM`) while tools accept friendlier lowercase codes. Unknown
//! language codes pass through uppercased, so languages missing from the
//! static table still reach the API; unknown part-of-speech or relation
//! names map to `None`, which callers treat as "no filter" rather than an
//! error (the remote vocabulary may exceed the local table).

/// Language code to uppercase language tag, as expected by the HTTP API.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "EN"),
    ("it", "IT"),
    ("es", "ES"),
    ("fr", "FR"),
    ("de", "DE"),
    ("pt", "PT"),
    ("zh", "ZH"),
    ("ja", "JA"),
    ("ru", "RU"),
    ("ar", "AR"),
    ("nl", "NL"),
    ("pl", "PL"),
    ("sv", "SV"),
    ("tr", "TR"),
    ("ko", "KO"),
];

/// Part-of-speech name to API POS tag.
const POS_TAGS: &[(&str, &str)] = &[
    ("noun", "NOUN"),
    ("verb", "VERB"),
    ("adjective", "ADJECTIVE"),
    ("adverb", "ADVERB"),
];

/// Relation category to the tag matched against `pointer.relationGroup`
/// (or `pointer.name` for antonymy, which has no group of its own).
const RELATIONS: &[(&str, &str)] = &[
    ("hypernym", "HYPERNYM"),
    ("hyponym", "HYPONYM"),
    ("meronym", "MERONYM"),
    ("holonym", "HOLONYM"),
    ("antonym", "ANTONYM"),
];

/// Map a language code to its API tag.
///
/// Codes not in the table are uppercased and passed through verbatim.
pub fn normalize_language(code: &str) -> String {
    let lower = code.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(short, _)| *short == lower)
        .map(|(_, tag)| (*tag).to_string())
        .unwrap_or_else(|| code.to_ascii_uppercase())
}

/// Map a list of language codes to API tags.
pub fn normalize_languages(codes: &[String]) -> Vec<String> {
    codes.iter().map(|c| normalize_language(c)).collect()
}

/// Map a part-of-speech name to its API tag, or `None` if unrecognized.
pub fn normalize_pos(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    POS_TAGS
        .iter()
        .find(|(short, _)| *short == lower)
        .map(|(_, tag)| *tag)
}

/// Map a relation category to its filter tag.
///
/// `"all"` and unrecognized names both yield `None` (no filter).
pub fn normalize_relation(name: &str) -> Option<&'static str> {
    let lower = name.to_ascii_lowercase();
    RELATIONS
        .iter()
        .find(|(short, _)| *short == lower)
        .map(|(_, tag)| *tag)
}
