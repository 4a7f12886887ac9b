use serde::Deserialize;
use serde_json::Value;

use crate::core::{
    CaptureCandidate,
    PagedResult,
    VocabularyItem,
};

/// One entry of the similar-spellings response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarSpelling {
    pub spelling: String,
    pub definition: Option<String>,
}

impl SimilarSpelling {
    pub fn new(spelling: impl Into<String>, definition: Option<&str>) -> Self {
        Self {
            spelling: spelling.into(),
            definition: definition.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string),
        }
    }
}

// Responses are shaped leniently: anything that does not look like the
// expected collection turns into an empty one.

fn parse_list<T: for<'de> Deserialize<'de>>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|list| list.iter().filter_map(|v| T::deserialize(v).ok()).collect())
        .unwrap_or_default()
}

pub fn item_list(value: &Value) -> Vec<VocabularyItem> {
    parse_list(value)
}

/// Search answers with either a bare array or `{ items: [...] }`.
pub fn search_results(value: &Value) -> Vec<VocabularyItem> {
    match value {
        Value::Array(_) => parse_list(value),
        Value::Object(map) => map.get("items").map(parse_list).unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn paged_result(value: &Value) -> PagedResult {
    let items: Vec<VocabularyItem> = value.get("items").map(parse_list).unwrap_or_default();
    let total_count = value
        .get("totalCount")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(items.len());
    PagedResult { items, total_count }
}

pub fn capture_candidates(value: &Value) -> Vec<CaptureCandidate> {
    parse_list(value)
}

pub fn similar_spellings(value: &Value) -> Vec<SimilarSpelling> {
    let Some(list) = value.as_array() else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(SimilarSpelling::new(s.trim(), None)),
            Value::Object(map) => {
                let spelling = map
                    .get("spelling")
                    .and_then(Value::as_str)
                    .or_else(|| map.get("word").and_then(Value::as_str))
                    .map(str::trim)?;
                Some(SimilarSpelling::new(
                    spelling,
                    map.get("definition").and_then(Value::as_str),
                ))
            }
            _ => None,
        })
        .filter(|s| !s.spelling.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn malformed_shapes_become_empty() {
        assert!(item_list(&json!({ "items": [] })).is_empty());
        assert!(item_list(&json!(null)).is_empty());
        assert!(search_results(&json!("oops")).is_empty());
        assert!(capture_candidates(&json!(42)).is_empty());
        assert_eq!(paged_result(&json!([])), PagedResult::default());
    }

    #[test]
    fn search_accepts_array_or_items_object() {
        let bare = search_results(&json!([{ "spelling": "a" }, { "spelling": "b" }]));
        let wrapped = search_results(&json!({ "items": [{ "spelling": "a" }] }));
        assert_eq!(bare.len(), 2);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].spelling, "a");
    }

    #[test]
    fn paged_result_reads_total_count() {
        let page = paged_result(&json!({
            "items": [{ "id": 1, "spelling": "a" }, { "id": 2, "spelling": "b" }],
            "totalCount": 23
        }));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 23);
    }

    #[test]
    fn similar_spellings_accept_strings_and_objects() {
        let parsed = similar_spellings(&json!([
            " affect ",
            { "spelling": "effect", "definition": " a result " },
            { "word": "afflict", "definition": "" },
            { "definition": "no spelling" },
            "   ",
            7
        ]));

        assert_eq!(
            parsed,
            vec![
                SimilarSpelling::new("affect", None),
                SimilarSpelling::new("effect", Some("a result")),
                SimilarSpelling::new("afflict", None),
            ]
        );
    }
}
