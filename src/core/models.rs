use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptResult {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAIL")]
    Fail,
}

impl AttemptResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptResult::Success => "SUCCESS",
            AttemptResult::Fail => "FAIL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => Some(AttemptResult::Success),
            "FAIL" => Some(AttemptResult::Fail),
            _ => None,
        }
    }
}

/// A word as the backend stores it.
///
/// Fields the client does not know about are kept in `extra` so that a
/// session save sends back everything it received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spelling: String,
    #[serde(default)]
    pub stem: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub need_test: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub attempt: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub success_total: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub fail_total: u32,
    #[serde(default, deserialize_with = "lenient_result")]
    pub last_result: Option<AttemptResult>,
    #[serde(default)]
    pub last_attempt: Option<String>,
    #[serde(default)]
    pub last_correct: Option<String>,
    #[serde(default)]
    pub last_fail: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub updated_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VocabularyItem {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self { spelling: spelling.into(), ..Default::default() }
    }

    pub fn with_success(&self, now: &str) -> Self {
        Self {
            attempt: self.attempt.saturating_add(1),
            success_total: self.success_total.saturating_add(1),
            last_result: Some(AttemptResult::Success),
            last_attempt: Some(now.to_string()),
            last_correct: Some(now.to_string()),
            ..self.clone()
        }
    }

    pub fn with_failure(&self, now: &str) -> Self {
        Self {
            attempt: self.attempt.saturating_add(1),
            fail_total: self.fail_total.saturating_add(1),
            last_result: Some(AttemptResult::Fail),
            last_attempt: Some(now.to_string()),
            last_fail: Some(now.to_string()),
            ..self.clone()
        }
    }

    pub fn definition_text(&self) -> Option<&str> {
        non_blank(self.definition.as_deref())
    }
}

/// Body for `POST /Vocabularies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabulary {
    pub spelling: String,
    pub stem: String,
    pub definition: String,
    pub need_test: String,
    pub example: String,
    pub pronunciation: String,
}

impl Default for NewVocabulary {
    fn default() -> Self {
        Self {
            spelling: String::new(),
            stem: String::new(),
            definition: String::new(),
            need_test: "s".to_string(),
            example: String::new(),
            pronunciation: String::new(),
        }
    }
}

impl NewVocabulary {
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.spelling.trim().is_empty() {
            Some("Spelling is required.")
        } else if self.definition.trim().is_empty() {
            Some("Definition is required.")
        } else {
            None
        }
    }
}

/// A word suggested by the capture endpoint, editable before upsert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureCandidate {
    #[serde(default)]
    pub add: bool,
    #[serde(default = "default_true", deserialize_with = "lenient_flag")]
    pub need_test: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spelling: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pronunciation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stem: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub definition: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub example: String,
}

impl Default for CaptureCandidate {
    fn default() -> Self {
        Self {
            add: false,
            need_test: true,
            spelling: String::new(),
            pronunciation: String::new(),
            stem: String::new(),
            definition: String::new(),
            example: String::new(),
        }
    }
}

/// Body row for `POST /Vocabularies/upsert-by-spelling`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertVocabulary {
    pub spelling: String,
    pub stem: String,
    pub definition: String,
    pub need_test: String,
    pub example: Option<String>,
    pub pronunciation: Option<String>,
}

impl From<&CaptureCandidate> for UpsertVocabulary {
    fn from(candidate: &CaptureCandidate) -> Self {
        Self {
            spelling: candidate.spelling.clone(),
            stem: candidate.stem.clone(),
            definition: candidate.definition.clone(),
            need_test: if candidate.need_test { "Y" } else { "N" }.to_string(),
            example: non_blank(Some(&candidate.example)).map(str::to_string),
            pronunciation: non_blank(Some(&candidate.pronunciation)).map(str::to_string),
        }
    }
}

pub fn selected_for_upsert(candidates: &[CaptureCandidate]) -> Vec<UpsertVocabulary> {
    candidates.iter().filter(|c| c.add).map(UpsertVocabulary::from).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedResult {
    pub items: Vec<VocabularyItem>,
    pub total_count: usize,
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_true() -> bool {
    true
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().map(clamp_counter).unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().map(clamp_counter).unwrap_or(0),
        _ => 0,
    })
}

fn clamp_counter(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_result<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AttemptResult>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(AttemptResult::parse))
}

// The backend sends "Y"/"N" in some places and booleans in others.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => !matches!(s.trim(), "" | "N" | "n"),
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        let item = VocabularyItem {
            attempt: u32::MAX,
            success_total: u32::MAX,
            fail_total: u32::MAX,
            ..VocabularyItem::new("abate")
        };

        let failed = item.with_failure("2024-05-01T10:00:00Z");
        assert_eq!(failed.attempt, u32::MAX);
        assert_eq!(failed.fail_total, u32::MAX);

        let passed = item.with_success("2024-05-01T10:00:00Z");
        assert_eq!(passed.attempt, u32::MAX);
        assert_eq!(passed.success_total, u32::MAX);
    }

    #[test]
    fn oversized_counters_clamp_to_max() {
        let item: VocabularyItem = serde_json::from_value(json!({
            "spelling": "abate",
            "attempt": 4294967296u64,
            "failTotal": "4294967296",
        }))
        .unwrap();
        assert_eq!(item.attempt, u32::MAX);
        assert_eq!(item.fail_total, u32::MAX);
    }

    #[test]
    fn item_tolerates_nulls_and_keeps_unknown_fields() {
        let item: VocabularyItem = serde_json::from_value(json!({
            "id": 7,
            "spelling": "abate",
            "attempt": null,
            "successTotal": 2,
            "failTotal": "3",
            "lastResult": "weird",
            "category": "verbs"
        }))
        .unwrap();

        assert_eq!(item.id, Some(7));
        assert_eq!(item.attempt, 0);
        assert_eq!(item.success_total, 2);
        assert_eq!(item.fail_total, 3);
        assert_eq!(item.last_result, None);
        assert_eq!(item.extra.get("category"), Some(&json!("verbs")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["category"], json!("verbs"));
        assert_eq!(back["successTotal"], json!(2));
    }

    #[test]
    fn success_and_failure_are_immutable_updates() {
        let item = VocabularyItem::new("abate");
        let ok = item.with_success("2024-01-01T00:00:00.000Z");
        assert_eq!(item.attempt, 0);
        assert_eq!(ok.attempt, 1);
        assert_eq!(ok.success_total, 1);
        assert_eq!(ok.last_result, Some(AttemptResult::Success));
        assert_eq!(ok.last_correct.as_deref(), Some("2024-01-01T00:00:00.000Z"));

        let bad = ok.with_failure("2024-01-02T00:00:00.000Z");
        assert_eq!(bad.attempt, 2);
        assert_eq!(bad.fail_total, 1);
        assert_eq!(bad.success_total, 1);
        assert_eq!(bad.last_result, Some(AttemptResult::Fail));
        assert_eq!(bad.last_fail.as_deref(), Some("2024-01-02T00:00:00.000Z"));
        assert_eq!(serde_json::to_value(&bad).unwrap()["lastResult"], json!("FAIL"));
    }

    #[test]
    fn upsert_payload_keeps_only_selected_rows() {
        let candidates = vec![
            CaptureCandidate {
                add: true,
                need_test: false,
                spelling: "gist".into(),
                definition: "main point".into(),
                ..Default::default()
            },
            CaptureCandidate { add: false, spelling: "skip".into(), ..Default::default() },
            CaptureCandidate {
                add: true,
                spelling: "terse".into(),
                example: "a terse reply".into(),
                ..Default::default()
            },
        ];

        let payload = selected_for_upsert(&candidates);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].need_test, "N");
        assert_eq!(payload[0].example, None);
        assert_eq!(payload[1].need_test, "Y");
        assert_eq!(payload[1].example.as_deref(), Some("a terse reply"));
        assert_eq!(payload[1].pronunciation, None);
    }

    #[test]
    fn capture_candidate_defaults() {
        let candidate: CaptureCandidate =
            serde_json::from_value(json!({ "spelling": "wane", "definition": null })).unwrap();
        assert!(!candidate.add);
        assert!(candidate.need_test);
        assert_eq!(candidate.definition, "");
    }

    #[test]
    fn new_vocabulary_requires_spelling_and_definition() {
        let mut form = NewVocabulary::default();
        assert_eq!(form.need_test, "s");
        assert!(form.missing_required().is_some());
        form.spelling = "gist".into();
        assert_eq!(form.missing_required(), Some("Definition is required."));
        form.definition = "main point".into();
        assert_eq!(form.missing_required(), None);
    }
}
