use std::collections::{
    HashMap,
    HashSet,
};

use futures::future::join_all;
use rand::Rng;
use tracing::{
    debug,
    warn,
};

use crate::{
    api::{
        SimilarSpelling,
        VocabularyApi,
    },
    core::{
        models::non_blank,
        VocabError,
        VocabularyItem,
    },
};

/// The backend calls the similar-spelling quiz depends on.
#[allow(async_fn_in_trait)]
pub trait SpellingLookup {
    async fn similar_spellings(&self, spelling: &str) -> Result<Vec<SimilarSpelling>, VocabError>;
    async fn search(&self, term: &str) -> Result<Vec<VocabularyItem>, VocabError>;
}

impl SpellingLookup for VocabularyApi {
    async fn similar_spellings(&self, spelling: &str) -> Result<Vec<SimilarSpelling>, VocabError> {
        VocabularyApi::similar_spellings(self, spelling).await
    }

    async fn search(&self, term: &str) -> Result<Vec<VocabularyItem>, VocabError> {
        VocabularyApi::search(self, term).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub vocab: VocabularyItem,
    pub options: Vec<String>,
    /// Keyed by lower-cased spelling.
    pub option_definitions: HashMap<String, Option<String>>,
}

impl QuizQuestion {
    pub fn spelling(&self) -> &str {
        self.vocab.spelling.trim()
    }

    pub fn is_correct(&self, option: &str) -> bool {
        let expected = self.spelling().to_lowercase();
        !expected.is_empty() && expected == option.trim().to_lowercase()
    }

    pub fn option_definition(&self, spelling: &str) -> Option<&str> {
        self.option_definitions
            .get(&spelling.trim().to_lowercase())
            .and_then(|d| d.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub questions: Vec<QuizQuestion>,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildReport {
    pub fn warning(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.failed > 0 {
            parts.push(format!("Could not load {} word(s)", self.failed));
        }
        if self.skipped > 0 {
            parts.push(format!("Skipped {} word(s) with no similar options", self.skipped));
        }
        (!parts.is_empty()).then(|| format!("{}.", parts.join(". ")))
    }
}

enum Candidates {
    Skipped,
    Failed,
    Found(VocabularyItem, Vec<SimilarSpelling>),
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Looks up similar spellings for every item at once and turns each answer
/// into a multiple-choice question. Items without distractors are skipped and
/// failed lookups are counted; neither stops the rest.
pub async fn build_questions<L, R>(lookup: &L, items: Vec<VocabularyItem>, rng: &mut R) -> BuildReport
where
    L: SpellingLookup,
    R: Rng + ?Sized,
{
    let lookups = items.into_iter().map(|vocab| async move {
        let spelling = vocab.spelling.trim().to_string();
        if spelling.is_empty() {
            return Candidates::Skipped;
        }
        match lookup.similar_spellings(&spelling).await {
            Ok(similar) => Candidates::Found(vocab, similar),
            Err(e) => {
                warn!(spelling = %spelling, "similar spellings lookup failed: {e}");
                Candidates::Failed
            }
        }
    });

    let mut report = BuildReport::default();
    for outcome in join_all(lookups).await {
        match outcome {
            Candidates::Skipped => report.skipped += 1,
            Candidates::Failed => report.failed += 1,
            Candidates::Found(vocab, similar) => match assemble_question(vocab, similar, rng) {
                Some(question) => report.questions.push(question),
                None => report.skipped += 1,
            },
        }
    }

    debug!(
        questions = report.questions.len(),
        skipped = report.skipped,
        failed = report.failed,
        "similar quiz built"
    );
    report
}

fn assemble_question<R: Rng + ?Sized>(
    vocab: VocabularyItem,
    similar: Vec<SimilarSpelling>,
    rng: &mut R,
) -> Option<QuizQuestion> {
    let source = vocab.spelling.trim().to_string();
    let source_key = source.to_lowercase();

    let mut merged: Vec<SimilarSpelling> =
        similar.into_iter().filter(|s| s.spelling.to_lowercase() != source_key).collect();
    if merged.is_empty() {
        return None;
    }
    merged.push(SimilarSpelling::new(source, vocab.definition_text()));

    let mut seen = HashSet::new();
    let mut options = Vec::new();
    let mut option_definitions = HashMap::new();
    for candidate in merged {
        let key = candidate.spelling.to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }
        options.push(candidate.spelling);
        option_definitions.insert(key, candidate.definition);
    }

    shuffle(&mut options, rng);
    Some(QuizQuestion { vocab, options, option_definitions })
}

/// Definition of the exact (case-insensitive) match from a search; failures read as none.
pub async fn lookup_definition<L: SpellingLookup>(lookup: &L, spelling: &str) -> Option<String> {
    let spelling = spelling.trim();
    if spelling.is_empty() {
        return None;
    }
    let key = spelling.to_lowercase();

    match lookup.search(spelling).await {
        Ok(results) => results
            .iter()
            .find(|item| item.spelling.trim().to_lowercase() == key)
            .and_then(|item| non_blank(item.definition.as_deref()))
            .map(str::to_string),
        Err(e) => {
            warn!(spelling = %spelling, "definition lookup failed: {e}");
            None
        }
    }
}

pub async fn lookup_definitions<L: SpellingLookup>(
    lookup: &L,
    spellings: Vec<String>,
) -> Vec<(String, Option<String>)> {
    join_all(spellings.into_iter().map(|spelling| async move {
        let definition = lookup_definition(lookup, &spelling).await;
        (spelling, definition)
    }))
    .await
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };
    use reqwest::StatusCode;

    use super::*;

    /// In-memory backend: spelling -> similar list; `None` simulates a failed call.
    #[derive(Default)]
    pub struct FakeLookup {
        pub similar: HashMap<String, Option<Vec<SimilarSpelling>>>,
        pub words: Vec<VocabularyItem>,
    }

    impl FakeLookup {
        pub fn with(mut self, spelling: &str, similar: &[&str]) -> Self {
            self.similar.insert(
                spelling.to_string(),
                Some(similar.iter().map(|s| SimilarSpelling::new(*s, None)).collect()),
            );
            self
        }

        pub fn failing(mut self, spelling: &str) -> Self {
            self.similar.insert(spelling.to_string(), None);
            self
        }
    }

    impl SpellingLookup for FakeLookup {
        async fn similar_spellings(&self, spelling: &str) -> Result<Vec<SimilarSpelling>, VocabError> {
            match self.similar.get(spelling) {
                Some(Some(list)) => Ok(list.clone()),
                Some(None) => Err(VocabError::http(StatusCode::BAD_GATEWAY, "similar")),
                None => Ok(Vec::new()),
            }
        }

        async fn search(&self, term: &str) -> Result<Vec<VocabularyItem>, VocabError> {
            let term = term.to_lowercase();
            Ok(self
                .words
                .iter()
                .filter(|w| w.spelling.to_lowercase().contains(&term))
                .cloned()
                .collect())
        }
    }

    fn item(spelling: &str, definition: &str) -> VocabularyItem {
        VocabularyItem { definition: Some(definition.to_string()), ..VocabularyItem::new(spelling) }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<u32> = (0..25).collect();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);

        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn items_without_distractors_are_skipped() {
        let lookup = FakeLookup::default()
            .with("affect", &["effect", "AFFECT"])
            .with("lonely", &["Lonely"]);
        let mut rng = StdRng::seed_from_u64(1);

        let report = build_questions(
            &lookup,
            vec![item("affect", "to influence"), item("lonely", "alone"), VocabularyItem::new("  ")],
            &mut rng,
        )
        .await;

        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(
            report.warning().as_deref(),
            Some("Skipped 2 word(s) with no similar options.")
        );
    }

    #[tokio::test]
    async fn failed_lookups_are_counted_separately() {
        let lookup = FakeLookup::default()
            .failing("accept")
            .with("desert", &["dessert"]);
        let mut rng = StdRng::seed_from_u64(2);

        let report =
            build_questions(&lookup, vec![item("accept", "x"), item("desert", "arid")], &mut rng)
                .await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.warning().as_deref(), Some("Could not load 1 word(s)."));
    }

    #[tokio::test]
    async fn options_are_unique_and_contain_the_answer_once() {
        let lookup = FakeLookup::default()
            .with("desert", &["dessert", "Dessert", "deserted", "dissert"]);
        let mut rng = StdRng::seed_from_u64(3);

        let report = build_questions(&lookup, vec![item("desert", "arid land")], &mut rng).await;
        let question = &report.questions[0];

        let mut lowered: Vec<String> = question.options.iter().map(|o| o.to_lowercase()).collect();
        lowered.sort();
        assert_eq!(lowered, vec!["desert", "deserted", "dessert", "dissert"]);
        assert!(question.options.contains(&"dessert".to_string()));
        assert_eq!(question.options.iter().filter(|o| question.is_correct(o)).count(), 1);
        assert_eq!(question.option_definition("DESERT"), Some("arid land"));
        assert_eq!(question.option_definition("dessert"), None);
        assert!(report.warning().is_none());
    }

    #[tokio::test]
    async fn definition_lookup_takes_exact_match() {
        let lookup = FakeLookup {
            words: vec![item("dessert", "sweet course"), item("desserts", "plural")],
            ..Default::default()
        };

        assert_eq!(lookup_definition(&lookup, " Dessert ").await.as_deref(), Some("sweet course"));
        assert_eq!(lookup_definition(&lookup, "dess").await, None);
        assert_eq!(lookup_definition(&lookup, "").await, None);

        let both = lookup_definitions(&lookup, vec!["desserts".into(), "zzz".into()]).await;
        assert_eq!(both[0], ("desserts".to_string(), Some("plural".to_string())));
        assert_eq!(both[1], ("zzz".to_string(), None));
    }
}
