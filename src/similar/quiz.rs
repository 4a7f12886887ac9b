use std::{
    collections::HashMap,
    time::{
        Duration,
        Instant,
    },
};

use super::builder::{
    BuildReport,
    QuizQuestion,
};
use crate::speech::{
    SpokenMarker,
    CUE_LAST,
};

pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(450);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub selected: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrongDetails {
    pub loading: bool,
    pub selected_definition: Option<String>,
    pub correct_definition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooseOutcome {
    Ignored,
    Correct,
    /// Spellings whose definitions still have to be fetched.
    Wrong { lookups: Vec<String> },
}

/// Session-local definition lookups, keyed by lower-cased spelling.
/// A cached `None` means the lookup already came back empty.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCache {
    entries: HashMap<String, Option<String>>,
}

impl DefinitionCache {
    pub fn get(&self, spelling: &str) -> Option<&Option<String>> {
        self.entries.get(&spelling.trim().to_lowercase())
    }

    pub fn insert(&mut self, spelling: &str, definition: Option<String>) {
        self.entries.insert(spelling.trim().to_lowercase(), definition);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SimilarQuiz {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    answers: HashMap<usize, Answer>,
    wrong_details: HashMap<usize, WrongDetails>,
    cache: DefinitionCache,
    warning: Option<String>,
    auto_advance_at: Option<Instant>,
    spoken: SpokenMarker<usize>,
    pending_cues: Vec<String>,
}

impl SimilarQuiz {
    pub fn from_report(report: BuildReport) -> Self {
        let warning = report.warning();
        Self { questions: report.questions, warning, ..Self::default() }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(&self.current_index)
    }

    pub fn current_wrong_details(&self) -> Option<&WrongDetails> {
        self.wrong_details.get(&self.current_index)
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct).count()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn cache(&self) -> &DefinitionCache {
        &self.cache
    }

    pub fn choose(&mut self, option: &str, now: Instant) -> ChooseOutcome {
        let index = self.current_index;
        let Some(question) = self.questions.get(index) else {
            return ChooseOutcome::Ignored;
        };
        if self.answers.contains_key(&index) {
            return ChooseOutcome::Ignored;
        }

        let is_correct = question.is_correct(option);
        self.answers.insert(index, Answer { selected: option.to_string(), is_correct });

        if self.is_last() {
            self.pending_cues.push(CUE_LAST.to_string());
        }

        if is_correct {
            if !self.is_last() {
                self.auto_advance_at = Some(now + AUTO_ADVANCE_DELAY);
            }
            return ChooseOutcome::Correct;
        }

        let (details, lookups) = self.resolve_details(index, option);
        self.wrong_details.insert(index, details);
        ChooseOutcome::Wrong { lookups }
    }

    /// Fills the cache with fetched definitions and completes the wrong-answer panel.
    pub fn apply_definitions(&mut self, index: usize, results: Vec<(String, Option<String>)>) {
        for (spelling, definition) in results {
            self.cache.insert(&spelling, definition);
        }
        let Some(selected) = self.answers.get(&index).map(|a| a.selected.clone()) else {
            return;
        };
        let (mut details, _) = self.resolve_details(index, &selected);
        details.loading = false;
        self.wrong_details.insert(index, details);
    }

    /// Moves on once the auto-advance delay has passed. Returns true if it moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.auto_advance_at {
            Some(due) if now >= due => {
                self.auto_advance_at = None;
                self.current_index += 1;
                true
            }
            _ => false,
        }
    }

    pub fn auto_advance_pending(&self) -> Option<Instant> {
        self.auto_advance_at
    }

    pub fn can_go_next(&self) -> bool {
        self.current_answer().is_some() && !self.is_last()
    }

    pub fn next(&mut self) {
        if !self.can_go_next() {
            return;
        }
        self.auto_advance_at = None;
        self.current_index += 1;
    }

    pub fn take_pending_speech(&mut self) -> Vec<String> {
        let mut speech = Vec::new();
        if let Some(question) = self.questions.get(self.current_index) {
            if self.spoken.mark(&self.current_index) {
                speech.push(question.spelling().to_string());
            }
        }
        speech.append(&mut self.pending_cues);
        speech
    }

    fn resolve_details(&self, index: usize, selected: &str) -> (WrongDetails, Vec<String>) {
        let Some(question) = self.questions.get(index) else {
            return (WrongDetails::default(), Vec::new());
        };
        let correct = question.spelling();
        let mut lookups = Vec::new();

        let mut resolve = |known: Option<String>, spelling: &str| -> Option<String> {
            if known.is_some() {
                return known;
            }
            match self.cache.get(spelling) {
                Some(cached) => cached.clone(),
                None => {
                    if !spelling.trim().is_empty() {
                        lookups.push(spelling.trim().to_string());
                    }
                    None
                }
            }
        };

        let selected_definition =
            resolve(question.option_definition(selected).map(str::to_string), selected);
        let correct_known = question
            .option_definition(correct)
            .or_else(|| question.vocab.definition_text())
            .map(str::to_string);
        let correct_definition = resolve(correct_known, correct);

        lookups.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        let details = WrongDetails {
            loading: !lookups.is_empty(),
            selected_definition,
            correct_definition,
        };
        (details, lookups)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::VocabularyItem;

    fn question(spelling: &str, definition: Option<&str>, options: &[(&str, Option<&str>)]) -> QuizQuestion {
        QuizQuestion {
            vocab: VocabularyItem {
                definition: definition.map(str::to_string),
                ..VocabularyItem::new(spelling)
            },
            options: options.iter().map(|(s, _)| s.to_string()).collect(),
            option_definitions: options
                .iter()
                .map(|(s, d)| (s.to_lowercase(), d.map(str::to_string)))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn quiz(questions: Vec<QuizQuestion>) -> SimilarQuiz {
        SimilarQuiz::from_report(BuildReport { questions, skipped: 0, failed: 0 })
    }

    #[test]
    fn correct_choice_schedules_auto_advance() {
        let mut q = quiz(vec![
            question("desert", None, &[("desert", None), ("dessert", None)]),
            question("affect", None, &[("affect", None), ("effect", None)]),
        ]);
        let start = Instant::now();

        assert_eq!(q.choose("DESERT", start), ChooseOutcome::Correct);
        assert_eq!(q.choose("dessert", start), ChooseOutcome::Ignored);
        assert!(!q.tick(start + Duration::from_millis(100)));
        assert!(q.tick(start + AUTO_ADVANCE_DELAY));
        assert_eq!(q.current_index(), 1);
        assert_eq!(q.correct_count(), 1);
    }

    #[test]
    fn correct_choice_on_last_question_only_cues() {
        let mut q = quiz(vec![question("affect", None, &[("affect", None), ("effect", None)])]);
        q.take_pending_speech();
        let now = Instant::now();

        assert_eq!(q.choose("affect", now), ChooseOutcome::Correct);
        assert!(q.auto_advance_pending().is_none());
        assert!(!q.tick(now + AUTO_ADVANCE_DELAY * 2));
        assert_eq!(q.take_pending_speech(), vec![CUE_LAST.to_string()]);
    }

    #[test]
    fn wrong_choice_uses_known_definitions_first() {
        let mut q = quiz(vec![
            question(
                "desert",
                Some("arid land"),
                &[("desert", Some("arid land")), ("dessert", Some("sweet course"))],
            ),
            question("affect", None, &[("affect", None), ("effect", None)]),
        ]);

        assert_eq!(q.choose("dessert", Instant::now()), ChooseOutcome::Wrong { lookups: vec![] });
        let details = q.current_wrong_details().unwrap();
        assert!(!details.loading);
        assert_eq!(details.selected_definition.as_deref(), Some("sweet course"));
        assert_eq!(details.correct_definition.as_deref(), Some("arid land"));
        assert!(q.auto_advance_pending().is_none());
        assert!(q.can_go_next());
    }

    #[test]
    fn missing_definitions_are_looked_up_then_cached() {
        let mut q = quiz(vec![
            question("affect", None, &[("affect", None), ("effect", None)]),
            question("accept", None, &[("accept", None), ("effect", None)]),
        ]);

        let outcome = q.choose("effect", Instant::now());
        assert_eq!(
            outcome,
            ChooseOutcome::Wrong { lookups: vec!["effect".to_string(), "affect".to_string()] }
        );
        assert!(q.current_wrong_details().unwrap().loading);

        q.apply_definitions(
            0,
            vec![("effect".into(), Some("a result".into())), ("affect".into(), None)],
        );
        let details = q.current_wrong_details().unwrap();
        assert!(!details.loading);
        assert_eq!(details.selected_definition.as_deref(), Some("a result"));
        assert_eq!(details.correct_definition, None);
        assert_eq!(q.cache().len(), 2);

        q.next();
        let outcome = q.choose("Effect", Instant::now());
        assert_eq!(outcome, ChooseOutcome::Wrong { lookups: vec!["accept".to_string()] });
        assert_eq!(
            q.current_wrong_details().unwrap().selected_definition.as_deref(),
            Some("a result")
        );
    }

    #[test]
    fn next_requires_an_answer() {
        let mut q = quiz(vec![
            question("a1", None, &[("a1", None), ("a2", None)]),
            question("b1", None, &[("b1", None), ("b2", None)]),
        ]);
        q.next();
        assert_eq!(q.current_index(), 0);
        q.choose("a2", Instant::now());
        q.next();
        assert_eq!(q.current_index(), 1);
        q.choose("b2", Instant::now());
        q.next();
        assert_eq!(q.current_index(), 1);
    }

    #[test]
    fn warning_comes_from_the_report() {
        let q = SimilarQuiz::from_report(BuildReport { questions: vec![], skipped: 1, failed: 2 });
        assert_eq!(
            q.warning(),
            Some("Could not load 2 word(s). Skipped 1 word(s) with no similar options.")
        );
        assert!(q.current().is_none());
    }
}
