use crate::{
    core::{
        dates::now_timestamp,
        VocabularyItem,
    },
    speech::{
        SpokenMarker,
        CUE_SAVED,
        CUE_WRONG,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Presenting(usize),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Blank input, locked item, or a repeat on a finished session.
    Ignored,
    Correct { advanced: bool },
    Wrong,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

/// Dictation over a fixed list of words.
///
/// The session owns the list; every attempt replaces the affected entry with
/// an updated copy so the list can be saved back as-is.
#[derive(Debug, Clone, Default)]
pub struct DictationSession {
    items: Vec<VocabularyItem>,
    current_index: usize,
    correct_count: usize,
    pub input: String,
    revealed: bool,
    has_matched: bool,
    save_state: SaveState,
    spoken: SpokenMarker<usize>,
    pending_cues: Vec<String>,
}

impl DictationSession {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        let mut session = Self::default();
        session.start(items);
        session
    }

    pub fn start(&mut self, items: Vec<VocabularyItem>) {
        *self = Self { items, ..Self::default() };
    }

    pub fn state(&self) -> SessionState {
        if self.items.is_empty() {
            SessionState::Empty
        } else if self.has_matched && self.is_last() {
            SessionState::Finished
        } else {
            SessionState::Presenting(self.current_index)
        }
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.current_index)
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.items.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Input is closed once the answer has been shown.
    pub fn is_input_locked(&self) -> bool {
        self.revealed
    }

    pub fn can_advance(&self) -> bool {
        !self.items.is_empty() && !self.is_last()
    }

    pub fn submit_answer(&mut self, response: &str) -> AnswerOutcome {
        let Some(current) = self.current() else {
            return AnswerOutcome::Ignored;
        };
        if self.is_input_locked() {
            return AnswerOutcome::Ignored;
        }

        let expected = current.spelling.trim();
        let actual = response.trim();
        if expected.is_empty() || actual.is_empty() {
            return AnswerOutcome::Ignored;
        }

        if expected != actual {
            self.record_failure();
            self.pending_cues.push(CUE_WRONG.to_string());
            return AnswerOutcome::Wrong;
        }

        if self.is_last() {
            if self.has_matched {
                return AnswerOutcome::Ignored;
            }
            self.record_success();
            self.has_matched = true;
            self.correct_count += 1;
            return AnswerOutcome::Correct { advanced: false };
        }

        self.record_success();
        self.correct_count += 1;
        self.current_index += 1;
        self.reset_item_state();
        AnswerOutcome::Correct { advanced: true }
    }

    /// Shows the answer. Counts as one failed attempt, once per item.
    pub fn reveal(&mut self) -> bool {
        if self.revealed || self.current().is_none() {
            return false;
        }
        self.record_failure();
        self.revealed = true;
        true
    }

    pub fn advance(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1).min(self.items.len() - 1);
        self.reset_item_state();
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    pub fn can_save(&self) -> bool {
        matches!(self.save_state, SaveState::Idle | SaveState::Failed(_))
    }

    /// Hands out the list to persist, unless a save is running or already succeeded.
    pub fn begin_save(&mut self) -> Option<Vec<VocabularyItem>> {
        if !self.can_save() {
            return None;
        }
        self.save_state = SaveState::Saving;
        Some(self.items.clone())
    }

    pub fn finish_save(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.save_state = SaveState::Saved;
                self.pending_cues.push(CUE_SAVED.to_string());
            }
            Err(e) => self.save_state = SaveState::Failed(e),
        }
    }

    /// Text to speak now: the current spelling once per item, then queued cues.
    pub fn take_pending_speech(&mut self) -> Vec<String> {
        let mut speech = Vec::new();
        if let Some(current) = self.items.get(self.current_index) {
            if self.spoken.mark(&self.current_index) {
                speech.push(current.spelling.clone());
            }
        }
        speech.append(&mut self.pending_cues);
        speech
    }

    fn reset_item_state(&mut self) {
        self.input.clear();
        self.revealed = false;
        self.has_matched = false;
    }

    fn record_success(&mut self) {
        let now = now_timestamp();
        let index = self.current_index;
        self.items[index] = self.items[index].with_success(&now);
    }

    fn record_failure(&mut self) {
        let now = now_timestamp();
        let index = self.current_index;
        self.items[index] = self.items[index].with_failure(&now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttemptResult;

    fn session(words: &[&str]) -> DictationSession {
        DictationSession::new(words.iter().map(|w| VocabularyItem::new(*w)).collect())
    }

    #[test]
    fn empty_list_is_terminal() {
        let mut s = session(&[]);
        assert_eq!(s.state(), SessionState::Empty);
        assert_eq!(s.submit_answer("x"), AnswerOutcome::Ignored);
        assert!(!s.reveal());
        s.advance();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.correct_count(), 0);
        assert!(s.take_pending_speech().is_empty());
    }

    #[test]
    fn correct_answers_walk_to_the_end_then_stop() {
        let words = ["alpha", "beta", "gamma"];
        let mut s = session(&words);

        for (i, word) in words.iter().enumerate() {
            assert_eq!(s.current_index(), i);
            let advanced = i + 1 < words.len();
            assert_eq!(s.submit_answer(&format!(" {word} ")), AnswerOutcome::Correct { advanced });
        }

        assert_eq!(s.current_index(), 2);
        assert_eq!(s.state(), SessionState::Finished);
        assert_eq!(s.correct_count(), 3);

        assert_eq!(s.submit_answer("gamma"), AnswerOutcome::Ignored);
        assert_eq!(s.current_index(), 2);
        assert_eq!(s.correct_count(), 3);
        assert_eq!(s.items()[2].success_total, 1);
        assert_eq!(s.items()[2].attempt, 1);
    }

    #[test]
    fn wrong_answer_keeps_index_and_counts_failure() {
        let mut s = session(&["Alpha", "beta"]);
        s.take_pending_speech();

        assert_eq!(s.submit_answer("alpha"), AnswerOutcome::Wrong);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.items()[0].fail_total, 1);
        assert_eq!(s.items()[0].attempt, 1);
        assert_eq!(s.items()[0].last_result, Some(AttemptResult::Fail));
        assert_eq!(s.take_pending_speech(), vec![CUE_WRONG.to_string()]);

        assert_eq!(s.submit_answer("nope"), AnswerOutcome::Wrong);
        assert_eq!(s.items()[0].fail_total, 2);
        assert_eq!(s.correct_count(), 0);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut s = session(&["alpha"]);
        assert_eq!(s.submit_answer("   "), AnswerOutcome::Ignored);
        assert_eq!(s.items()[0].attempt, 0);
    }

    #[test]
    fn reveal_penalizes_once_until_advance() {
        let mut s = session(&["alpha", "beta"]);
        assert!(s.reveal());
        assert!(!s.reveal());
        assert_eq!(s.items()[0].fail_total, 1);
        assert!(s.is_input_locked());
        assert_eq!(s.submit_answer("alpha"), AnswerOutcome::Ignored);

        s.advance();
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_revealed());
        assert!(s.reveal());
        assert_eq!(s.items()[1].fail_total, 1);
        assert_eq!(s.items()[0].fail_total, 1);
    }

    #[test]
    fn advance_clamps_and_resets_input() {
        let mut s = session(&["alpha", "beta"]);
        s.input = "draft".into();
        s.advance();
        s.advance();
        assert_eq!(s.current_index(), 1);
        assert!(s.input.is_empty());
        assert!(!s.can_advance());
    }

    #[test]
    fn single_item_cannot_advance_but_still_scores() {
        let mut s = session(&["solo"]);
        assert!(!s.can_advance());
        assert_eq!(s.submit_answer("wrong"), AnswerOutcome::Wrong);
        assert_eq!(s.submit_answer("solo"), AnswerOutcome::Correct { advanced: false });
        assert_eq!(s.correct_count(), 1);
        assert_eq!(s.items()[0].attempt, 2);
    }

    #[test]
    fn current_word_is_spoken_once_per_item() {
        let mut s = session(&["alpha", "beta"]);
        assert_eq!(s.take_pending_speech(), vec!["alpha".to_string()]);
        assert!(s.take_pending_speech().is_empty());
        s.submit_answer("alpha");
        assert_eq!(s.take_pending_speech(), vec!["beta".to_string()]);
        s.advance();
        assert!(s.take_pending_speech().is_empty());
    }

    #[test]
    fn save_is_at_most_once() {
        let mut s = session(&["alpha"]);
        s.submit_answer("alpha");

        let payload = s.begin_save().expect("first save allowed");
        assert_eq!(payload[0].success_total, 1);
        assert!(s.begin_save().is_none());

        s.finish_save(Err("Failed to save (500 Internal Server Error)".into()));
        assert!(matches!(s.save_state(), SaveState::Failed(_)));
        assert!(s.begin_save().is_some());

        s.finish_save(Ok(()));
        assert_eq!(s.save_state(), &SaveState::Saved);
        assert!(s.begin_save().is_none());
        assert!(s.take_pending_speech().contains(&CUE_SAVED.to_string()));
    }
}
