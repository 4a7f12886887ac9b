use crate::{
    core::VocabularyItem,
    speech::SpokenMarker,
};

/// Steps through a list without scoring, used by the definition cards.
#[derive(Debug, Clone, Default)]
pub struct ItemWalker {
    items: Vec<VocabularyItem>,
    current_index: usize,
    pub show_details: bool,
    spoken: SpokenMarker<usize>,
}

impl ItemWalker {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self { items, ..Self::default() }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.current_index)
    }

    pub fn can_advance(&self) -> bool {
        self.current_index + 1 < self.items.len()
    }

    pub fn next(&mut self) {
        if !self.can_advance() {
            return;
        }
        self.current_index += 1;
        self.show_details = false;
    }

    pub fn take_pending_speech(&mut self) -> Option<String> {
        let current = self.items.get(self.current_index)?;
        self.spoken.mark(&self.current_index).then(|| current.spelling.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_and_hides_details() {
        let mut walker =
            ItemWalker::new(vec![VocabularyItem::new("one"), VocabularyItem::new("two")]);
        assert_eq!(walker.take_pending_speech().as_deref(), Some("one"));
        assert_eq!(walker.take_pending_speech(), None);

        walker.show_details = true;
        walker.next();
        assert_eq!(walker.current_index(), 1);
        assert!(!walker.show_details);
        assert_eq!(walker.take_pending_speech().as_deref(), Some("two"));

        walker.next();
        assert_eq!(walker.current_index(), 1);
        assert!(!walker.can_advance());
    }
}
