use crate::core::{
    PagedResult,
    VocabularyItem,
};

pub const DEFAULT_PAGE_SIZE: usize = 5;
const WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    Listing,
    Searching(String),
}

/// What the list view has to fetch next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Page(usize),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub show_first: bool,
    pub leading_ellipsis: bool,
    pub show_last: bool,
    pub trailing_ellipsis: bool,
}

#[derive(Debug, Clone)]
pub struct PageState {
    items: Vec<VocabularyItem>,
    current_page: usize,
    page_size: usize,
    total_records: usize,
    mode: ListMode,
    pub search_input: String,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            total_records: 0,
            mode: ListMode::Listing,
            search_input: String::new(),
        }
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, ListMode::Searching(_))
    }

    pub fn total_pages(&self) -> usize {
        self.total_records.div_ceil(self.page_size)
    }

    pub fn show_pagination(&self) -> bool {
        !self.is_searching() && self.total_pages() > 1
    }

    pub fn initial_request(&self) -> PageRequest {
        PageRequest::Page(1)
    }

    /// Commits the search box: a blank term goes back to page 1 of the full list.
    pub fn submit_search(&mut self) -> PageRequest {
        let term = self.search_input.trim().to_string();
        if term.is_empty() {
            self.mode = ListMode::Listing;
            PageRequest::Page(1)
        } else {
            self.mode = ListMode::Searching(term.clone());
            PageRequest::Search(term)
        }
    }

    pub fn apply_page(&mut self, page: usize, result: PagedResult) {
        self.mode = ListMode::Listing;
        self.items = result.items;
        self.total_records = result.total_count;
        self.current_page = page.max(1);
    }

    pub fn apply_search(&mut self, items: Vec<VocabularyItem>) {
        self.total_records = items.len();
        self.items = items;
        self.current_page = 1;
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    /// The fetch to run after a delete succeeded.
    ///
    /// Removing the only row of a later page steps back one page.
    pub fn page_after_delete(&self) -> PageRequest {
        if let ListMode::Searching(term) = &self.mode {
            return PageRequest::Search(term.clone());
        }
        if self.items.len() == 1 && self.current_page > 1 {
            PageRequest::Page(self.current_page - 1)
        } else {
            PageRequest::Page(self.current_page)
        }
    }

    pub fn go_to(&self, page: usize) -> Option<PageRequest> {
        let total = self.total_pages();
        (page >= 1 && page <= total && !self.is_searching()).then_some(PageRequest::Page(page))
    }

    pub fn previous(&self) -> Option<PageRequest> {
        self.current_page.checked_sub(1).and_then(|page| self.go_to(page))
    }

    pub fn next(&self) -> Option<PageRequest> {
        self.go_to(self.current_page + 1)
    }

    pub fn page_window(&self) -> PageWindow {
        page_window(self.current_page, self.total_pages())
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Up to five page numbers around `current`, shifted to stay inside `1..=total`.
pub fn page_window(current: usize, total: usize) -> PageWindow {
    if total == 0 {
        return PageWindow {
            pages: Vec::new(),
            show_first: false,
            leading_ellipsis: false,
            show_last: false,
            trailing_ellipsis: false,
        };
    }

    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(WINDOW / 2).max(1);
    let end = (start + WINDOW - 1).min(total);
    if end - start < WINDOW - 1 {
        start = end.saturating_sub(WINDOW - 1).max(1);
    }

    PageWindow {
        pages: (start..=end).collect(),
        show_first: start > 1,
        leading_ellipsis: start > 2,
        show_last: end < total,
        trailing_ellipsis: end + 1 < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<VocabularyItem> {
        (0..n).map(|i| VocabularyItem::new(format!("word{i}"))).collect()
    }

    fn state_on(page: usize, rows: usize, total: usize) -> PageState {
        let mut state = PageState::new(5);
        state.apply_page(page, PagedResult { items: items(rows), total_count: total });
        state
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(state_on(1, 5, 23).total_pages(), 5);
        assert_eq!(state_on(1, 5, 25).total_pages(), 5);
        assert_eq!(state_on(1, 0, 0).total_pages(), 0);
        assert!(!state_on(1, 3, 3).show_pagination());
    }

    #[test]
    fn window_touches_edges_without_ellipses() {
        let first = page_window(1, 5);
        assert_eq!(first.pages, vec![1, 2, 3, 4, 5]);
        assert!(!first.show_first && !first.leading_ellipsis);
        assert!(!first.show_last && !first.trailing_ellipsis);

        let last = page_window(5, 5);
        assert_eq!(last.pages, vec![1, 2, 3, 4, 5]);
        assert!(!last.trailing_ellipsis);
    }

    #[test]
    fn window_slides_in_the_middle() {
        let middle = page_window(10, 20);
        assert_eq!(middle.pages, vec![8, 9, 10, 11, 12]);
        assert!(middle.show_first && middle.leading_ellipsis);
        assert!(middle.show_last && middle.trailing_ellipsis);

        let near_start = page_window(4, 20);
        assert_eq!(near_start.pages, vec![2, 3, 4, 5, 6]);
        assert!(near_start.show_first);
        assert!(!near_start.leading_ellipsis);

        let near_end = page_window(19, 20);
        assert_eq!(near_end.pages, vec![16, 17, 18, 19, 20]);
        assert!(!near_end.show_last);
    }

    #[test]
    fn deleting_last_row_of_last_page_steps_back() {
        let state = state_on(3, 1, 11);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.page_after_delete(), PageRequest::Page(2));

        assert_eq!(state_on(1, 1, 1).page_after_delete(), PageRequest::Page(1));
        assert_eq!(state_on(2, 3, 8).page_after_delete(), PageRequest::Page(2));
    }

    #[test]
    fn search_switches_modes() {
        let mut state = state_on(3, 5, 23);
        state.search_input = "  gist ".into();
        assert_eq!(state.submit_search(), PageRequest::Search("gist".into()));
        state.apply_search(items(2));
        assert!(state.is_searching());
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_records(), 2);
        assert!(!state.show_pagination());
        assert_eq!(state.page_after_delete(), PageRequest::Search("gist".into()));
        assert_eq!(state.next(), None);

        state.search_input.clear();
        assert_eq!(state.submit_search(), PageRequest::Page(1));
        assert!(!state.is_searching());
    }

    #[test]
    fn previous_and_next_stay_in_range() {
        let state = state_on(1, 5, 12);
        assert_eq!(state.previous(), None);
        assert_eq!(state.next(), Some(PageRequest::Page(2)));

        let last = state_on(3, 2, 12);
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(PageRequest::Page(2)));
        assert_eq!(last.go_to(4), None);
    }
}
