mod calendar;
mod capture;
mod definition;
mod dictation;
mod form;
mod list;
mod review;
mod similar;

use calendar::CalendarPage;
use capture::CapturePage;
use chrono::NaiveDate;
use definition::DefinitionPage;
use dictation::DictationPage;
use eframe::egui;
use form::FormPage;
use list::ListPage;
use review::ReviewPage;
use similar::SimilarPage;

use crate::{
    gui::theme::Theme,
    quiz::QuizSource,
    speech::{
        say,
        SharedSpeaker,
    },
    tasks::{
        RequestId,
        TaskManager,
        TaskResult,
    },
};

/// What a date picked on the calendar is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarTarget {
    Dictation,
    Similar,
    Definition,
    Review,
}

impl CalendarTarget {
    fn title(&self) -> &'static str {
        match self {
            CalendarTarget::Dictation => "Dictation by Date",
            CalendarTarget::Similar => "Similar Spelling",
            CalendarTarget::Definition => "Definition",
            CalendarTarget::Review => "Review",
        }
    }

    fn route(&self, date: NaiveDate) -> Route {
        match self {
            CalendarTarget::Dictation => Route::Dictation(QuizSource::ByDate(date)),
            CalendarTarget::Similar => Route::Similar(date),
            CalendarTarget::Definition => Route::Definition(date),
            CalendarTarget::Review => Route::Review(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Edit(i64),
    Capture,
    Calendar(CalendarTarget),
    Dictation(QuizSource),
    Similar(NaiveDate),
    Definition(NaiveDate),
    Review(NaiveDate),
}

/// Shared services handed to the current page each frame.
pub struct PageContext<'a> {
    pub tasks: &'a mut TaskManager,
    pub speaker: &'a SharedSpeaker,
    pub theme: &'a Theme,
    pub page_size: usize,
}

impl PageContext<'_> {
    fn speak(&self, texts: impl IntoIterator<Item = String>) {
        for text in texts {
            say(self.speaker, &text);
        }
    }
}

pub enum Page {
    List(ListPage),
    Form(FormPage),
    Capture(CapturePage),
    Calendar(CalendarPage),
    Dictation(DictationPage),
    Similar(SimilarPage),
    Definition(DefinitionPage),
    Review(ReviewPage),
}

impl Page {
    pub fn open(route: Route, cx: &mut PageContext) -> Self {
        match route {
            Route::List => Page::List(ListPage::open(cx)),
            Route::Add => Page::Form(FormPage::add()),
            Route::Edit(id) => Page::Form(FormPage::edit(id, cx)),
            Route::Capture => Page::Capture(CapturePage::new()),
            Route::Calendar(target) => Page::Calendar(CalendarPage::open(target, cx)),
            Route::Dictation(source) => Page::Dictation(DictationPage::open(source, cx)),
            Route::Similar(date) => Page::Similar(SimilarPage::open(date, cx)),
            Route::Definition(date) => Page::Definition(DefinitionPage::open(date, cx)),
            Route::Review(date) => Page::Review(ReviewPage::open(date, cx)),
        }
    }

    /// Results for requests this page did not start are dropped.
    pub fn handle(&mut self, result: TaskResult, cx: &mut PageContext) {
        match self {
            Page::List(page) => page.handle(result, cx),
            Page::Form(page) => page.handle(result),
            Page::Capture(page) => page.handle(result),
            Page::Calendar(page) => page.handle(result),
            Page::Dictation(page) => page.handle(result, cx),
            Page::Similar(page) => page.handle(result, cx),
            Page::Definition(page) => page.handle(result, cx),
            Page::Review(page) => page.handle(result),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        match self {
            Page::List(page) => page.show(ui, cx),
            Page::Form(page) => page.show(ui, cx),
            Page::Capture(page) => page.show(ui, cx),
            Page::Calendar(page) => page.show(ui, cx),
            Page::Dictation(page) => page.show(ui, cx),
            Page::Similar(page) => page.show(ui, cx),
            Page::Definition(page) => page.show(ui, cx),
            Page::Review(page) => page.show(ui, cx),
        }
    }

    /// Overlay text while the page waits on its first load.
    pub fn busy_message(&self) -> Option<&'static str> {
        match self {
            Page::Similar(page) => page.is_building().then_some("Building quiz..."),
            Page::Dictation(page) => page.is_loading().then_some("Loading words..."),
            _ => None,
        }
    }
}

/// True when `result` answers the request in `pending`, which is then cleared.
fn answers(pending: &mut Option<RequestId>, result: &TaskResult) -> bool {
    if *pending == Some(result.request_id) {
        *pending = None;
        true
    } else {
        false
    }
}

fn error_label(ui: &mut egui::Ui, error: &Option<String>) {
    if let Some(error) = error {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }
}

fn empty_label(ui: &mut egui::Ui, cx: &PageContext, text: &str) {
    ui.label(egui::RichText::new(text).italics().color(cx.theme.muted(ui.ctx())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskPayload;

    #[test]
    fn only_the_pending_request_is_answered() {
        let result = TaskResult { request_id: 7, payload: TaskPayload::Dates(Ok(Vec::new())) };

        let mut stale = Some(6);
        assert!(!answers(&mut stale, &result));
        assert_eq!(stale, Some(6));

        let mut pending = Some(7);
        assert!(answers(&mut pending, &result));
        assert_eq!(pending, None);
        assert!(!answers(&mut pending, &result));
    }

    #[test]
    fn calendar_targets_route_to_their_mode() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            CalendarTarget::Dictation.route(date),
            Route::Dictation(QuizSource::ByDate(date))
        );
        assert_eq!(CalendarTarget::Review.route(date), Route::Review(date));
    }
}
