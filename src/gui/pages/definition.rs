use chrono::NaiveDate;
use eframe::egui;

use super::{
    answers,
    empty_label,
    error_label,
    CalendarTarget,
    PageContext,
    Route,
};
use crate::{
    quiz::{
        ItemWalker,
        QuizSource,
    },
    speech::say,
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

/// Flash cards: the word is spoken, the definition stays hidden until asked for.
pub struct DefinitionPage {
    date: NaiveDate,
    walker: ItemWalker,
    pending: Option<RequestId>,
    error: Option<String>,
}

impl DefinitionPage {
    pub fn open(date: NaiveDate, cx: &mut PageContext) -> Self {
        Self {
            date,
            walker: ItemWalker::default(),
            pending: Some(cx.tasks.load_items(QuizSource::ByDate(date))),
            error: None,
        }
    }

    pub fn handle(&mut self, result: TaskResult, cx: &mut PageContext) {
        if !answers(&mut self.pending, &result) {
            return;
        }
        if let TaskPayload::Items(items) = result.payload {
            match items {
                Ok(items) => self.walker = ItemWalker::new(items),
                Err(e) => {
                    self.walker = ItemWalker::default();
                    self.error = Some(e);
                }
            }
        }
        cx.speak(self.walker.take_pending_speech());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        let mut route = None;

        ui.heading(cx.theme.heading(ui.ctx(), "Definition"));
        ui.horizontal(|ui| {
            ui.label(format!("Selected: {}", self.date.format("%A, %B %-d, %Y")));
            if ui.small_button("Change Date").clicked() {
                route = Some(Route::Calendar(CalendarTarget::Definition));
            }
        });
        error_label(ui, &self.error);
        ui.add_space(8.0);

        if self.pending.is_some() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading vocabularies...");
            });
            return route;
        }

        let Some(current) = self.walker.current() else {
            empty_label(ui, cx, "No vocabularies available.");
            return route;
        };

        ui.label(format!("{} / {}", self.walker.current_index() + 1, self.walker.total()));
        ui.label(cx.theme.spelling(ui.ctx(), &current.spelling));

        if self.walker.show_details {
            ui.add_space(6.0);
            egui::Grid::new("definition_details").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                for (label, value) in [
                    ("Stem", &current.stem),
                    ("Pronunciation", &current.pronunciation),
                    ("Definition", &current.definition),
                    ("Example", &current.example),
                ] {
                    ui.label(label);
                    ui.label(value.as_deref().unwrap_or("-"));
                    ui.end_row();
                }
            });
        }

        ui.add_space(8.0);
        let spelling = current.spelling.clone();
        ui.horizontal(|ui| {
            if ui.button("Play").clicked() {
                say(cx.speaker, &spelling);
            }
            let details = if self.walker.show_details { "Hide" } else { "Show" };
            if ui.button(details).clicked() {
                self.walker.show_details = !self.walker.show_details;
            }
            if ui.add_enabled(self.walker.can_advance(), egui::Button::new("Next")).clicked() {
                self.walker.next();
            }
        });

        cx.speak(self.walker.take_pending_speech());
        route
    }
}
