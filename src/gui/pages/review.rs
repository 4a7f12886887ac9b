use chrono::NaiveDate;
use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::{
    answers,
    empty_label,
    error_label,
    CalendarTarget,
    PageContext,
    Route,
};
use crate::{
    core::VocabularyItem,
    quiz::QuizSource,
    speech::say,
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

pub struct ReviewPage {
    date: NaiveDate,
    items: Vec<VocabularyItem>,
    pending: Option<RequestId>,
    error: Option<String>,
}

impl ReviewPage {
    pub fn open(date: NaiveDate, cx: &mut PageContext) -> Self {
        Self {
            date,
            items: Vec::new(),
            pending: Some(cx.tasks.load_items(QuizSource::ByDate(date))),
            error: None,
        }
    }

    pub fn handle(&mut self, result: TaskResult) {
        if !answers(&mut self.pending, &result) {
            return;
        }
        if let TaskPayload::Items(items) = result.payload {
            match items {
                Ok(items) => self.items = items,
                Err(e) => {
                    self.items.clear();
                    self.error = Some(e);
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        let mut route = None;

        ui.heading(cx.theme.heading(ui.ctx(), "Review"));
        ui.horizontal(|ui| {
            ui.label(format!("Selected: {}", self.date.format("%A, %B %-d, %Y")));
            if ui.small_button("Change Date").clicked() {
                route = Some(Route::Calendar(CalendarTarget::Review));
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
        if self.items.is_empty() {
            empty_label(ui, cx, "No vocabularies available.");
            return route;
        }

        let row_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(110.0))
                .column(Column::auto().at_least(90.0))
                .column(Column::initial(260.0).clip(true))
                .column(Column::initial(260.0).clip(true))
                .column(Column::auto().at_least(100.0))
                .column(Column::exact(40.0))
                .header(24.0, |mut header| {
                    for title in ["Spelling", "Stem", "Definition", "Example", "Pronunciation", ""] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, self.items.len(), |mut row| {
                        let item = &self.items[row.index()];
                        row.col(|ui| {
                            ui.strong(&item.spelling);
                        });
                        for value in [&item.stem, &item.definition, &item.example, &item.pronunciation] {
                            row.col(|ui| {
                                ui.label(value.as_deref().unwrap_or("-"));
                            });
                        }
                        row.col(|ui| {
                            if ui.small_button("🔊").on_hover_text("Play").clicked() {
                                say(cx.speaker, &item.spelling);
                            }
                        });
                    });
                });
        });

        route
    }
}
