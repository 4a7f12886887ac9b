use std::time::Instant;

use chrono::NaiveDate;
use eframe::egui;
use tracing::info;

use super::{
    answers,
    empty_label,
    error_label,
    CalendarTarget,
    PageContext,
    Route,
};
use crate::{
    similar::{
        ChooseOutcome,
        SimilarQuiz,
    },
    speech::say,
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

pub struct SimilarPage {
    date: NaiveDate,
    quiz: SimilarQuiz,
    pending_build: Option<RequestId>,
    pending_lookups: Vec<RequestId>,
    error: Option<String>,
}

impl SimilarPage {
    pub fn open(date: NaiveDate, cx: &mut PageContext) -> Self {
        Self {
            date,
            quiz: SimilarQuiz::default(),
            pending_build: Some(cx.tasks.build_similar_quiz(date)),
            pending_lookups: Vec::new(),
            error: None,
        }
    }

    pub fn is_building(&self) -> bool {
        self.pending_build.is_some()
    }

    pub fn handle(&mut self, result: TaskResult, cx: &mut PageContext) {
        if answers(&mut self.pending_build, &result) {
            if let TaskPayload::SimilarQuiz(report) = result.payload {
                match report {
                    Ok(report) => {
                        info!(
                            questions = report.questions.len(),
                            skipped = report.skipped,
                            failed = report.failed,
                            "similar quiz ready"
                        );
                        self.quiz = SimilarQuiz::from_report(report);
                    }
                    Err(e) => self.error = Some(e),
                }
            }
        } else if let Some(position) =
            self.pending_lookups.iter().position(|id| *id == result.request_id)
        {
            self.pending_lookups.swap_remove(position);
            if let TaskPayload::Definitions { question_index, results } = result.payload {
                self.quiz.apply_definitions(question_index, results);
            }
        }
        cx.speak(self.quiz.take_pending_speech());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        let mut route = None;
        let now = Instant::now();
        self.quiz.tick(now);
        if let Some(due) = self.quiz.auto_advance_pending() {
            ui.ctx().request_repaint_after(due.saturating_duration_since(now));
        }

        ui.heading(cx.theme.heading(ui.ctx(), "Similar"));
        ui.horizontal(|ui| {
            ui.label(format!("Selected: {}", self.date.format("%A, %B %-d, %Y")));
            if ui.small_button("Change Date").clicked() {
                route = Some(Route::Calendar(CalendarTarget::Similar));
            }
        });
        error_label(ui, &self.error);
        ui.add_space(6.0);

        if self.is_building() {
            return route;
        }

        let current = if self.quiz.total() == 0 { 0 } else { self.quiz.current_index() + 1 };
        ui.horizontal(|ui| {
            for (label, value) in [
                ("Total", self.quiz.total()),
                ("Current", current),
                ("Correct", self.quiz.correct_count()),
            ] {
                ui.group(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.small(label);
                        ui.strong(value.to_string());
                    });
                });
            }
        });

        if let Some(warning) = self.quiz.warning() {
            ui.colored_label(ui.visuals().warn_fg_color, warning);
        }
        ui.add_space(6.0);

        if self.quiz.current().is_none() {
            empty_label(ui, cx, "No vocabularies available.");
            return route;
        }

        ui.label("Listen to the word and select the correct spelling.");
        self.controls(ui, cx);
        ui.add_space(6.0);
        self.options(ui, cx);
        ui.add_space(6.0);
        self.feedback(ui, cx);

        cx.speak(self.quiz.take_pending_speech());
        route
    }

    fn controls(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) {
        ui.horizontal(|ui| {
            if ui.button("Play").clicked() {
                if let Some(question) = self.quiz.current() {
                    say(cx.speaker, question.spelling());
                }
            }
            let answered_correctly = self.quiz.current_answer().is_some_and(|a| a.is_correct);
            if !answered_correctly
                && ui.add_enabled(self.quiz.can_go_next(), egui::Button::new("Next")).clicked()
            {
                self.quiz.next();
            }
        });
    }

    fn options(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) {
        let Some(question) = self.quiz.current() else {
            return;
        };
        let answer = self.quiz.current_answer();
        let answered = answer.is_some();

        let mut chosen = None;
        ui.horizontal_wrapped(|ui| {
            for option in &question.options {
                let mut text = egui::RichText::new(option);
                if answered && question.is_correct(option) {
                    text = text.color(cx.theme.correct(ui.ctx())).strong();
                } else if answer.is_some_and(|a| &a.selected == option) {
                    text = text.color(cx.theme.wrong(ui.ctx())).strikethrough();
                }
                if ui.add_enabled(!answered, egui::Button::new(text)).clicked() {
                    chosen = Some(option.clone());
                }
            }
        });

        let Some(option) = chosen else {
            return;
        };
        let index = self.quiz.current_index();
        if let ChooseOutcome::Wrong { lookups } = self.quiz.choose(&option, Instant::now()) {
            if !lookups.is_empty() {
                self.pending_lookups.push(cx.tasks.lookup_definitions(index, lookups));
            }
        }
    }

    fn feedback(&self, ui: &mut egui::Ui, cx: &PageContext) {
        let (Some(question), Some(answer)) = (self.quiz.current(), self.quiz.current_answer()) else {
            return;
        };
        if answer.is_correct {
            ui.colored_label(cx.theme.correct(ui.ctx()), "Correct.");
            return;
        }

        ui.colored_label(
            cx.theme.wrong(ui.ctx()),
            format!("Incorrect. Correct answer: {}", question.spelling()),
        );
        match self.quiz.current_wrong_details() {
            Some(details) if details.loading => {
                ui.weak("Loading definitions...");
            }
            Some(details) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label("Your choice definition:");
                    ui.colored_label(
                        cx.theme.wrong(ui.ctx()),
                        details.selected_definition.as_deref().unwrap_or("-"),
                    );
                });
                ui.horizontal_wrapped(|ui| {
                    ui.label("Correct definition:");
                    ui.colored_label(
                        cx.theme.correct(ui.ctx()),
                        details.correct_definition.as_deref().unwrap_or("-"),
                    );
                });
            }
            None => {}
        }
    }
}
