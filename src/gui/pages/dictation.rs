use eframe::egui;
use tracing::info;

use super::{
    answers,
    empty_label,
    error_label,
    PageContext,
    Route,
};
use crate::{
    quiz::{
        AnswerOutcome,
        DictationSession,
        QuizSource,
        SaveState,
        SessionState,
    },
    speech::say,
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

/// One dictation page for every item source.
pub struct DictationPage {
    source: QuizSource,
    session: DictationSession,
    pending_load: Option<RequestId>,
    pending_save: Option<RequestId>,
    error: Option<String>,
    show_details: bool,
    last_outcome: Option<AnswerOutcome>,
}

impl DictationPage {
    pub fn open(source: QuizSource, cx: &mut PageContext) -> Self {
        info!(source = %source.key(), "starting dictation");
        Self {
            source,
            session: DictationSession::default(),
            pending_load: Some(cx.tasks.load_items(source)),
            pending_save: None,
            error: None,
            show_details: false,
            last_outcome: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn handle(&mut self, result: TaskResult, cx: &mut PageContext) {
        if answers(&mut self.pending_load, &result) {
            if let TaskPayload::Items(items) = result.payload {
                match items {
                    Ok(items) => self.session.start(items),
                    Err(e) => {
                        self.session.start(Vec::new());
                        self.error = Some(e);
                    }
                }
            }
        } else if answers(&mut self.pending_save, &result) {
            if let TaskPayload::Mutated { result, .. } = result.payload {
                self.session.finish_save(result);
            }
        }
        cx.speak(self.session.take_pending_speech());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        let title = match self.source {
            QuizSource::ByDate(date) => format!("{} ({})", self.source.title(), date.format("%A, %B %-d, %Y")),
            _ => self.source.title().to_string(),
        };
        ui.heading(cx.theme.heading(ui.ctx(), &title));
        ui.add_space(6.0);
        error_label(ui, &self.error);

        self.stats(ui);
        ui.add_space(8.0);

        if self.session.state() == SessionState::Empty {
            if !self.is_loading() {
                empty_label(ui, cx, "No vocabularies available.");
            }
            return None;
        }

        self.fields(ui, cx);
        ui.add_space(8.0);
        self.actions(ui, cx);

        if let SaveState::Failed(e) = self.session.save_state() {
            ui.colored_label(ui.visuals().error_fg_color, format!("Error: {}", e));
        }

        cx.speak(self.session.take_pending_speech());
        None
    }

    fn stats(&self, ui: &mut egui::Ui) {
        let current = match self.session.state() {
            SessionState::Empty => 0,
            _ => self.session.current_index() + 1,
        };
        ui.horizontal(|ui| {
            for (label, value) in [
                ("Total", self.session.total()),
                ("Current", current),
                ("Correct", self.session.correct_count()),
            ] {
                ui.group(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.small(label);
                        ui.strong(value.to_string());
                    });
                });
            }
        });
    }

    fn fields(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) {
        let locked = self.session.is_input_locked();

        ui.horizontal(|ui| {
            ui.label("Spelling");
            let response = ui.add_enabled(
                !locked,
                egui::TextEdit::singleline(&mut self.session.input).desired_width(280.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                let input = self.session.input.clone();
                let outcome = self.session.submit_answer(&input);
                if outcome != AnswerOutcome::Ignored {
                    self.last_outcome = Some(outcome);
                }
                response.request_focus();
            }
        });

        match self.last_outcome {
            Some(AnswerOutcome::Wrong) => {
                ui.colored_label(cx.theme.wrong(ui.ctx()), "Wrong, try again.");
            }
            Some(AnswerOutcome::Correct { .. }) if self.session.state() == SessionState::Finished => {
                ui.colored_label(cx.theme.correct(ui.ctx()), "Correct! That was the last one.");
            }
            _ => {}
        }

        let Some(current) = self.session.current() else {
            return;
        };

        if self.session.is_revealed() {
            ui.horizontal(|ui| {
                ui.label("Answer");
                ui.label(cx.theme.spelling(ui.ctx(), &current.spelling));
            });
        }

        if self.show_details {
            egui::Grid::new("dictation_details").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
                for (label, value) in [
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
    }

    fn actions(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) {
        ui.horizontal(|ui| {
            if ui.button("Play").clicked() {
                if let Some(current) = self.session.current() {
                    say(cx.speaker, &current.spelling);
                }
            }
            if ui.button("Answer").clicked() {
                self.session.reveal();
            }
            let details = if self.show_details { "Hide" } else { "Show" };
            if ui.button(details).clicked() {
                self.show_details = !self.show_details;
            }
            if ui.add_enabled(self.session.can_advance(), egui::Button::new("Next")).clicked() {
                self.session.advance();
                self.last_outcome = None;
            }

            let saving = matches!(self.session.save_state(), SaveState::Saving);
            let label = match self.session.save_state() {
                SaveState::Saving => "Saving...",
                SaveState::Saved => "Saved",
                _ => "Save",
            };
            if ui.add_enabled(self.session.can_save(), egui::Button::new(label)).clicked() {
                if let Some(items) = self.session.begin_save() {
                    self.pending_save = Some(cx.tasks.save_session(items));
                }
            }
            if saving {
                ui.add(egui::Spinner::new());
            }
        });
    }
}
