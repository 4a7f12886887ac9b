use eframe::egui;

use super::{
    answers,
    PageContext,
    Route,
};
use crate::{
    core::{
        models::selected_for_upsert,
        CaptureCandidate,
    },
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

pub struct CapturePage {
    text: String,
    candidates: Vec<CaptureCandidate>,
    pending_capture: Option<RequestId>,
    pending_save: Option<RequestId>,
    error: Option<String>,
    save_error: Option<String>,
    saved_count: Option<usize>,
    last_save_size: usize,
}

impl CapturePage {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            candidates: Vec::new(),
            pending_capture: None,
            pending_save: None,
            error: None,
            save_error: None,
            saved_count: None,
            last_save_size: 0,
        }
    }

    pub fn handle(&mut self, result: TaskResult) {
        if answers(&mut self.pending_capture, &result) {
            if let TaskPayload::Captured(captured) = result.payload {
                match captured {
                    Ok(candidates) => self.candidates = candidates,
                    Err(e) => self.error = Some(e),
                }
            }
        } else if answers(&mut self.pending_save, &result) {
            if let TaskPayload::Mutated { result, .. } = result.payload {
                match result {
                    Ok(()) => self.saved_count = Some(self.last_save_size),
                    Err(e) => self.save_error = Some(e),
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        ui.heading(cx.theme.heading(ui.ctx(), "Capture"));
        ui.add_space(6.0);

        ui.add(
            egui::TextEdit::multiline(&mut self.text)
                .hint_text("Paste or type vocabularies here...")
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );

        let capturing = self.pending_capture.is_some();
        let saving = self.pending_save.is_some();

        ui.horizontal(|ui| {
            let process = if capturing { "Processing..." } else { "Process" };
            if ui.add_enabled(!capturing, egui::Button::new(process)).clicked() {
                self.process(cx);
            }
            let save = if saving { "Saving..." } else { "Save" };
            let can_save = !saving && !self.candidates.is_empty();
            if ui.add_enabled(can_save, egui::Button::new(save)).clicked() {
                self.save(cx);
            }
        });

        for error in [&self.error, &self.save_error].into_iter().flatten() {
            ui.colored_label(ui.visuals().error_fg_color, format!("Error: {}", error));
        }
        if let Some(count) = self.saved_count {
            ui.colored_label(cx.theme.correct(ui.ctx()), format!("Saved {} word(s).", count));
        }

        ui.add_space(8.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, candidate) in self.candidates.iter_mut().enumerate() {
                candidate_card(ui, index, candidate);
            }
        });

        None
    }

    fn process(&mut self, cx: &mut PageContext) {
        let text = self.text.trim();
        if text.is_empty() {
            return;
        }
        self.error = None;
        self.saved_count = None;
        self.candidates.clear();
        self.pending_capture = Some(cx.tasks.capture(text.to_string()));
    }

    fn save(&mut self, cx: &mut PageContext) {
        let rows = selected_for_upsert(&self.candidates);
        self.saved_count = None;
        if rows.is_empty() {
            self.save_error = Some("No items selected to save.".to_string());
            return;
        }
        self.save_error = None;
        self.last_save_size = rows.len();
        self.pending_save = Some(cx.tasks.upsert(rows));
    }
}

fn candidate_card(ui: &mut egui::Ui, index: usize, candidate: &mut CaptureCandidate) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.checkbox(&mut candidate.add, "Add");
            ui.checkbox(&mut candidate.need_test, "Need test");
            ui.strong(&candidate.spelling);
        });
        egui::Grid::new(("capture_candidate", index)).num_columns(2).show(ui, |ui| {
            for (label, value) in [
                ("Spelling", &mut candidate.spelling),
                ("Stem", &mut candidate.stem),
                ("Pronunciation", &mut candidate.pronunciation),
                ("Definition", &mut candidate.definition),
                ("Example", &mut candidate.example),
            ] {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(value).desired_width(360.0));
                ui.end_row();
            }
        });
    });
    ui.add_space(4.0);
}
