use eframe::egui;
use tracing::info;

use super::{
    answers,
    error_label,
    PageContext,
    Route,
};
use crate::{
    core::{
        models::AttemptResult,
        NewVocabulary,
        VocabularyItem,
    },
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

enum FormMode {
    Add(NewVocabulary),
    Edit { id: i64, item: Option<VocabularyItem> },
}

/// Add and edit share one page: a grid of fields and a save button.
pub struct FormPage {
    mode: FormMode,
    pending_load: Option<RequestId>,
    pending_save: Option<RequestId>,
    error: Option<String>,
    saved: bool,
}

impl FormPage {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add(NewVocabulary::default()),
            pending_load: None,
            pending_save: None,
            error: None,
            saved: false,
        }
    }

    pub fn edit(id: i64, cx: &mut PageContext) -> Self {
        Self {
            mode: FormMode::Edit { id, item: None },
            pending_load: Some(cx.tasks.load_vocabulary(id)),
            pending_save: None,
            error: None,
            saved: false,
        }
    }

    pub fn handle(&mut self, result: TaskResult) {
        if answers(&mut self.pending_load, &result) {
            if let (FormMode::Edit { item, .. }, TaskPayload::Vocabulary(loaded)) =
                (&mut self.mode, result.payload)
            {
                match loaded {
                    Ok(loaded) => *item = Some(loaded),
                    Err(e) => self.error = Some(e),
                }
            }
        } else if answers(&mut self.pending_save, &result) {
            if let TaskPayload::Mutated { kind, result } = result.payload {
                match result {
                    Ok(()) => {
                        info!(?kind, "vocabulary saved");
                        self.saved = true;
                    }
                    Err(e) => self.error = Some(e),
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        if self.saved {
            return Some(Route::List);
        }

        let title = match self.mode {
            FormMode::Add(_) => "Add Vocabulary",
            FormMode::Edit { .. } => "Edit Vocabulary",
        };
        ui.heading(cx.theme.heading(ui.ctx(), title));
        ui.add_space(8.0);

        let loading = self.pending_load.is_some();
        let saving = self.pending_save.is_some();

        egui::ScrollArea::vertical().show(ui, |ui| match &mut self.mode {
            FormMode::Add(form) => add_fields(ui, form),
            FormMode::Edit { item: Some(item), .. } => edit_fields(ui, item),
            FormMode::Edit { item: None, .. } => {
                if loading {
                    ui.add(egui::Spinner::new());
                }
            }
        });

        ui.add_space(8.0);
        error_label(ui, &self.error);

        let mut route = None;
        ui.horizontal(|ui| {
            let can_save = !loading && !saving && self.has_content();
            if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                self.save(cx);
            }
            if ui.button("Cancel").clicked() {
                route = Some(Route::List);
            }
            if saving {
                ui.add(egui::Spinner::new());
            }
        });

        route
    }

    fn has_content(&self) -> bool {
        !matches!(self.mode, FormMode::Edit { item: None, .. })
    }

    fn save(&mut self, cx: &mut PageContext) {
        self.error = None;
        match &self.mode {
            FormMode::Add(form) => match form.missing_required() {
                Some(message) => self.error = Some(message.to_string()),
                None => self.pending_save = Some(cx.tasks.create(form.clone())),
            },
            FormMode::Edit { id, item: Some(item) } => {
                if item.spelling.trim().is_empty() {
                    self.error = Some("Spelling is required.".to_string());
                } else {
                    self.pending_save = Some(cx.tasks.update(*id, item.clone()));
                }
            }
            FormMode::Edit { item: None, .. } => {}
        }
    }
}

fn add_fields(ui: &mut egui::Ui, form: &mut NewVocabulary) {
    egui::Grid::new("add_vocabulary_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
        text_row(ui, "Spelling *", &mut form.spelling);
        text_row(ui, "Stem", &mut form.stem);
        text_row(ui, "Pronunciation", &mut form.pronunciation);
        multiline_row(ui, "Definition *", &mut form.definition);
        multiline_row(ui, "Example", &mut form.example);
        text_row(ui, "Need test", &mut form.need_test);
    });
}

fn edit_fields(ui: &mut egui::Ui, item: &mut VocabularyItem) {
    egui::Grid::new("edit_vocabulary_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
        text_row(ui, "Spelling *", &mut item.spelling);
        optional_row(ui, "Stem", &mut item.stem, false);
        optional_row(ui, "Pronunciation", &mut item.pronunciation, false);
        optional_row(ui, "Definition", &mut item.definition, true);
        optional_row(ui, "Example", &mut item.example, true);
        optional_row(ui, "Need test", &mut item.need_test, false);

        counter_row(ui, "Attempts", &mut item.attempt);
        counter_row(ui, "Successes", &mut item.success_total);
        counter_row(ui, "Failures", &mut item.fail_total);

        ui.label("Last result");
        egui::ComboBox::from_id_salt("last_result")
            .selected_text(item.last_result.map(|r| r.as_str()).unwrap_or("-"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut item.last_result, None, "-");
                ui.selectable_value(&mut item.last_result, Some(AttemptResult::Success), "SUCCESS");
                ui.selectable_value(&mut item.last_result, Some(AttemptResult::Fail), "FAIL");
            });
        ui.end_row();

        optional_row(ui, "Last attempt", &mut item.last_attempt, false);
        optional_row(ui, "Last correct", &mut item.last_correct, false);
        optional_row(ui, "Last fail", &mut item.last_fail, false);
        optional_row(ui, "Created", &mut item.created_date, false);
        optional_row(ui, "Updated", &mut item.updated_date, false);
    });
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(320.0));
    ui.end_row();
}

fn multiline_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::multiline(value).desired_width(320.0).desired_rows(3));
    ui.end_row();
}

fn optional_row(ui: &mut egui::Ui, label: &str, value: &mut Option<String>, multiline: bool) {
    let mut text = value.clone().unwrap_or_default();
    ui.label(label);
    let edit = if multiline {
        egui::TextEdit::multiline(&mut text).desired_rows(3)
    } else {
        egui::TextEdit::singleline(&mut text)
    };
    if ui.add(edit.desired_width(320.0)).changed() {
        *value = (!text.is_empty()).then_some(text);
    }
    ui.end_row();
}

fn counter_row(ui: &mut egui::Ui, label: &str, value: &mut u32) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).range(0..=u32::MAX));
    ui.end_row();
}
