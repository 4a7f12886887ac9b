use eframe::egui;

use crate::settings::Settings;

pub struct SettingsModal {
    open: bool,
    original: Settings,
    draft: Settings,
    speech_args: String,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            original: Settings::default(),
            draft: Settings::default(),
            speech_args: String::new(),
        }
    }

    pub fn open_settings(&mut self, current: Settings) {
        self.speech_args = current.speech_args.join(" ");
        self.original = current.clone();
        self.draft = current;
        self.open = true;
    }

    fn is_dirty(&self) -> bool {
        self.collected() != self.original
    }

    fn collected(&self) -> Settings {
        let mut settings = self.draft.clone();
        settings.speech_args = self.speech_args.split_whitespace().map(str::to_string).collect();
        settings.speech_command = settings
            .speech_command
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        settings.validated()
    }

    /// Returns the new settings when the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Settings> {
        if !self.open {
            return None;
        }

        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Backend URL");
                ui.add(egui::TextEdit::singleline(&mut self.draft.api_base_url).desired_width(300.0));
                ui.end_row();

                ui.label("List page size");
                ui.add(egui::DragValue::new(&mut self.draft.list_page_size).range(1..=100));
                ui.end_row();

                ui.label("Speech command");
                let mut command = self.draft.speech_command.clone().unwrap_or_default();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut command)
                            .hint_text("e.g. espeak")
                            .desired_width(300.0),
                    )
                    .changed()
                {
                    self.draft.speech_command = Some(command);
                }
                ui.end_row();

                ui.label("Speech arguments");
                ui.add(egui::TextEdit::singleline(&mut self.speech_args).desired_width(300.0));
                ui.end_row();
            });

            ui.add_space(10.0);
            ui.separator();

            let is_dirty = self.is_dirty();
            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(ui.visuals().warn_fg_color, "⚠");
                    ui.label("Settings have been modified");
                }
            });
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(is_dirty, egui::Button::new("Save Settings")).clicked() {
                    result = Some(self.collected());
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    ui.close();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Restore Default").clicked() {
                        let defaults = Settings { dark_mode: self.draft.dark_mode, ..Settings::default() };
                        self.speech_args.clear();
                        self.draft = defaults;
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
