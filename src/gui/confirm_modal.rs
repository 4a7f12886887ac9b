use eframe::egui;

/// Yes/No question attached to a pending value, e.g. the id of a row to delete.
pub struct ConfirmModal<T> {
    id: &'static str,
    pending: Option<(T, String)>,
}

impl<T: Clone> ConfirmModal<T> {
    pub fn new(id: &'static str) -> Self {
        Self { id, pending: None }
    }

    pub fn ask(&mut self, value: T, message: impl Into<String>) {
        self.pending = Some((value, message.into()));
    }

    /// Returns the pending value once the user confirms.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<T> {
        let (value, message) = self.pending.as_ref()?;

        let mut confirmed = None;
        let modal = egui::Modal::new(egui::Id::new(self.id)).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("?").size(24.0).color(ui.visuals().warn_fg_color));
                ui.label(egui::RichText::new(message).size(14.0));
            });

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Yes").clicked() {
                    confirmed = Some(value.clone());
                    ui.close();
                }
                if ui.button("No").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.pending = None;
        }

        confirmed
    }
}
