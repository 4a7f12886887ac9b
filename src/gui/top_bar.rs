use eframe::egui;

use crate::{
    gui::pages::{
        CalendarTarget,
        Route,
    },
    quiz::QuizSource,
};

pub enum TopBarAction {
    Navigate(Route),
    OpenSettings,
    ToggleDarkMode,
}

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, base_url: &str, dark_mode: bool) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let theme_icon = if dark_mode { "🌙" } else { "☀" };
                if ui.button(theme_icon).on_hover_text("Toggle dark mode").clicked() {
                    action = Some(TopBarAction::ToggleDarkMode);
                }

                ui.menu_button("Vocabulary", |ui| {
                    if ui.button("List").clicked() {
                        action = Some(TopBarAction::Navigate(Route::List));
                    }
                    if ui.button("Add").clicked() {
                        action = Some(TopBarAction::Navigate(Route::Add));
                    }
                    if ui.button("Capture").clicked() {
                        action = Some(TopBarAction::Navigate(Route::Capture));
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Practice", |ui| {
                    if ui.button("Dictation by date").clicked() {
                        action = Some(calendar(CalendarTarget::Dictation));
                    }
                    if ui.button(QuizSource::Failed.title()).clicked() {
                        action = Some(TopBarAction::Navigate(Route::Dictation(QuizSource::Failed)));
                    }
                    if ui.button(QuizSource::TnPlus.title()).clicked() {
                        action = Some(TopBarAction::Navigate(Route::Dictation(QuizSource::TnPlus)));
                    }
                    ui.separator();
                    if ui.button("Similar spelling").clicked() {
                        action = Some(calendar(CalendarTarget::Similar));
                    }
                    if ui.button("Definition").clicked() {
                        action = Some(calendar(CalendarTarget::Definition));
                    }
                    if ui.button("Review").clicked() {
                        action = Some(calendar(CalendarTarget::Review));
                    }
                });

                if ui.button("Settings").clicked() {
                    action = Some(TopBarAction::OpenSettings);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(base_url).on_hover_text("Backend");
                });
            });
        });

        action
    }
}

fn calendar(target: CalendarTarget) -> TopBarAction {
    TopBarAction::Navigate(Route::Calendar(target))
}
