use eframe::egui;
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    error_modal::ErrorModal,
    message_overlay::MessageOverlay,
    pages::{
        Page,
        PageContext,
        Route,
    },
    settings_modal::SettingsModal,
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    api::VocabularyApi,
    core::VocabError,
    settings::Settings,
    speech::SharedSpeaker,
    tasks::TaskManager,
};

pub struct VocabApp {
    // Configuration
    settings: Settings,

    // UI State
    page: Page,
    theme: Theme,
    message_overlay: MessageOverlay,

    // Modals
    settings_modal: SettingsModal,
    error_modal: ErrorModal,

    // External Services
    speaker: SharedSpeaker,
    tasks: TaskManager,
}

impl VocabApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Result<Self, VocabError> {
        let api = VocabularyApi::new(&settings.api_base_url)?;
        let mut tasks = TaskManager::new(api)?.with_repaint(cc.egui_ctx.clone());
        let speaker = settings.speaker();
        let theme = Theme::dracula();

        set_theme(&cc.egui_ctx, &theme);
        apply_dark_mode(&cc.egui_ctx, settings.dark_mode);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        let page = Page::open(
            Route::List,
            &mut PageContext {
                tasks: &mut tasks,
                speaker: &speaker,
                theme: &theme,
                page_size: settings.list_page_size,
            },
        );

        info!(base_url = %settings.api_base_url, speech = speaker.is_some(), "app started");

        Ok(Self {
            settings,
            page,
            theme,
            message_overlay: MessageOverlay::new(),
            settings_modal: SettingsModal::new(),
            error_modal: ErrorModal::new(),
            speaker,
            tasks,
        })
    }

    fn navigate(&mut self, route: Route) {
        debug!(?route, "navigate");
        self.page = Page::open(
            route,
            &mut PageContext {
                tasks: &mut self.tasks,
                speaker: &self.speaker,
                theme: &self.theme,
                page_size: self.settings.list_page_size,
            },
        );
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            warn!("Failed to save settings: {}", e);
            self.error_modal.show_error("Settings", format!("Failed to save settings: {}", e));
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        let api = match VocabularyApi::new(&settings.api_base_url) {
            Ok(api) => api,
            Err(e) => {
                self.error_modal.show_error("Settings", format!("Invalid backend: {}", e));
                return;
            }
        };
        info!(base_url = %settings.api_base_url, "settings changed");

        self.tasks.set_api(api);
        self.speaker = settings.speaker();
        self.settings = settings;
        self.save_settings();
        self.navigate(Route::List);
    }

    fn handle_top_bar(&mut self, action: TopBarAction, ctx: &egui::Context) {
        match action {
            TopBarAction::Navigate(route) => self.navigate(route),
            TopBarAction::OpenSettings => self.settings_modal.open_settings(self.settings.clone()),
            TopBarAction::ToggleDarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
                apply_dark_mode(ctx, self.settings.dark_mode);
                self.save_settings();
            }
        }
    }
}

impl eframe::App for VocabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.tasks.poll_results() {
            self.page.handle(
                result,
                &mut PageContext {
                    tasks: &mut self.tasks,
                    speaker: &self.speaker,
                    theme: &self.theme,
                    page_size: self.settings.list_page_size,
                },
            );
        }

        if let Some(action) =
            TopBar::show(ctx, self.tasks.api().base_url(), self.settings.dark_mode)
        {
            self.handle_top_bar(action, ctx);
        }

        let route = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    self.page.show(
                        ui,
                        &mut PageContext {
                            tasks: &mut self.tasks,
                            speaker: &self.speaker,
                            theme: &self.theme,
                            page_size: self.settings.list_page_size,
                        },
                    )
                })
                .inner
            })
            .inner;

        if let Some(route) = route {
            self.navigate(route);
        }

        match self.page.busy_message() {
            Some(message) => self.message_overlay.set_message(message),
            None => self.message_overlay.clear_message(),
        }
        self.message_overlay.show(ctx, &self.theme);

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }
        self.error_modal.show(ctx);
    }
}
