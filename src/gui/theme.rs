use eframe::egui::{
    self,
    RichText,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Theme { dark: Palette::dracula(), light: Palette::dracula_light() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).purple).strong()
    }

    pub fn spelling(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).orange).size(28.0).strong()
    }

    pub fn correct(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).green
    }

    pub fn wrong(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).red
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).comment
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).cyan
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    foreground: Color32,
    selection: Color32,
    comment: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
    purple: Color32,
    cyan: Color32,
    background_darker: Color32,
    background_dark: Color32,
    background_light: Color32,
    background_lighter: Color32,
}

impl Palette {
    // https://github.com/ShabbirHasan1/egui_dracula/blob/master/src/lib.rs
    fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            background_darker: Color32::from_rgb(25, 26, 33),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
            background_lighter: Color32::from_rgb(66, 69, 80),
        }
    }

    fn dracula_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 242),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 200, 220),
            comment: Color32::from_rgb(120, 130, 160),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 150, 90),
            green: Color32::from_rgb(60, 160, 90),
            purple: Color32::from_rgb(150, 120, 220),
            cyan: Color32::from_rgb(80, 190, 230),
            background_darker: Color32::from_rgb(235, 235, 230),
            background_dark: Color32::from_rgb(245, 245, 240),
            background_light: Color32::from_rgb(255, 255, 250),
            background_lighter: Color32::from_rgb(255, 255, 255),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_visuals(ctx, &theme.dark, true);
    set_visuals(ctx, &theme.light, false);
}

pub fn apply_dark_mode(ctx: &egui::Context, dark_mode: bool) {
    let (theme, preference) = if dark_mode {
        (egui::Theme::Dark, egui::ThemePreference::Dark)
    } else {
        (egui::Theme::Light, egui::ThemePreference::Light)
    };
    ctx.set_theme(theme);
    ctx.options_mut(|o| o.theme_preference = preference);
}

fn widget(base: WidgetVisuals, palette: &Palette, bg_fill: Color32, border: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill,
        weak_bg_fill: palette.background_lighter,
        bg_stroke: Stroke { color: border, ..base.bg_stroke },
        fg_stroke: Stroke { color: palette.foreground, ..base.fg_stroke },
        ..base
    }
}

fn set_visuals(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };
    let base = default.widgets.clone();

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    base.noninteractive,
                    palette,
                    palette.background,
                    palette.background_dark,
                ),
                inactive: widget(base.inactive, palette, palette.background_light, palette.background_dark),
                hovered: widget(base.hovered, palette, palette.selection, palette.cyan),
                active: widget(base.active, palette, palette.selection, palette.cyan),
                open: widget(base.open, palette, palette.background_dark, palette.purple),
            },
            selection: Selection {
                bg_fill: palette.selection,
                stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
            },
            hyperlink_color: palette.cyan,
            faint_bg_color: if is_dark { palette.background_darker } else { palette.background_light },
            extreme_bg_color: palette.background_darker,
            code_bg_color: palette.background_dark,
            error_fg_color: palette.red,
            warn_fg_color: palette.orange,
            window_shadow: Shadow { color: palette.background_darker, ..default.window_shadow },
            window_fill: palette.background,
            window_stroke: Stroke { color: palette.background_light, ..default.window_stroke },
            panel_fill: palette.background_dark,
            popup_shadow: Shadow { color: palette.background_dark, ..default.popup_shadow },
            ..default
        },
    );
}
