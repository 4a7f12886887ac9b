use std::collections::HashSet;

use chrono::{
    Datelike,
    Local,
    NaiveDate,
};
use eframe::egui;

use super::{
    answers,
    error_label,
    CalendarTarget,
    PageContext,
    Route,
};
use crate::{
    core::dates::{
        first_of_month,
        month_grid,
        parse_date_key,
        shift_months,
    },
    tasks::{
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const CELL_SIZE: egui::Vec2 = egui::Vec2::new(44.0, 32.0);

/// Month grid where only days that have updated words can be picked.
pub struct CalendarPage {
    target: CalendarTarget,
    view_month: NaiveDate,
    available: HashSet<NaiveDate>,
    pending: Option<RequestId>,
    error: Option<String>,
}

impl CalendarPage {
    pub fn open(target: CalendarTarget, cx: &mut PageContext) -> Self {
        Self {
            target,
            view_month: first_of_month(Local::now().date_naive()),
            available: HashSet::new(),
            pending: Some(cx.tasks.load_dates()),
            error: None,
        }
    }

    pub fn handle(&mut self, result: TaskResult) {
        if !answers(&mut self.pending, &result) {
            return;
        }
        if let TaskPayload::Dates(dates) = result.payload {
            match dates {
                Ok(dates) => {
                    self.available =
                        dates.iter().filter_map(|d| parse_date_key(d).ok()).collect();
                }
                Err(e) => self.error = Some(e),
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        ui.heading(cx.theme.heading(ui.ctx(), self.target.title()));

        let hint = if self.pending.is_some() {
            "Loading available dates..."
        } else {
            "Select a date from the available list."
        };
        ui.label(hint);
        error_label(ui, &self.error);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("<<").on_hover_text("Previous year").clicked() {
                self.view_month = shift_months(self.view_month, -12);
            }
            if ui.button("<").on_hover_text("Previous month").clicked() {
                self.view_month = shift_months(self.view_month, -1);
            }
            ui.strong(self.view_month.format("%B %Y").to_string());
            if ui.button(">").on_hover_text("Next month").clicked() {
                self.view_month = shift_months(self.view_month, 1);
            }
            if ui.button(">>").on_hover_text("Next year").clicked() {
                self.view_month = shift_months(self.view_month, 12);
            }
        });
        ui.add_space(6.0);

        let mut picked = None;
        egui::Grid::new("calendar_grid").spacing([4.0, 4.0]).show(ui, |ui| {
            for day in WEEKDAYS {
                ui.add_sized(CELL_SIZE, egui::Label::new(egui::RichText::new(day).strong()));
            }
            ui.end_row();

            for week in month_grid(self.view_month).chunks(7) {
                for cell in week {
                    match cell {
                        Some(date) => {
                            let enabled = self.available.contains(date);
                            let button = egui::Button::new(date.day().to_string());
                            if ui.add_enabled(enabled, button.min_size(CELL_SIZE)).clicked() {
                                picked = Some(*date);
                            }
                        }
                        None => {
                            ui.allocate_space(CELL_SIZE);
                        }
                    }
                }
                ui.end_row();
            }
        });

        picked.map(|date| self.target.route(date))
    }
}
