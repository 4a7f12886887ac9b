use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};
use tracing::info;

use super::{
    answers,
    empty_label,
    error_label,
    PageContext,
    Route,
};
use crate::{
    gui::confirm_modal::ConfirmModal,
    paging::{
        PageRequest,
        PageState,
    },
    tasks::{
        Mutation,
        RequestId,
        TaskPayload,
        TaskResult,
    },
};

pub struct ListPage {
    state: PageState,
    pending: Option<RequestId>,
    pending_delete: Option<RequestId>,
    error: Option<String>,
    confirm_delete: ConfirmModal<i64>,
}

impl ListPage {
    pub fn open(cx: &mut PageContext) -> Self {
        let mut page = Self {
            state: PageState::new(cx.page_size),
            pending: None,
            pending_delete: None,
            error: None,
            confirm_delete: ConfirmModal::new("confirm_delete_modal"),
        };
        let request = page.state.initial_request();
        page.request(request, cx);
        page
    }

    fn request(&mut self, request: PageRequest, cx: &mut PageContext) {
        self.error = None;
        self.pending = Some(match request {
            PageRequest::Page(page) => cx.tasks.load_page(page, self.state.page_size()),
            PageRequest::Search(term) => cx.tasks.search(term),
        });
    }

    pub fn handle(&mut self, result: TaskResult, cx: &mut PageContext) {
        if answers(&mut self.pending, &result) {
            match result.payload {
                TaskPayload::Page { page, result: Ok(paged) } => self.state.apply_page(page, paged),
                TaskPayload::Search(Ok(items)) => self.state.apply_search(items),
                TaskPayload::Page { result: Err(e), .. } | TaskPayload::Search(Err(e)) => {
                    self.state.clear_items();
                    self.error = Some(e);
                }
                _ => {}
            }
        } else if answers(&mut self.pending_delete, &result) {
            if let TaskPayload::Mutated { kind: Mutation::Delete, result } = result.payload {
                match result {
                    Ok(()) => {
                        let request = self.state.page_after_delete();
                        self.request(request, cx);
                    }
                    Err(e) => self.error = Some(e),
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, cx: &mut PageContext) -> Option<Route> {
        let mut route = None;
        let busy = self.pending.is_some() || self.pending_delete.is_some();

        ui.horizontal(|ui| {
            ui.heading(cx.theme.heading(ui.ctx(), "Vocabulary List"));
            if busy {
                ui.add(egui::Spinner::new());
            }
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.search_input)
                    .hint_text("Search spelling")
                    .desired_width(240.0),
            );
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || entered {
                let request = self.state.submit_search();
                self.request(request, cx);
            }
            if ui.button("Add").clicked() {
                route = Some(Route::Add);
            }
        });

        error_label(ui, &self.error);
        ui.add_space(6.0);

        if self.state.items().is_empty() && !busy {
            empty_label(ui, cx, "No vocabulary found.");
        } else if let Some(target) = self.table(ui) {
            match target {
                RowAction::Edit(id) => route = Some(Route::Edit(id)),
                RowAction::Delete(id, spelling) => self
                    .confirm_delete
                    .ask(id, format!("Are you sure you want to delete \"{}\"?", spelling)),
            }
        }

        if self.state.show_pagination() {
            ui.add_space(8.0);
            if let Some(request) = self.pagination(ui) {
                self.request(request, cx);
            }
        } else if self.state.is_searching() {
            ui.small(format!("{} result(s)", self.state.total_records()));
        }

        if let Some(id) = self.confirm_delete.show(ui.ctx()) {
            info!(id, "deleting vocabulary");
            self.pending_delete = Some(cx.tasks.delete(id));
        }

        route
    }

    fn table(&self, ui: &mut egui::Ui) -> Option<RowAction> {
        let mut action = None;
        let row_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder().at_least(200.0).clip(true))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(110.0))
            .header(24.0, |mut header| {
                for title in ["Spelling", "Definition", "Test", "S / F / A", "Last", "Actions"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for item in self.state.items() {
                    body.row(row_height, |mut row| {
                        row.col(|ui| {
                            ui.strong(&item.spelling);
                        });
                        row.col(|ui| {
                            ui.label(item.definition_text().unwrap_or("-"));
                        });
                        row.col(|ui| {
                            ui.label(item.need_test.as_deref().unwrap_or("-"));
                        });
                        row.col(|ui| {
                            ui.label(format!(
                                "{} / {} / {}",
                                item.success_total, item.fail_total, item.attempt
                            ));
                        });
                        row.col(|ui| {
                            ui.label(item.last_result.map(|r| r.as_str()).unwrap_or("-"));
                        });
                        row.col(|ui| {
                            let Some(id) = item.id else {
                                return;
                            };
                            if ui.small_button("Edit").clicked() {
                                action = Some(RowAction::Edit(id));
                            }
                            if ui.small_button("Delete").clicked() {
                                action = Some(RowAction::Delete(id, item.spelling.clone()));
                            }
                        });
                    });
                }
            });

        action
    }

    fn pagination(&self, ui: &mut egui::Ui) -> Option<PageRequest> {
        let mut request = None;
        let current = self.state.current_page();
        let window = self.state.page_window();

        ui.horizontal(|ui| {
            if ui.add_enabled(self.state.previous().is_some(), egui::Button::new("◀")).clicked() {
                request = self.state.previous();
            }
            if window.show_first && ui.button("1").clicked() {
                request = self.state.go_to(1);
            }
            if window.leading_ellipsis {
                ui.label("…");
            }
            for page in &window.pages {
                if ui.selectable_label(*page == current, page.to_string()).clicked() {
                    request = self.state.go_to(*page);
                }
            }
            if window.trailing_ellipsis {
                ui.label("…");
            }
            let last = self.state.total_pages();
            if window.show_last && ui.button(last.to_string()).clicked() {
                request = self.state.go_to(last);
            }
            if ui.add_enabled(self.state.next().is_some(), egui::Button::new("▶")).clicked() {
                request = self.state.next();
            }
            ui.small(format!("{} word(s)", self.state.total_records()));
        });

        request
    }
}

enum RowAction {
    Edit(i64),
    Delete(i64, String),
}
