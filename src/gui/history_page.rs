use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};
use rfd::FileDialog;

use super::{
    confirm_modal::ConfirmModal,
    error_banner::ErrorBanner,
    theme::Theme,
};
use crate::{
    core::utils::format_timestamp,
    history::{
        matches_search,
        ExtractionRecord,
        HistoryStore,
        MAX_ENTRIES,
    },
};

pub struct HistoryPage {
    records: Vec<ExtractionRecord>,
    load_error: Option<String>,
    search: String,
    banner: ErrorBanner,
    confirm_delete: ConfirmModal,
    pending_delete: Option<String>,
    confirm_clear: ConfirmModal,
}

impl HistoryPage {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            load_error: None,
            search: String::new(),
            banner: ErrorBanner::default(),
            confirm_delete: ConfirmModal::new("confirm_delete_record"),
            pending_delete: None,
            confirm_clear: ConfirmModal::new("confirm_clear_history"),
        }
    }

    /// Reloads from disk. A read failure is kept as a distinct "history
    /// unavailable" state rather than being shown as an empty list.
    pub fn refresh(&mut self, store: &HistoryStore) {
        match store.list() {
            Ok(records) => {
                self.records = records;
                self.load_error = None;
            }
            Err(e) => {
                self.records = Vec::new();
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Returns a record the user wants to view in the result page.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        store: &HistoryStore,
    ) -> Option<ExtractionRecord> {
        self.handle_confirmations(ui.ctx(), store);

        ui.heading("Processing History");
        ui.label(theme.subtle(
            ui.ctx(),
            &format!("{} of {} retained documents", self.records.len(), MAX_ENTRIES),
        ));
        ui.add_space(8.0);

        self.banner.show(ui, theme);

        if let Some(reason) = self.load_error.clone() {
            self.show_unavailable(ui, theme, &reason, store);
            return None;
        }

        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search by patient name, facility, file number, or job ID…")
                    .desired_width(420.0),
            );
            if !self.search.is_empty() && ui.small_button("✖").clicked() {
                self.search.clear();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.records.is_empty() && ui.button("🗑 Clear All History").clicked() {
                    self.confirm_clear
                        .request("Delete the entire extraction history? This cannot be undone.");
                }
            });
        });
        ui.add_space(8.0);

        if self.records.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(theme.subtle(ui.ctx(), "No processed documents yet."));
            });
            return None;
        }

        let visible: Vec<ExtractionRecord> = self
            .records
            .iter()
            .filter(|record| matches_search(record, &self.search))
            .cloned()
            .collect();

        if visible.is_empty() {
            ui.label(theme.subtle(ui.ctx(), "No records match the current search."));
            return None;
        }

        self.show_table(ui, theme, &visible)
    }

    fn show_table(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        visible: &[ExtractionRecord],
    ) -> Option<ExtractionRecord> {
        let mut open_record = None;
        let text_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(130.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(150.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder())
            .header(25.0, |mut header| {
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Date"));
                });
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Patient"));
                });
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Referred To"));
                });
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Job ID"));
                });
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Referral"));
                });
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Actions"));
                });
            })
            .body(|mut body| {
                body.rows(text_height, visible.len(), |mut row| {
                    let record = &visible[row.index()];
                    let extracted = &record.result.extracted;

                    row.col(|ui| {
                        ui.label(format_timestamp(&record.timestamp));
                    });
                    row.col(|ui| {
                        ui.label(extracted.patient.full_name.as_deref().unwrap_or("–"));
                    });
                    row.col(|ui| {
                        ui.label(extracted.referral.referral_to.as_deref().unwrap_or("–"));
                    });
                    row.col(|ui| {
                        ui.label(egui::RichText::new(&record.result.job_id).monospace().small());
                    });
                    row.col(|ui| {
                        match &record.result.classification {
                            Some(c) if c.is_referral => {
                                ui.label(
                                    egui::RichText::new(format!("✔ {:.0}%", c.confidence * 100.0))
                                        .color(theme.ok(ui.ctx())),
                                );
                            }
                            Some(_) => {
                                ui.label(egui::RichText::new("✖").color(theme.warn(ui.ctx())));
                            }
                            None => {
                                ui.label("–");
                            }
                        };
                    });
                    row.col(|ui| {
                        if ui.small_button("👁 View").clicked() {
                            open_record = Some(record.clone());
                        }
                        if ui.small_button("⬇ JSON").clicked() {
                            self.download_record(record);
                        }
                        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                            self.pending_delete = Some(record.id.clone());
                            self.confirm_delete.request(format!(
                                "Delete the record for job {}?",
                                record.result.job_id
                            ));
                        }
                    });
                });
            });

        open_record
    }

    fn handle_confirmations(&mut self, ctx: &egui::Context, store: &HistoryStore) {
        if let Some(confirmed) = self.confirm_delete.show(ctx) {
            let pending = self.pending_delete.take();
            if confirmed {
                if let Some(id) = pending {
                    if let Err(e) = store.delete_by_id(&id) {
                        self.banner.set(format!("Failed to delete record: {}", e));
                    }
                    self.refresh(store);
                }
            }
        }

        if let Some(confirmed) = self.confirm_clear.show(ctx) {
            if confirmed {
                if let Err(e) = store.clear() {
                    self.banner.set(format!("Failed to clear history: {}", e));
                }
                self.refresh(store);
            }
        }
    }

    fn show_unavailable(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        reason: &str,
        store: &HistoryStore,
    ) {
        let warn = theme.warn(ui.ctx());
        egui::Frame::group(ui.style())
            .fill(warn.gamma_multiply(0.10))
            .stroke(egui::Stroke::new(1.0, warn))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("History unavailable").color(warn).strong());
                ui.label(theme.subtle(ui.ctx(), reason));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Retry").clicked() {
                        self.refresh(store);
                    }
                    if ui.button("Discard stored history").clicked() {
                        self.confirm_clear.request(
                            "Discard the unreadable history file? New extractions will start a fresh history.",
                        );
                    }
                });
            });
    }

    fn download_record(&mut self, record: &ExtractionRecord) {
        let file_name = format!("referral_{}.json", record.result.job_id);
        let Some(path) = FileDialog::new().set_file_name(&file_name).save_file() else {
            return;
        };

        let write = serde_json::to_string_pretty(&record.result.extracted)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        if let Err(e) = write {
            self.banner.set(format!("Failed to save JSON: {}", e));
        }
    }
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self::new()
    }
}
