use eframe::egui;
use rfd::FileDialog;

use super::{
    error_banner::ErrorBanner,
    preview::FilePreview,
    theme::Theme,
};
use crate::core::{
    models::{
        Classification,
        ReferralExtraction,
        TextStats,
    },
    utils::format_timestamp,
    ExtractionResult,
};

/// Viewer for one extraction result. Edits live in a transient copy of the
/// extracted payload; they feed the JSON export but are never written back to
/// the history store.
pub struct OutputPage {
    result: ExtractionResult,
    timestamp: Option<String>,
    edited: ReferralExtraction,
    edit_mode: bool,
    preview: Option<FilePreview>,
    banner: ErrorBanner,
}

impl OutputPage {
    pub fn new(
        result: ExtractionResult,
        timestamp: Option<String>,
        preview: Option<FilePreview>,
    ) -> Self {
        let edited = result.extracted.clone();
        Self { result, timestamp, edited, edit_mode: false, preview, banner: ErrorBanner::default() }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        self.banner.show(ui, theme);
        self.show_header(ui, theme);
        ui.add_space(8.0);

        if let Some(warning) = self.result.validation_warning.clone() {
            notice_frame(ui, theme.warn(ui.ctx()), &warning);
            ui.add_space(8.0);
        }

        if let Some(classification) = self.result.classification.clone() {
            self.show_classification(ui, theme, &classification);
            ui.add_space(8.0);
        }

        if let Some(stats) = self.result.text_stats {
            show_text_stats(ui, theme, &stats);
            ui.add_space(8.0);
        }

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.preview.is_some() {
                ui.columns(2, |columns| {
                    self.show_fields(&mut columns[0], theme);
                    if let Some(preview) = &self.preview {
                        preview.show(&mut columns[1], theme);
                    }
                });
            } else {
                self.show_fields(ui, theme);
            }
        });
    }

    fn show_header(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.horizontal(|ui| {
            ui.heading("Extraction Result");
            let mut meta = format!("Job {}", self.result.job_id);
            if let Some(timestamp) = &self.timestamp {
                meta.push_str(&format!(" · {}", format_timestamp(timestamp)));
            }
            ui.label(theme.subtle(ui.ctx(), &meta));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.edit_mode {
                    if ui.button("✔ Done").clicked() {
                        self.edit_mode = false;
                    }
                    if ui.button("↺ Discard Edits").clicked() {
                        self.edited = self.result.extracted.clone();
                        self.edit_mode = false;
                    }
                } else {
                    if ui.button("✏ Edit").clicked() {
                        self.edit_mode = true;
                    }
                }

                if ui.button("⬇ Download JSON").clicked() {
                    self.download_json();
                }
            });
        });
    }

    /// Saves the (possibly edited) extracted payload as pretty-printed JSON.
    fn download_json(&mut self) {
        let file_name = format!("referral_{}.json", self.result.job_id);
        let Some(path) = FileDialog::new().set_file_name(&file_name).save_file() else {
            return;
        };

        let write = serde_json::to_string_pretty(&self.edited)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        if let Err(e) = write {
            self.banner.set(format!("Failed to save JSON: {}", e));
        }
    }

    fn show_classification(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        classification: &Classification,
    ) {
        let (color, verdict) = if classification.is_referral {
            (theme.ok(ui.ctx()), "Classified as a medical referral")
        } else {
            (theme.warn(ui.ctx()), "Not classified as a medical referral")
        };

        egui::Frame::group(ui.style())
            .fill(color.gamma_multiply(0.10))
            .stroke(egui::Stroke::new(1.0, color))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(verdict).color(color).strong());
                    ui.label(theme.subtle(
                        ui.ctx(),
                        &format!("confidence {:.0}%", classification.confidence * 100.0),
                    ));
                });
                ui.label(theme.subtle(ui.ctx(), &classification.reason));

                if !classification.details.is_empty() {
                    ui.collapsing("Classifier details", |ui| {
                        egui::Grid::new("classifier_details").num_columns(2).show(ui, |ui| {
                            let mut counters: Vec<_> = classification.details.iter().collect();
                            counters.sort_by_key(|(name, _)| name.as_str());
                            for (name, count) in counters {
                                ui.label(name.replace('_', " "));
                                ui.label(count.to_string());
                                ui.end_row();
                            }
                            ui.label("score");
                            ui.label(classification.score.to_string());
                            ui.end_row();
                        });
                    });
                }
            });
    }

    fn show_fields(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let edit = self.edit_mode;
        let extracted = &mut self.edited;

        section(ui, theme, "Document", "document", |ui| {
            field_row(ui, edit, "Title", &mut extracted.document_meta.title);
            field_row(ui, edit, "Date", &mut extracted.document_meta.date);
            pages_row(ui, edit, &mut extracted.document_meta.pages);
        });

        section(ui, theme, "Referral To", "referral_to", |ui| {
            field_row(ui, edit, "Facility", &mut extracted.referral.referral_to);
            field_row(ui, edit, "Focal point", &mut extracted.referral.referral_focal_point);
            field_row(ui, edit, "Phone", &mut extracted.referral.referral_phone);
            field_row(ui, edit, "Location", &mut extracted.referral.referral_location);
            field_row(ui, edit, "Email", &mut extracted.referral.referral_email);
        });

        section(ui, theme, "Referring From", "referring_from", |ui| {
            field_row(ui, edit, "Facility", &mut extracted.referral.referring_from);
            field_row(ui, edit, "Focal point", &mut extracted.referral.referring_focal_point);
            field_row(ui, edit, "Phone", &mut extracted.referral.referring_phone);
            field_row(ui, edit, "Location", &mut extracted.referral.referring_location);
            field_row(ui, edit, "Email", &mut extracted.referral.referring_email);
        });

        section(ui, theme, "Patient", "patient", |ui| {
            field_row(ui, edit, "Full name", &mut extracted.patient.full_name);
            field_row(ui, edit, "Phone", &mut extracted.patient.phone);
            field_row(ui, edit, "Date of birth", &mut extracted.patient.date_of_birth);
            field_row(ui, edit, "Gender", &mut extracted.patient.gender);
            field_row(ui, edit, "Address", &mut extracted.patient.address);
            bool_row(
                ui,
                edit,
                "Accompanied by care provider",
                &mut extracted.patient.accompanied_by_care_provider,
            );
        });

        section(ui, theme, "Diagnoses & Treatment", "diagnoses", |ui| {
            list_row(ui, edit, "Primary diagnoses", &mut extracted.diagnoses.primary_diagnoses);
            list_row(ui, edit, "Other diagnoses", &mut extracted.diagnoses.other_diagnoses);
            list_row(ui, edit, "Treatments", &mut extracted.treatments);
            field_row(ui, edit, "Reason for referral", &mut extracted.reason_for_referral);
        });

        section(ui, theme, "Logistics & Follow-up", "logistics", |ui| {
            list_row(ui, edit, "Transportation needs", &mut extracted.transportation_needs);
            list_row(ui, edit, "Follow-up requirements", &mut extracted.follow_up_requirements);
        });

        if let Some(status) = &mut extracted.functional_status {
            section(ui, theme, "Functional Status", "functional_status", |ui| {
                field_row(ui, edit, "Mobility", &mut status.mobility);
                field_row(ui, edit, "Precautions", &mut status.precautions);
                field_row(ui, edit, "Self care", &mut status.self_care);
                field_row(ui, edit, "Cognitive impairment", &mut status.cognitive_impairment);
                list_row(ui, edit, "Devices provided", &mut status.assistive_devices_provided);
                list_row(ui, edit, "Devices required", &mut status.assistive_devices_required);
            });
        }

        section(ui, theme, "Administrative", "administrative", |ui| {
            field_row(ui, edit, "Compiled by", &mut extracted.compiled_by);
            field_row(ui, edit, "Position", &mut extracted.position);
            field_row(ui, edit, "Signature", &mut extracted.signature);
            field_row(ui, edit, "File number", &mut extracted.file_number);
        });
    }
}

fn section(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    id: &str,
    add_rows: impl FnOnce(&mut egui::Ui),
) {
    let heading = theme.heading(ui.ctx(), title);
    egui::CollapsingHeader::new(heading).id_salt(id).default_open(true).show(ui, |ui| {
        egui::Grid::new(format!("{id}_grid"))
            .num_columns(2)
            .spacing([24.0, 6.0])
            .min_col_width(140.0)
            .show(ui, add_rows);
    });
    ui.add_space(4.0);
}

fn field_row(ui: &mut egui::Ui, edit: bool, label: &str, value: &mut Option<String>) {
    ui.label(label);
    if edit {
        let mut buffer = value.clone().unwrap_or_default();
        if ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(280.0)).changed() {
            *value = if buffer.is_empty() { None } else { Some(buffer) };
        }
    } else {
        ui.label(value.as_deref().unwrap_or("–"));
    }
    ui.end_row();
}

/// One line per entry, matching how the backend returns list fields.
fn list_row(ui: &mut egui::Ui, edit: bool, label: &str, value: &mut Vec<String>) {
    ui.label(label);
    if edit {
        let mut buffer = value.join("\n");
        if ui.add(egui::TextEdit::multiline(&mut buffer).desired_rows(2).desired_width(280.0))
            .changed()
        {
            *value = buffer
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect();
        }
    } else if value.is_empty() {
        ui.label("–");
    } else {
        ui.vertical(|ui| {
            for entry in value.iter() {
                ui.label(format!("• {}", entry));
            }
        });
    }
    ui.end_row();
}

fn bool_row(ui: &mut egui::Ui, edit: bool, label: &str, value: &mut Option<bool>) {
    ui.label(label);
    if edit {
        let mut checked = value.unwrap_or(false);
        if ui.checkbox(&mut checked, "").changed() {
            *value = Some(checked);
        }
    } else {
        ui.label(match value {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "–",
        });
    }
    ui.end_row();
}

fn pages_row(ui: &mut egui::Ui, edit: bool, value: &mut Option<u32>) {
    ui.label("Pages");
    if edit {
        let mut buffer = value.map(|pages| pages.to_string()).unwrap_or_default();
        if ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(80.0)).changed() {
            *value = if buffer.is_empty() { None } else { buffer.parse().ok().or(*value) };
        }
    } else {
        ui.label(value.map(|pages| pages.to_string()).unwrap_or_else(|| "–".to_string()));
    }
    ui.end_row();
}

fn show_text_stats(ui: &mut egui::Ui, theme: &Theme, stats: &TextStats) {
    ui.horizontal(|ui| {
        ui.label(theme.subtle(ui.ctx(), "Extracted text:"));
        ui.label(format!("{} characters", stats.character_count));
        ui.label("·");
        ui.label(format!("{} words", stats.word_count));
    });
}

fn notice_frame(ui: &mut egui::Ui, color: egui::Color32, message: &str) {
    egui::Frame::group(ui.style())
        .fill(color.gamma_multiply(0.10))
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(message).color(color));
        });
}
