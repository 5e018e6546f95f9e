use std::path::Path;

use eframe::egui;
use rfd::FileDialog;

use super::{
    error_banner::ErrorBanner,
    theme::Theme,
};
use crate::core::{
    models::{
        SupportedFormats,
        MAX_UPLOAD_MB,
    },
    utils::format_file_size,
    SelectedFile,
};

pub struct UploadPage {
    selected: Option<SelectedFile>,
    uploading: bool,
    progress: u8,
    error: ErrorBanner,
    formats: SupportedFormats,
}

impl UploadPage {
    pub fn new() -> Self {
        Self {
            selected: None,
            uploading: false,
            progress: 0,
            error: ErrorBanner::default(),
            formats: SupportedFormats::default(),
        }
    }

    pub fn set_formats(&mut self, formats: SupportedFormats) {
        self.formats = formats;
    }

    /// Validates and stages a file picked by dialog or drag-and-drop.
    /// Validation failures land in the banner; nothing has left the machine.
    pub fn select_path(&mut self, path: &Path) {
        if self.uploading {
            return;
        }

        match SelectedFile::from_path(path) {
            Ok(file) => {
                self.error.clear();
                self.selected = Some(file);
            }
            Err(e) => {
                self.selected = None;
                self.error.set(e.to_string());
            }
        }
    }

    pub fn upload_started(&mut self) {
        self.uploading = true;
        self.progress = 0;
        self.error.clear();
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.progress = percent;
    }

    pub fn upload_failed(&mut self, message: String) {
        self.uploading = false;
        self.error.set(message);
    }

    pub fn upload_succeeded(&mut self) {
        self.uploading = false;
        self.selected = None;
        self.progress = 0;
    }

    /// Returns the staged file when the user asks to upload it.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<SelectedFile> {
        let mut start_upload = None;

        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("Upload Medical Referral Document");
            ui.label(theme.subtle(
                ui.ctx(),
                "PDF, image, text, or Word document — extracted with the configured AI backend",
            ));
            ui.add_space(16.0);
        });

        self.error.show(ui, theme);

        match self.selected.clone() {
            None => self.show_drop_zone(ui, theme),
            Some(file) => {
                if self.show_selected_file(ui, theme, &file) {
                    self.clear_selection();
                    return None;
                }

                if self.uploading {
                    self.show_progress(ui, theme);
                } else {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new(
                            egui::RichText::new("✔  Upload & Extract Data").size(16.0),
                        )
                        .min_size(egui::vec2(260.0, 40.0));
                        if ui.add(button).clicked() {
                            start_upload = Some(file);
                        }
                    });
                }
            }
        }

        start_upload
    }

    fn show_drop_zone(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let frame = egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.5, theme.accent(ui.ctx())))
            .inner_margin(egui::Margin::same(32));

        frame.show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(egui::RichText::new("📄").size(52.0));
                ui.add_space(8.0);
                ui.heading("Drop your file here");
                ui.label(theme.subtle(ui.ctx(), "or browse your files"));
                ui.add_space(12.0);

                if ui.button("Select File to Upload").clicked() {
                    let picked = FileDialog::new()
                        .add_filter("Documents", &["pdf", "txt", "docx", "doc"])
                        .add_filter("Images", &["jpg", "jpeg", "png"])
                        .pick_file();

                    if let Some(path) = picked {
                        self.select_path(&path);
                    }
                }

                ui.add_space(18.0);
                ui.separator();
                ui.add_space(6.0);
                ui.label(theme.subtle(
                    ui.ctx(),
                    &format!(
                        "Supported: {}   ·   Max {} MB",
                        self.formats.supported_formats.join(", "),
                        MAX_UPLOAD_MB
                    ),
                ));
                ui.add_space(16.0);
            });
        });
    }

    fn show_selected_file(&self, ui: &mut egui::Ui, theme: &Theme, file: &SelectedFile) -> bool {
        let mut removed = false;

        egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(16)).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(file.file_type.icon()).size(32.0));
                ui.vertical(|ui| {
                    ui.label(theme.heading(ui.ctx(), &file.name));
                    ui.label(theme.subtle(
                        ui.ctx(),
                        &format!(
                            "{} · {}",
                            format_file_size(file.size),
                            file.file_type.description()
                        ),
                    ));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.uploading && ui.button("✖").on_hover_text("Remove file").clicked() {
                        removed = true;
                    }
                });
            });
        });

        removed
    }

    pub fn clear_selection(&mut self) {
        if !self.uploading {
            self.selected = None;
            self.error.clear();
        }
    }

    fn show_progress(&self, ui: &mut egui::Ui, theme: &Theme) {
        ui.add_space(12.0);

        let label = if self.progress < 100 {
            format!("Uploading document… {}%", self.progress)
        } else {
            "Processing with AI…".to_string()
        };

        ui.add(
            egui::ProgressBar::new(self.progress as f32 / 100.0)
                .text(label)
                .animate(self.progress >= 100),
        );
        ui.label(theme.subtle(ui.ctx(), "The backend is analyzing your document."));
    }
}

impl Default for UploadPage {
    fn default() -> Self {
        Self::new()
    }
}
