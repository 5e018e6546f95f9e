use std::fs;

use eframe::egui;

use super::theme::Theme;
use crate::core::{
    utils::format_file_size,
    SelectedFile,
};

const TEXT_PREVIEW_LIMIT: usize = 4096;

enum PreviewContent {
    Image { uri: String },
    Text { snippet: String, truncated: bool },
    Placeholder { note: &'static str },
}

/// Side-by-side preview of the uploaded document. Dispatches on the file
/// type: images render directly, plain text shows a snippet, everything else
/// gets a labelled placeholder (PDF/Word rendering happens on the backend).
pub struct FilePreview {
    name: String,
    icon: &'static str,
    size: u64,
    content: PreviewContent,
}

impl FilePreview {
    pub fn load(file: &SelectedFile) -> Self {
        let content = if file.file_type.is_image() {
            PreviewContent::Image { uri: format!("file://{}", file.path.display()) }
        } else if file.file_type == crate::core::SourceFileType::Txt {
            match fs::read_to_string(&file.path) {
                Ok(text) => {
                    let truncated = text.len() > TEXT_PREVIEW_LIMIT;
                    let snippet = text.chars().take(TEXT_PREVIEW_LIMIT).collect();
                    PreviewContent::Text { snippet, truncated }
                }
                Err(_) => PreviewContent::Placeholder { note: "Could not read file contents" },
            }
        } else {
            PreviewContent::Placeholder { note: "Preview not available for this format" }
        };

        Self { name: file.name.clone(), icon: file.file_type.icon(), size: file.size, content }
    }

    pub fn show(&self, ui: &mut egui::Ui, theme: &Theme) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(self.icon).size(20.0));
                ui.label(theme.heading(ui.ctx(), &self.name));
                ui.label(theme.subtle(ui.ctx(), &format_file_size(self.size)));
            });
            ui.separator();

            match &self.content {
                PreviewContent::Image { uri } => {
                    ui.add(
                        egui::Image::new(uri.clone())
                            .max_height(420.0)
                            .maintain_aspect_ratio(true),
                    );
                }
                PreviewContent::Text { snippet, truncated } => {
                    egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                        ui.label(egui::RichText::new(snippet).monospace());
                        if *truncated {
                            ui.label(theme.subtle(ui.ctx(), "… (truncated)"));
                        }
                    });
                }
                PreviewContent::Placeholder { note } => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(egui::RichText::new(self.icon).size(48.0));
                        ui.label(theme.subtle(ui.ctx(), note));
                        ui.add_space(40.0);
                    });
                }
            }
        });
    }
}
