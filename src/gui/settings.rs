use eframe::egui;
use serde::{
    Deserialize,
    Serialize,
};

use crate::api;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Serialize, Deserialize)]
pub struct SettingsData {
    pub backend_url: String,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { backend_url: api::DEFAULT_BASE_URL.to_string(), dark_mode: true }
    }
}

pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default() }
    }

    pub fn open_with(&mut self, current: SettingsData) {
        self.draft = current;
        self.open = true;
    }

    /// Returns the edited settings when the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut saved = None;
        let mut close = false;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Backend Settings");
            ui.add_space(10.0);

            ui.label("Extraction backend URL:");
            ui.text_edit_singleline(&mut self.draft.backend_url);
            ui.small("The server that performs OCR and AI extraction.");

            ui.add_space(14.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Save").clicked() {
                    let trimmed = self.draft.backend_url.trim();
                    if trimmed.is_empty() {
                        self.draft.backend_url = api::DEFAULT_BASE_URL.to_string();
                    } else {
                        self.draft.backend_url = trimmed.to_string();
                    }
                    saved = Some(self.draft.clone());
                    close = true;
                }
            });
        });

        if close || modal.should_close() {
            self.open = false;
        }

        saved
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
