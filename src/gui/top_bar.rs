use eframe::egui::{
    self,
    containers,
};

use super::{
    app::Page,
    settings::{
        SettingsData,
        SettingsModal,
    },
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        page: &mut Page,
        settings_modal: &mut SettingsModal,
        current_settings: &SettingsData,
        backend_connected: bool,
        has_result: bool,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Upload Document").clicked() {
                        *page = Page::Upload;
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Backend Settings").clicked() {
                        settings_modal.open_with(current_settings.clone());
                    }
                });

                ui.separator();

                ui.selectable_value(page, Page::Upload, "Upload");
                ui.add_enabled_ui(has_result, |ui| {
                    ui.selectable_value(page, Page::Result, "Result");
                });
                ui.selectable_value(page, Page::History, "History");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_backend_status(ui, backend_connected);
                });
            });
        });
    }

    fn show_backend_status(ui: &mut egui::Ui, connected: bool) {
        let color = if connected {
            egui::Color32::from_rgb(0, 200, 0)
        } else {
            egui::Color32::from_rgb(200, 80, 80)
        };

        let tooltip = if connected {
            "Connected to extraction backend"
        } else {
            "Extraction backend unreachable"
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Backend").on_hover_text(tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        });
    }
}
