use eframe::egui;

use super::theme::Theme;

/// Inline, dismissible failure banner. Every user-visible error in the app
/// goes through one of these; no failure is fatal.
#[derive(Default)]
pub struct ErrorBanner {
    message: Option<String>,
}

impl ErrorBanner {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn is_set(&self) -> bool {
        self.message.is_some()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let Some(message) = self.message.clone() else {
            return;
        };

        let err_color = theme.err(ui.ctx());
        let mut dismissed = false;

        egui::Frame::group(ui.style())
            .fill(err_color.gamma_multiply(0.12))
            .stroke(egui::Stroke::new(1.0, err_color))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("⚠").color(err_color).size(16.0));
                    ui.label(egui::RichText::new(&message).color(err_color));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });

        if dismissed {
            self.clear();
        }

        ui.add_space(8.0);
    }
}
