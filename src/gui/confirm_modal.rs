use eframe::egui;

/// Yes/no confirmation dialog for destructive actions (delete one record,
/// clear all history). Callers keep their own pending payload and act when
/// `show` returns `Some(true)`.
pub struct ConfirmModal {
    id: &'static str,
    open: bool,
    message: String,
}

impl ConfirmModal {
    pub fn new(id: &'static str) -> Self {
        Self { id, open: false, message: String::new() }
    }

    pub fn request(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<bool> {
        if !self.open {
            return None;
        }

        let mut answer = None;

        let modal = egui::Modal::new(egui::Id::new(self.id)).show(ctx, |ui| {
            ui.set_width(340.0);
            ui.label(&self.message);
            ui.add_space(12.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
                if ui.button("Confirm").clicked() {
                    answer = Some(true);
                }
            });
        });

        if modal.should_close() && answer.is_none() {
            answer = Some(false);
        }

        if answer.is_some() {
            self.open = false;
        }

        answer
    }
}
