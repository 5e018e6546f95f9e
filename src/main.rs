use eframe::egui;
use refscan::gui::RefscanApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Refscan")
            .with_inner_size([1180.0, 800.0])
            .with_min_inner_size([860.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native("refscan", options, Box::new(|cc| Ok(Box::new(RefscanApp::new(cc)))))
}
