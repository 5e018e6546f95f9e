use std::{
    mem,
    time::Instant,
};

use eframe::egui::{
    self,
    Id,
};

use super::{
    history_page::HistoryPage,
    output_page::OutputPage,
    preview::FilePreview,
    settings::{
        SettingsData,
        SettingsModal,
        SETTINGS_FILE,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
    upload_page::UploadPage,
};
use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        SelectedFile,
    },
    history::{
        ExtractionRecord,
        HistoryStore,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

const BACKEND_CHECK_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Upload,
    Result,
    History,
}

pub struct RefscanApp {
    page: Page,
    last_page: Page,
    theme: Theme,
    settings: SettingsData,
    settings_modal: SettingsModal,
    store: HistoryStore,
    upload_page: UploadPage,
    output: Option<OutputPage>,
    history_page: HistoryPage,
    backend_connected: bool,
    last_backend_check: Option<Instant>,
    /// File currently in flight, kept so the result page can show a preview.
    uploading_file: Option<SelectedFile>,
    task_manager: TaskManager,
}

impl RefscanApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let task_manager = TaskManager::new();
        let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
        let store = HistoryStore::at_default_location();

        let mut history_page = HistoryPage::new();
        history_page.refresh(&store);

        task_manager.fetch_supported_formats(settings.backend_url.clone());

        egui_extras::install_image_loaders(&cc.egui_ctx);

        let theme = Theme::clinic();
        set_theme(&cc.egui_ctx, theme.clone());

        cc.egui_ctx.options_mut(|options| {
            options.theme_preference = if settings.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        Self {
            page: Page::Upload,
            last_page: Page::Upload,
            theme,
            settings,
            settings_modal: SettingsModal::new(),
            store,
            upload_page: UploadPage::new(),
            output: None,
            history_page,
            backend_connected: false,
            last_backend_check: None,
            uploading_file: None,
            task_manager,
        }
    }
}

impl eframe::App for RefscanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.update_backend_status();
        self.handle_file_drops(ctx);
        self.draw_file_drop_overlay(ctx);
        self.sync_theme_preference(ctx);

        TopBar::show(
            ctx,
            &mut self.page,
            &mut self.settings_modal,
            &self.settings,
            self.backend_connected,
            self.output.is_some(),
        );

        if let Some(updated) = self.settings_modal.show(ctx) {
            self.settings = updated;
            self.save_settings();
            // Re-probe the new backend right away.
            self.last_backend_check = None;
            self.task_manager.fetch_supported_formats(self.settings.backend_url.clone());
        }

        if self.page == Page::History && self.last_page != Page::History {
            self.history_page.refresh(&self.store);
        }
        self.last_page = self.page;

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Upload => {
                if let Some(file) = self.upload_page.show(ui, &self.theme) {
                    self.start_upload(file);
                }
            }
            Page::Result => match &mut self.output {
                Some(output) => output.show(ui, &self.theme),
                None => {
                    ui.add_space(48.0);
                    ui.vertical_centered(|ui| {
                        ui.label("No extraction result yet. Upload a document first.");
                        if ui.button("Go to Upload").clicked() {
                            self.page = Page::Upload;
                        }
                    });
                }
            },
            Page::History => {
                if let Some(record) = self.history_page.show(ui, &self.theme, &self.store) {
                    self.open_record(record);
                }
            }
        });
    }
}

impl RefscanApp {
    fn start_upload(&mut self, file: SelectedFile) {
        self.uploading_file = Some(file.clone());
        self.upload_page.upload_started();
        self.task_manager.upload_file(file, self.settings.backend_url.clone());
    }

    fn open_record(&mut self, record: ExtractionRecord) {
        self.output = Some(OutputPage::new(record.result, Some(record.timestamp), None));
        self.page = Page::Result;
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::BackendConnection(connected) => {
                self.backend_connected = connected;
            }

            TaskResult::SupportedFormats(formats) => {
                self.upload_page.set_formats(formats);
            }

            TaskResult::UploadProgress(percent) => {
                self.upload_page.set_progress(percent);
            }

            TaskResult::UploadFinished(Ok(result)) => match self.store.save(&result) {
                Ok(record) => {
                    let preview =
                        self.uploading_file.take().map(|file| FilePreview::load(&file));
                    self.output =
                        Some(OutputPage::new(record.result, Some(record.timestamp), preview));
                    self.upload_page.upload_succeeded();
                    self.history_page.refresh(&self.store);
                    self.page = Page::Result;
                }
                Err(e) => {
                    eprintln!("Failed to save result to history: {}", e);
                    self.uploading_file = None;
                    self.upload_page
                        .upload_failed(format!("Failed to save result to history: {}", e));
                }
            },

            TaskResult::UploadFinished(Err(message)) => {
                self.uploading_file = None;
                self.upload_page.upload_failed(message);
            }
        }
    }

    fn update_backend_status(&mut self) {
        let now = Instant::now();
        let should_check = match self.last_backend_check {
            None => true,
            Some(last_check) => {
                now.duration_since(last_check).as_secs() >= BACKEND_CHECK_INTERVAL_SECS
            }
        };

        if should_check {
            self.task_manager.check_backend(self.settings.backend_url.clone());
            self.last_backend_check = Some(now);
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        if dropped.is_empty() {
            return;
        }

        if let Some(path) = dropped.iter().find_map(|file| file.path.as_deref()) {
            self.page = Page::Upload;
            // Unsupported drops surface as a validation banner on the page.
            self.upload_page.select_path(path);
        }
    }

    fn draw_file_drop_overlay(&self, ctx: &egui::Context) {
        let hovering_any = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if !hovering_any {
            return;
        }

        let size = egui::vec2(300.0, 120.0);

        egui::Modal::new(Id::new("file_drop_overlay")).show(ctx, |ui| {
            ui.set_max_size(size);
            ui.set_min_size(size);

            ui.centered_and_justified(|ui| {
                ui.heading("📥  Drop to upload");
            });
        });
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings.dark_mode {
            self.settings.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}
