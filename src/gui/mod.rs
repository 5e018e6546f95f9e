pub mod app;
pub mod confirm_modal;
pub mod error_banner;
pub mod history_page;
pub mod output_page;
pub mod preview;
pub mod settings;
pub mod theme;
pub mod top_bar;
pub mod upload_page;

pub use app::RefscanApp;
