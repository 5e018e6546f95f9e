pub mod api;
pub mod core;
pub mod gui;
pub mod history;
pub mod persistence;
