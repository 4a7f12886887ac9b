pub mod app;
pub mod confirm_modal;
pub mod error_modal;
pub mod message_overlay;
pub mod pages;
pub mod settings_modal;
pub mod theme;
pub mod top_bar;

pub use app::VocabApp;
