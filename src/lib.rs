pub mod api;
pub mod core;
pub mod gui;
pub mod paging;
pub mod persistence;
pub mod quiz;
pub mod settings;
pub mod similar;
pub mod speech;
pub mod tasks;

pub use crate::{
    core::VocabError,
    gui::VocabApp,
    settings::Settings,
};
