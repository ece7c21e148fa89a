pub mod app;
pub mod bar;
pub mod config;
pub mod error;
pub(crate) mod event;
pub mod logging;
pub mod source;
pub mod ui;
