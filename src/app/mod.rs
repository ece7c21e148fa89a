mod core;
mod event_bus;
mod event_loop;
pub(crate) mod terminal_session;


pub use core::App;
