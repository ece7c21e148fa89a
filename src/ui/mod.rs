mod chrome;
mod layout;
mod overlay;

pub use chrome::OverlayChrome;
pub use layout::bar_rect;
pub(crate) use layout::centered_rect;
pub use overlay::{bar_height, draw_quick_action_bar};
