mod lines;
mod matcher;

pub use lines::{LineSource, is_separator};
pub use matcher::rank_lines;
