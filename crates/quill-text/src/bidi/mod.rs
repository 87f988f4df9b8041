pub mod levels;
pub mod reorder;

pub use levels::{char_levels, BaseDirection};
pub use reorder::logical_to_visual;
