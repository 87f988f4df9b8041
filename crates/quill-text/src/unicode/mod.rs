pub mod analysis;
pub mod index;

pub use analysis::{
    hard_line_ranges, safe_break_points, sanitize_for_shaping, script_runs, ScriptRun,
};
pub use index::CharIndex;
