//! quill: bidi-aware text wrapping and shaped-text layout.
//!
//! The root crate re-exports the layout engine from `quill-text`.

pub use quill_text::*;
