//! Annotile Labels - annotation classes and their display colors
//!
//! - [`ColorAssignment`]: session-stable label id -> color mapping
//! - [`LabelTable`]: per-frame class ids with JSON persistence and TSV export

pub mod palette;
pub mod table;

pub use palette::{ColorAssignment, DEFAULT_PALETTE};
pub use table::LabelTable;
