//! Annotile Media - Frame sources
//!
//! This crate handles:
//! - In-memory frame stacks
//! - Datasets stored as a directory of image files (8/16-bit PNG or TIFF)

pub mod image_dir;
pub mod memory;

pub use image_dir::ImageDirSource;
pub use memory::MemorySource;
