//! Annotile Core - Foundation types for the tile engine
//!
//! This crate provides the fundamental types used throughout Annotile:
//! - Raw multi-channel frames and composited RGB tiles
//! - Channel view selection
//! - The frame source interface consumed by the tile cache
//! - Label colors and grid addressing
//! - Configuration

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod source;

pub use color::{ColorSource, LabelColor, NamedColor};
pub use config::{CacheConfig, Config, GridConfig, LabelDef};
pub use error::{AnnotileError, Result};
pub use frame::{ChannelMode, Frame, SampleType, Samples, Tile};
pub use grid::{linear_id, PageGrid};
pub use source::{DatasetShape, FrameSource};

/// Default limits, shared by the configuration layer and the cache.
pub mod defaults {
    /// Number of composited tiles kept by a tile cache.
    pub const CACHE_CAPACITY: usize = 100;

    /// Edge length of a rendered tile in pixels.
    pub const TILE_PIXEL_SIZE: u32 = 85;

    /// Tiles per page row.
    pub const GRID_COLUMNS: u32 = 3;

    /// Tiles per page column.
    pub const GRID_ROWS: u32 = 2;

    /// Width of the label border drawn around a tile.
    pub const BORDER_WIDTH: u32 = 4;
}
