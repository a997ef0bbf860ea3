//! Annotile Render - raw frames to cached display tiles
//!
//! - [`compose`]: channel compositor (multi-channel frame -> 8-bit RGB)
//! - [`LruMap`]: bounded recency-ordered map
//! - [`TileCache`]: LRU cache of composited tiles keyed by frame and view
//! - [`Pager`]: page navigation with preloading
//! - [`SheetPainter`]: contact sheets with label borders

pub mod cache;
pub mod compose;
pub mod lru;
pub mod pager;
pub mod sheet;

pub use cache::{CacheKey, CacheStats, TileCache};
pub use compose::compose;
pub use lru::LruMap;
pub use pager::Pager;
pub use sheet::SheetPainter;
