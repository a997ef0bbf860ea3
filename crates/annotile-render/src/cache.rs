//! Bounded cache of composited tiles.
//!
//! Tiles are keyed by frame id and channel view. The cache never holds a
//! dataset handle; the frame source is borrowed for each call that may need
//! to read.

use crate::compose::compose;
use crate::lru::LruMap;
use annotile_core::{AnnotileError, CacheConfig, ChannelMode, FrameSource, Result, Tile};
use std::ops::Range;
use tracing::{debug, info};

/// Cache key: one frame shown in one channel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub frame_id: u64,
    pub mode: ChannelMode,
}

impl CacheKey {
    pub fn new(frame_id: u64, mode: ChannelMode) -> Self {
        Self { frame_id, mode }
    }
}

/// Counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Requests answered with a black tile because the id was out of range
    pub fallbacks: u64,
}

/// LRU cache of display tiles.
pub struct TileCache {
    entries: LruMap<CacheKey, Tile>,
    mode: ChannelMode,
    /// Returned for ids the source does not have; sized to the last known
    /// frame dimensions.
    blank: Tile,
    memory_used: usize,
    stats: CacheStats,
}

impl TileCache {
    /// Create a cache holding at most `capacity` tiles (at least one).
    pub fn new(capacity: usize, mode: ChannelMode) -> Self {
        Self {
            entries: LruMap::new(capacity),
            mode,
            blank: Tile::black(0, 0),
            memory_used: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.mode)
    }

    /// Tile for `frame_id` in `mode`, reading and compositing on a miss.
    ///
    /// Ids the source reports as out of range yield an uncached black tile.
    /// Any other source error is returned unchanged.
    pub fn get<S: FrameSource + ?Sized>(
        &mut self,
        source: &mut S,
        frame_id: u64,
        mode: ChannelMode,
    ) -> Result<&Tile> {
        let key = CacheKey::new(frame_id, mode);
        if self.entries.contains(&key) {
            self.stats.hits += 1;
            return self.entries.get(&key).ok_or_else(|| missing(key));
        }

        self.stats.misses += 1;
        match source.read(frame_id) {
            Ok(frame) => {
                self.insert(key, compose(&frame, mode));
                self.entries.peek(&key).ok_or_else(|| missing(key))
            }
            Err(AnnotileError::IndexOutOfRange { id, count }) => {
                debug!("Frame {} out of range ({} frames), using blank tile", id, count);
                self.stats.fallbacks += 1;
                let shape = source.shape();
                if self.blank.width() != shape.width || self.blank.height() != shape.height {
                    self.blank = Tile::black(shape.width, shape.height);
                }
                Ok(&self.blank)
            }
            Err(e) => Err(e),
        }
    }

    /// Tile for `frame_id` in the active channel view.
    pub fn tile<S: FrameSource + ?Sized>(&mut self, source: &mut S, frame_id: u64) -> Result<&Tile> {
        let mode = self.mode;
        self.get(source, frame_id, mode)
    }

    /// Load every id in `ids` not yet cached under the active view.
    ///
    /// The range is clamped to the dataset size. Entries already cached keep
    /// their recency. Returns the number of tiles loaded.
    pub fn preload<S: FrameSource + ?Sized>(&mut self, source: &mut S, ids: Range<u64>) -> Result<usize> {
        let count = source.shape().count;
        let ids = ids.start.min(count)..ids.end.min(count);
        let mut loaded = 0;

        for frame_id in ids {
            let key = CacheKey::new(frame_id, self.mode);
            if self.entries.contains(&key) {
                continue;
            }
            self.stats.misses += 1;
            match source.read(frame_id) {
                Ok(frame) => {
                    self.insert(key, compose(&frame, self.mode));
                    loaded += 1;
                }
                Err(AnnotileError::IndexOutOfRange { .. }) => {
                    self.stats.fallbacks += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!("Preloaded {} tiles ({} cached)", loaded, self.entries.len());
        Ok(loaded)
    }

    /// Switch the active channel view. Always empties the cache.
    pub fn set_mode(&mut self, mode: ChannelMode) {
        self.mode = mode;
        self.drop_entries();
        info!("Channel view set to {}, tile cache cleared", mode);
    }

    /// Drop every cached tile.
    pub fn clear(&mut self) {
        self.drop_entries();
        info!("Tile cache cleared");
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn contains(&self, frame_id: u64, mode: ChannelMode) -> bool {
        self.entries.contains(&CacheKey::new(frame_id, mode))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Bytes held by cached tiles.
    pub fn memory_usage(&self) -> usize {
        self.memory_used
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Cached keys, least recently used first.
    pub fn keys(&self) -> impl Iterator<Item = CacheKey> + '_ {
        self.entries.keys().copied()
    }

    fn insert(&mut self, key: CacheKey, tile: Tile) {
        self.memory_used += tile.memory_size();
        if let Some((old_key, old)) = self.entries.insert(key, tile) {
            self.memory_used -= old.memory_size();
            self.stats.evictions += 1;
            debug!("Evicted frame {} ({})", old_key.frame_id, old_key.mode);
        }
    }

    fn drop_entries(&mut self) {
        self.entries.clear();
        self.memory_used = 0;
    }
}

fn missing(key: CacheKey) -> AnnotileError {
    AnnotileError::Internal(format!(
        "tile for frame {} ({}) vanished from the cache",
        key.frame_id, key.mode
    ))
}
