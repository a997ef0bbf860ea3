//! Page navigation over a dataset.
//!
//! Turning to a page preloads its tiles so the following render is all hits.

use crate::cache::TileCache;
use annotile_core::{FrameSource, PageGrid, Result};
use std::ops::Range;
use tracing::{info, warn};

/// Current position in a paged grid of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    grid: PageGrid,
    total: u64,
    page: u64,
}

impl Pager {
    /// Start on page 1 of a dataset with `total` frames.
    pub fn new(grid: PageGrid, total: u64) -> Self {
        Self {
            grid,
            total,
            page: 1,
        }
    }

    pub fn grid(&self) -> PageGrid {
        self.grid
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_count(&self) -> u64 {
        self.grid.page_count(self.total)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Frame ids on the current page that exist in the dataset.
    pub fn visible_ids(&self) -> Range<u64> {
        self.grid.clamped_range(self.page, self.total)
    }

    /// Warm the cache with the current page.
    pub fn preload<S: FrameSource + ?Sized>(
        &self,
        cache: &mut TileCache,
        source: &mut S,
    ) -> Result<usize> {
        cache.preload(source, self.visible_ids())
    }

    /// Advance one page. Returns false on the last page.
    pub fn next_page<S: FrameSource + ?Sized>(
        &mut self,
        cache: &mut TileCache,
        source: &mut S,
    ) -> Result<bool> {
        if self.page >= self.page_count() {
            warn!("Already on the last page ({})", self.page);
            return Ok(false);
        }
        self.page += 1;
        info!("Page: {} / {}", self.page, self.page_count());
        self.preload(cache, source)?;
        Ok(true)
    }

    /// Go back one page. Returns false on the first page.
    pub fn prev_page<S: FrameSource + ?Sized>(
        &mut self,
        cache: &mut TileCache,
        source: &mut S,
    ) -> Result<bool> {
        if self.page <= 1 {
            warn!("Already on the first page");
            return Ok(false);
        }
        self.page -= 1;
        info!("Page: {} / {}", self.page, self.page_count());
        self.preload(cache, source)?;
        Ok(true)
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to<S: FrameSource + ?Sized>(
        &mut self,
        page: u64,
        cache: &mut TileCache,
        source: &mut S,
    ) -> Result<u64> {
        self.page = page.clamp(1, self.page_count());
        self.preload(cache, source)?;
        Ok(self.page)
    }

    /// Change the page layout, keeping the current page number when it
    /// still exists.
    pub fn set_grid(&mut self, grid: PageGrid) {
        self.grid = grid;
        self.page = self.page.min(self.page_count());
        info!(
            "Grid set to {}x{}, {} pages",
            grid.columns,
            grid.rows,
            self.page_count()
        );
    }
}
