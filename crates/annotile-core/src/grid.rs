//! Page grid addressing.
//!
//! A page is a `columns x rows` block of tiles. Pages are 1-indexed and
//! frame ids run row-major through each page, then on to the next page.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Linear frame id of the tile at (x, y) on `page`.
///
/// No bounds checking; callers clamp against the dataset size. Page 0 is
/// treated as page 1.
#[inline]
pub fn linear_id(page: u64, x: u64, y: u64, page_width: u64, page_height: u64) -> u64 {
    page.saturating_sub(1) * page_width * page_height + x + page_width * y
}

/// Fixed page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageGrid {
    pub columns: u32,
    pub rows: u32,
}

impl PageGrid {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub fn tiles_per_page(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Frame id shown at (x, y) on `page`.
    #[inline]
    pub fn id_at(&self, page: u64, x: u32, y: u32) -> u64 {
        linear_id(page, x as u64, y as u64, self.columns as u64, self.rows as u64)
    }

    /// Ids covered by `page`, whether or not they exist in the dataset.
    pub fn page_range(&self, page: u64) -> Range<u64> {
        let start = self.id_at(page, 0, 0);
        start..start + self.tiles_per_page()
    }

    /// Ids covered by `page` that exist in a dataset of `total` frames.
    pub fn clamped_range(&self, page: u64, total: u64) -> Range<u64> {
        let range = self.page_range(page);
        range.start.min(total)..range.end.min(total)
    }

    /// Pages needed to show `total` frames; never less than one.
    pub fn page_count(&self, total: u64) -> u64 {
        let per_page = self.tiles_per_page();
        if per_page == 0 {
            return 1;
        }
        total.div_ceil(per_page).max(1)
    }

    /// Page that shows frame `id`.
    pub fn page_of(&self, id: u64) -> u64 {
        let per_page = self.tiles_per_page().max(1);
        id / per_page + 1
    }

    /// `(x, y, id)` for every slot of `page`, row by row.
    pub fn slots(&self, page: u64) -> impl Iterator<Item = (u32, u32, u64)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.columns).map(move |x| (x, y, self.id_at(page, x, y)))
        })
    }
}

impl Default for PageGrid {
    fn default() -> Self {
        Self::new(crate::defaults::GRID_COLUMNS, crate::defaults::GRID_ROWS)
    }
}
