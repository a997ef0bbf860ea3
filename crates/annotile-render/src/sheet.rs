//! Contact sheets: one page of tiles drawn into a single image, each tile
//! outlined in the color of its label.

use crate::cache::TileCache;
use annotile_core::{defaults, ColorSource, FrameSource, PageGrid, Result, Tile};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Draws pages of tiles with label borders.
pub struct SheetPainter<C> {
    colors: C,
    label_names: Vec<String>,
    tile_size: u32,
    border: u32,
}

impl<C: ColorSource> SheetPainter<C> {
    /// `label_names[i]` names label id `i`.
    pub fn new(colors: C, label_names: Vec<String>, tile_size: u32) -> Self {
        Self {
            colors,
            label_names,
            tile_size: tile_size.max(1),
            border: defaults::BORDER_WIDTH,
        }
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn colors(&self) -> &C {
        &self.colors
    }

    pub fn into_colors(self) -> C {
        self.colors
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn label_name(&self, label: u32) -> String {
        self.label_names
            .get(label as usize)
            .cloned()
            .unwrap_or_else(|| format!("label_{}", label))
    }

    /// Draw `page` of `grid`, asking `labels` for each frame's label id.
    ///
    /// Slots past the end of the dataset are black with label 0.
    pub fn paint_page<S, L>(
        &mut self,
        cache: &mut TileCache,
        source: &mut S,
        grid: PageGrid,
        page: u64,
        labels: L,
    ) -> Result<RgbImage>
    where
        S: FrameSource + ?Sized,
        L: Fn(u64) -> u32,
    {
        let total = source.shape().count;
        let size = self.tile_size;
        let mut sheet = RgbImage::new(grid.columns * size, grid.rows * size);

        for (x, y, id) in grid.slots(page) {
            let label = if id < total { labels(id) } else { 0 };
            let scaled = {
                let tile = cache.tile(source, id)?;
                self.scale(tile)
            };
            let name = self.label_name(label);
            let color = self.colors.color_for(label, &name).to_rgb8();

            let (ox, oy) = (x * size, y * size);
            imageops::replace(&mut sheet, &scaled, ox as i64, oy as i64);
            draw_border(&mut sheet, ox, oy, size, self.border, Rgb(color));
        }
        Ok(sheet)
    }

    /// Scale a tile to the sheet's tile size (nearest neighbour).
    fn scale(&self, tile: &Tile) -> RgbImage {
        if tile.width() == 0 || tile.height() == 0 {
            return RgbImage::new(self.tile_size, self.tile_size);
        }
        imageops::resize(
            &tile.to_rgb_image(),
            self.tile_size,
            self.tile_size,
            FilterType::Nearest,
        )
    }
}

/// Outline the `size`-square cell at (ox, oy) with a `width`-pixel frame.
fn draw_border(img: &mut RgbImage, ox: u32, oy: u32, size: u32, width: u32, color: Rgb<u8>) {
    let width = width.min(size.div_ceil(2));
    for dy in 0..size {
        for dx in 0..size {
            let edge = dx < width || dy < width || dx >= size - width || dy >= size - width;
            if edge {
                img.put_pixel(ox + dx, oy + dy, color);
            }
        }
    }
}
