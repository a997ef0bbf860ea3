//! Application configuration.
//!
//! Stored as JSON. Every field has a default so partial files load.

use crate::defaults;
use crate::error::{AnnotileError, Result};
use crate::frame::ChannelMode;
use crate::grid::PageGrid;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// One annotation class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDef {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl LabelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Horizontal tile count
    pub columns: u32,
    /// Vertical tile count
    pub rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: defaults::GRID_COLUMNS,
            rows: defaults::GRID_ROWS,
        }
    }
}

impl From<GridConfig> for PageGrid {
    fn from(grid: GridConfig) -> Self {
        PageGrid::new(grid.columns, grid.rows)
    }
}

/// The options the tile cache is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub mode: ChannelMode,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::CACHE_CAPACITY,
            mode: ChannelMode::Composite,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of cached tiles
    pub cache_capacity: usize,
    /// Rendered tile edge in pixels (always odd)
    pub tile_pixel_size: u32,
    /// Channel view used when a dataset is opened
    pub default_channel_mode: ChannelMode,
    pub grid: GridConfig,
    pub labels: Vec<LabelDef>,
    /// Label applied by a flag action
    pub active_label: u32,
    /// Where exports are written
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: defaults::CACHE_CAPACITY,
            tile_pixel_size: defaults::TILE_PIXEL_SIZE,
            default_channel_mode: ChannelMode::Composite,
            grid: GridConfig::default(),
            labels: vec![
                LabelDef::new("junk"),
                LabelDef::new("cell"),
                LabelDef::new("cluster"),
            ],
            active_label: 1,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Parse, normalize and validate a JSON document.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let mut config: Self = serde_json::from_slice(data)
            .map_err(|e| AnnotileError::Config(format!("Invalid config: {}", e)))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| AnnotileError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let config = Self::from_json(&data)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Force the tile size odd so a tile has a center pixel.
    pub fn normalize(&mut self) {
        self.tile_pixel_size = 2 * (self.tile_pixel_size / 2) + 1;
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(AnnotileError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.columns, self.grid.rows
            )));
        }
        if self.cache_capacity == 0 {
            return Err(AnnotileError::Config(
                "cache_capacity must be at least 1".into(),
            ));
        }
        if !self.labels.is_empty() && self.active_label as usize >= self.labels.len() {
            return Err(AnnotileError::Config(format!(
                "active_label {} has no entry in labels ({} defined)",
                self.active_label,
                self.labels.len()
            )));
        }
        Ok(())
    }

    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache_capacity,
            mode: self.default_channel_mode,
        }
    }

    pub fn page_grid(&self) -> PageGrid {
        self.grid.into()
    }

    /// Display name of a label, or `label_<id>` when it is not configured.
    pub fn label_name(&self, label_id: u32) -> String {
        self.labels
            .get(label_id as usize)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("label_{}", label_id))
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}
