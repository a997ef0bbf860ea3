//! Label color assignment.
//!
//! Colors are handed out in palette order the first time a label is seen and
//! stay fixed for the session. Label 0 is always black.

use annotile_core::{ColorSource, LabelColor, NamedColor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Palette order for labels other than 0.
pub const DEFAULT_PALETTE: [NamedColor; 8] = [
    NamedColor::Red,
    NamedColor::Blue,
    NamedColor::Green,
    NamedColor::Yellow,
    NamedColor::Magenta,
    NamedColor::Cyan,
    NamedColor::Orange,
    NamedColor::Purple,
];

/// Session-stable mapping from label id to display color.
pub struct ColorAssignment {
    assigned: HashMap<u32, LabelColor>,
    used: HashSet<LabelColor>,
    palette: Vec<NamedColor>,
    rng: StdRng,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible fallback colors.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            assigned: HashMap::new(),
            used: HashSet::new(),
            palette: DEFAULT_PALETTE.to_vec(),
            rng,
        }
    }

    /// Color for `label_id`, assigning one on first use.
    pub fn get_color(&mut self, label_id: u32, label_name: &str) -> LabelColor {
        if let Some(&color) = self.assigned.get(&label_id) {
            return color;
        }

        let color = if label_id == 0 {
            LabelColor::BLACK
        } else {
            self.next_color()
        };
        debug!("Assigned {} to label {} ({})", color, label_id, label_name);
        self.assigned.insert(label_id, color);
        self.used.insert(color);
        color
    }

    /// First unused palette color, or a random one once the palette runs out.
    fn next_color(&mut self) -> LabelColor {
        let unused = self
            .palette
            .iter()
            .map(|&named| LabelColor::Named(named))
            .find(|color| !self.used.contains(color));
        match unused {
            Some(color) => color,
            None => LabelColor::Rgb([
                self.rng.random::<u8>(),
                self.rng.random::<u8>(),
                self.rng.random::<u8>(),
            ]),
        }
    }

    /// Color already assigned to `label_id`, if any.
    pub fn assigned(&self, label_id: u32) -> Option<LabelColor> {
        self.assigned.get(&label_id).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Forget every assignment.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.used.clear();
        info!("Color assignments reset");
    }
}

impl Default for ColorAssignment {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSource for ColorAssignment {
    fn color_for(&mut self, label_id: u32, label_name: &str) -> LabelColor {
        self.get_color(label_id, label_name)
    }
}
