//! Label display colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    White,
    Red,
    Blue,
    Green,
    Yellow,
    Magenta,
    Cyan,
    Orange,
    Purple,
}

impl NamedColor {
    pub fn to_rgb8(self) -> [u8; 3] {
        match self {
            Self::Black => [0, 0, 0],
            Self::White => [255, 255, 255],
            Self::Red => [255, 0, 0],
            Self::Blue => [0, 0, 255],
            Self::Green => [0, 255, 0],
            Self::Yellow => [255, 255, 0],
            Self::Magenta => [255, 0, 255],
            Self::Cyan => [0, 255, 255],
            Self::Orange => [255, 165, 0],
            Self::Purple => [128, 0, 128],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }
}

/// Color used to outline a tile with its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Named(NamedColor),
    Rgb([u8; 3]),
}

impl LabelColor {
    pub const BLACK: Self = Self::Named(NamedColor::Black);

    pub fn to_rgb8(self) -> [u8; 3] {
        match self {
            Self::Named(named) => named.to_rgb8(),
            Self::Rgb(rgb) => rgb,
        }
    }

    /// CSS hex form, e.g. `#ff0000`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl From<NamedColor> for LabelColor {
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(named.name()),
            Self::Rgb([r, g, b]) => write!(f, "rgb({}, {}, {})", r, g, b),
        }
    }
}

/// Anything that can resolve a label id to a display color.
///
/// Takes `&mut self` because resolution may assign a color on first use.
pub trait ColorSource {
    fn color_for(&mut self, label_id: u32, label_name: &str) -> LabelColor;
}

impl<C: ColorSource + ?Sized> ColorSource for &mut C {
    fn color_for(&mut self, label_id: u32, label_name: &str) -> LabelColor {
        (**self).color_for(label_id, label_name)
    }
}
