//! Raw frames, composited tiles and channel views.
//!
//! A [`Frame`] is what a dataset stores: `height x width x channels` samples
//! of one integer type. A [`Tile`] is what gets cached and drawn: always
//! 8-bit RGB, row-major, channel-interleaved.

use crate::error::{AnnotileError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Element type of a raw frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleType {
    /// 8-bit unsigned
    U8,
    /// 16-bit unsigned
    #[default]
    U16,
}

impl SampleType {
    /// Largest representable sample value.
    pub fn max_value(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
        }
    }

    /// Bytes per sample.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }
}

/// Sample storage of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U16(_) => SampleType::U16,
        }
    }

    /// Sample at a flat index, widened to `u32`.
    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        match self {
            Self::U8(v) => v[index] as u32,
            Self::U16(v) => v[index] as u32,
        }
    }
}

/// One raw multi-channel image as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    height: u32,
    width: u32,
    channels: u32,
    samples: Samples,
}

impl Frame {
    /// Create a frame, checking that the buffer matches the shape.
    pub fn new(height: u32, width: u32, channels: u32, samples: Samples) -> Result<Self> {
        let expected = height as usize * width as usize * channels as usize;
        if samples.len() != expected {
            return Err(AnnotileError::InvalidParameter(format!(
                "frame of shape ({}, {}, {}) needs {} samples, got {}",
                height,
                width,
                channels,
                expected,
                samples.len()
            )));
        }
        Ok(Self {
            height,
            width,
            channels,
            samples,
        })
    }

    pub fn from_u8(height: u32, width: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(height, width, channels, Samples::U8(data))
    }

    pub fn from_u16(height: u32, width: u32, channels: u32, data: Vec<u16>) -> Result<Self> {
        Self::new(height, width, channels, Samples::U16(data))
    }

    /// A zero-filled frame.
    pub fn zeroed(height: u32, width: u32, channels: u32, sample_type: SampleType) -> Self {
        let len = height as usize * width as usize * channels as usize;
        let samples = match sample_type {
            SampleType::U8 => Samples::U8(vec![0; len]),
            SampleType::U16 => Samples::U16(vec![0; len]),
        };
        Self {
            height,
            width,
            channels,
            samples,
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[inline]
    pub fn sample_type(&self) -> SampleType {
        self.samples.sample_type()
    }

    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn pixel_count(&self) -> usize {
        self.height as usize * self.width as usize
    }

    /// Sample at (x, y, channel).
    #[inline]
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> u32 {
        let index = ((y as usize * self.width as usize) + x as usize) * self.channels as usize
            + channel as usize;
        self.samples.get(index)
    }

    /// Total memory usage of the sample buffer in bytes.
    pub fn memory_size(&self) -> usize {
        self.samples.len() * self.sample_type().bytes_per_sample()
    }
}

/// An 8-bit RGB buffer ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Tile {
    /// All-black tile of the given size.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Wrap an interleaved RGB buffer.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(AnnotileError::InvalidParameter(format!(
                "RGB tile {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixels as RGB triples.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels()[y as usize * self.width as usize + x as usize]
    }

    pub fn is_black(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    pub fn memory_size(&self) -> usize {
        self.data.len()
    }

    /// Copy into an `image` buffer for drawing or encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Which view of a frame to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelMode {
    /// All channels merged into one RGB view.
    #[default]
    Composite,
    /// One raw channel, replicated to gray RGB.
    SingleChannel(u32),
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite => f.write_str("composite"),
            Self::SingleChannel(idx) => write!(f, "{}", idx),
        }
    }
}

impl FromStr for ChannelMode {
    type Err = AnnotileError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("composite") {
            return Ok(Self::Composite);
        }
        s.parse::<u32>().map(Self::SingleChannel).map_err(|_| {
            AnnotileError::InvalidParameter(format!("unknown channel mode '{}'", s))
        })
    }
}

impl Serialize for ChannelMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Composite => serializer.serialize_str("composite"),
            Self::SingleChannel(idx) => serializer.serialize_u32(*idx),
        }
    }
}

impl<'de> Deserialize<'de> for ChannelMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(u32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(idx) => Ok(Self::SingleChannel(idx)),
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_frame_shape_checked() {
        assert!(Frame::from_u16(2, 2, 4, vec![0; 16]).is_ok());
        let err = Frame::from_u16(2, 2, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(err, AnnotileError::InvalidParameter(_)));
    }

    #[test]
    fn test_frame_sample_indexing() {
        // 1x2 frame, 3 channels
        let frame = Frame::from_u8(1, 2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.sample(0, 0, 2), 3);
        assert_eq!(frame.sample(1, 0, 0), 4);
        assert_eq!(frame.memory_size(), 6);
        assert_eq!(frame.sample_type(), SampleType::U8);
    }

    #[test]
    fn test_tile_pixels() {
        let tile = Tile::from_rgb(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(tile.pixel(1, 0), [4, 5, 6]);
        assert_eq!(tile.pixels().len(), 2);
        assert!(!tile.is_black());
        assert!(Tile::black(4, 4).is_black());
    }

    #[test]
    fn test_tile_to_image() {
        let tile = Tile::from_rgb(1, 1, vec![9, 8, 7]).unwrap();
        let img = tile.to_rgb_image();
        assert_eq!(img.get_pixel(0, 0).0, [9, 8, 7]);
    }

    #[test]
    fn test_channel_mode_structural_key() {
        let mut set = HashSet::new();
        set.insert(ChannelMode::SingleChannel(2));
        assert!(set.contains(&ChannelMode::SingleChannel(2)));
        assert!(!set.contains(&ChannelMode::SingleChannel(1)));
        assert!(!set.contains(&ChannelMode::Composite));
    }

    #[test]
    fn test_channel_mode_text_form() {
        assert_eq!("composite".parse::<ChannelMode>().unwrap(), ChannelMode::Composite);
        assert_eq!("3".parse::<ChannelMode>().unwrap(), ChannelMode::SingleChannel(3));
        assert!("red".parse::<ChannelMode>().is_err());
        assert_eq!(ChannelMode::SingleChannel(1).to_string(), "1");
    }

    #[test]
    fn test_channel_mode_serde() {
        let json = serde_json::to_string(&vec![ChannelMode::Composite, ChannelMode::SingleChannel(2)])
            .unwrap();
        assert_eq!(json, r#"["composite",2]"#);
        let back: Vec<ChannelMode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![ChannelMode::Composite, ChannelMode::SingleChannel(2)]);
    }
}
