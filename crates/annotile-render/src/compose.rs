//! Channel compositor: raw frame + channel view -> 8-bit RGB tile.
//!
//! Composition never fails. A frame that cannot be shown in the requested
//! view comes back as a black tile of the frame's size.

use annotile_core::{ChannelMode, Frame, SampleType, Tile};

/// Source channel feeding each output channel (R, G, B) in composite view.
///
/// Fixed calibration of the imaging pipeline: channel 1 is red, channel 2 is
/// green, channel 0 is blue.
pub const COMPOSITE_ORDER: [u32; 3] = [1, 2, 0];

/// Channel added onto all three outputs when present (bright-field).
pub const OVERLAY_CHANNEL: u32 = 3;

/// Composite a frame into a displayable tile.
pub fn compose(frame: &Frame, mode: ChannelMode) -> Tile {
    match mode {
        ChannelMode::Composite => compose_composite(frame),
        ChannelMode::SingleChannel(idx) => compose_single(frame, idx),
    }
}

/// Reduce a sample to 8 bits: high byte for 16-bit data, clamp for 8-bit.
#[inline]
pub fn to_u8(value: u32, sample_type: SampleType) -> u8 {
    let clipped = value.min(sample_type.max_value());
    match sample_type {
        SampleType::U8 => clipped as u8,
        SampleType::U16 => (clipped >> 8) as u8,
    }
}

fn compose_composite(frame: &Frame) -> Tile {
    match frame.channels() {
        1 => replicate(frame, 0),
        c if c >= 3 => merge(frame, c > OVERLAY_CHANNEL),
        _ => Tile::black(frame.width(), frame.height()),
    }
}

fn compose_single(frame: &Frame, idx: u32) -> Tile {
    if idx >= frame.channels() {
        return Tile::black(frame.width(), frame.height());
    }
    replicate(frame, idx)
}

/// Permute channels into RGB, optionally adding the overlay channel.
fn merge(frame: &Frame, with_overlay: bool) -> Tile {
    let sample_type = frame.sample_type();
    let channels = frame.channels() as usize;
    let samples = frame.samples();
    let [r_src, g_src, b_src] = COMPOSITE_ORDER.map(|c| c as usize);

    let mut data = Vec::with_capacity(frame.pixel_count() * 3);
    for p in 0..frame.pixel_count() {
        let base = p * channels;
        let overlay = if with_overlay {
            samples.get(base + OVERLAY_CHANNEL as usize)
        } else {
            0
        };
        data.push(to_u8(samples.get(base + r_src) + overlay, sample_type));
        data.push(to_u8(samples.get(base + g_src) + overlay, sample_type));
        data.push(to_u8(samples.get(base + b_src) + overlay, sample_type));
    }
    tile_or_black(frame, data)
}

/// Show one channel as gray.
fn replicate(frame: &Frame, channel: u32) -> Tile {
    let sample_type = frame.sample_type();
    let channels = frame.channels() as usize;
    let samples = frame.samples();

    let mut data = Vec::with_capacity(frame.pixel_count() * 3);
    for p in 0..frame.pixel_count() {
        let v = to_u8(samples.get(p * channels + channel as usize), sample_type);
        data.extend_from_slice(&[v, v, v]);
    }
    tile_or_black(frame, data)
}

fn tile_or_black(frame: &Frame, data: Vec<u8>) -> Tile {
    Tile::from_rgb(frame.width(), frame.height(), data)
        .unwrap_or_else(|_| Tile::black(frame.width(), frame.height()))
}
