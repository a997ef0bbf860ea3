//! Tile cache behaviour against a real in-memory dataset.

use annotile_core::{ChannelMode, Config, Frame, FrameSource, PageGrid};
use annotile_media::MemorySource;
use annotile_render::{Pager, TileCache};

/// Frames whose every sample is `(id + 1) * 256`, four channels.
fn dataset(count: u16) -> MemorySource {
    let frames = (0..count)
        .map(|id| Frame::from_u16(2, 2, 4, vec![(id + 1) * 256; 16]).unwrap())
        .collect();
    MemorySource::new(frames).unwrap()
}

fn resident(cache: &TileCache) -> Vec<u64> {
    cache.keys().map(|k| k.frame_id).collect()
}

#[test]
fn capacity_two_keeps_last_two() {
    let mut source = dataset(3);
    let mut cache = TileCache::new(2, ChannelMode::Composite);
    for id in 0..3 {
        cache.tile(&mut source, id).unwrap();
    }
    assert_eq!(resident(&cache), vec![1, 2]);
    assert!(!cache.contains(0, ChannelMode::Composite));
}

#[test]
fn repeated_get_reads_once() {
    let mut source = dataset(4);
    let mut cache = TileCache::new(4, ChannelMode::Composite);
    cache.get(&mut source, 2, ChannelMode::Composite).unwrap();
    cache.get(&mut source, 2, ChannelMode::Composite).unwrap();
    assert_eq!(source.reads(), 1);
}

#[test]
fn mode_switch_forces_fresh_read() {
    let mut source = dataset(4);
    let mut cache = TileCache::new(4, ChannelMode::Composite);
    cache.tile(&mut source, 0).unwrap();
    cache.tile(&mut source, 1).unwrap();
    assert_eq!(source.reads(), 2);

    cache.set_mode(ChannelMode::SingleChannel(3));
    let tile = cache.tile(&mut source, 0).unwrap();
    // Channel 3 of frame 0 is 256 -> 1.
    assert_eq!(tile.pixel(1, 1), [1, 1, 1]);
    assert_eq!(source.reads(), 3);
    assert_eq!(cache.len(), 1);
}

#[test]
fn single_channel_past_range_is_black() {
    let mut source = dataset(1);
    let mut cache = TileCache::new(4, ChannelMode::Composite);
    let tile = cache.get(&mut source, 0, ChannelMode::SingleChannel(7)).unwrap();
    assert!(tile.is_black());
    assert_eq!((tile.width(), tile.height()), (2, 2));
}

#[test]
fn out_of_range_frame_is_blank() {
    let mut source = dataset(2);
    let mut cache = TileCache::new(4, ChannelMode::Composite);
    let tile = cache.tile(&mut source, 50).unwrap();
    assert!(tile.is_black());
    assert_eq!(source.reads(), 0);
    assert!(cache.is_empty());
}

#[test]
fn closed_source_error_propagates() {
    let mut source = dataset(2);
    let mut cache = TileCache::new(4, ChannelMode::Composite);
    cache.tile(&mut source, 0).unwrap();
    source.close();

    // Cached tiles stay available, uncached ones surface the error.
    assert!(cache.tile(&mut source, 0).is_ok());
    assert!(cache.tile(&mut source, 1).is_err());

    source.reopen();
    assert!(cache.tile(&mut source, 1).is_ok());
}

#[test]
fn config_drives_cache_and_paging() {
    let config = Config::from_json(
        br#"{"cache_capacity": 4, "default_channel_mode": 1, "grid": {"columns": 2, "rows": 2}}"#,
    )
    .unwrap();
    let mut source = dataset(10);
    let mut cache = TileCache::from_config(&config.cache());
    assert_eq!(cache.capacity(), 4);
    assert_eq!(cache.mode(), ChannelMode::SingleChannel(1));

    let mut pager = Pager::new(config.page_grid(), source.shape().count);
    pager.preload(&mut cache, &mut source).unwrap();
    assert_eq!(resident(&cache), vec![0, 1, 2, 3]);

    pager.next_page(&mut cache, &mut source).unwrap();
    assert_eq!(resident(&cache), vec![4, 5, 6, 7]);
    assert!(cache.len() <= cache.capacity());

    // Rendering the page is now all hits.
    let before = source.reads();
    for (_, _, id) in PageGrid::new(2, 2).slots(pager.page()) {
        cache.tile(&mut source, id).unwrap();
    }
    assert_eq!(source.reads(), before);
}

#[test]
fn dyn_source_works() {
    let mut source: Box<dyn FrameSource> = Box::new(dataset(3));
    let mut cache = TileCache::new(2, ChannelMode::Composite);
    let tile = cache.tile(&mut source, 1).unwrap();
    // All channels 512: R = (512 + 512) / 256
    assert_eq!(tile.pixel(0, 0), [4, 4, 4]);
}
