//! End to end: image files on disk through the cache and onto a sheet.

use annotile_core::{ChannelMode, FrameSource, LabelColor, NamedColor, PageGrid};
use annotile_labels::{ColorAssignment, LabelTable};
use annotile_media::ImageDirSource;
use annotile_render::{Pager, SheetPainter, TileCache};
use image::{ImageBuffer, Rgba};
use std::path::Path;

fn write_frame(dir: &Path, name: &str, value: [u16; 4]) {
    let img: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_pixel(4, 4, Rgba(value));
    img.save(dir.join(name)).unwrap();
}

/// Seven frames, frame `i` holding `[i*256, 2*256, 3*256, 0]`.
fn seven_frames(dir: &Path) {
    for i in 0..7u16 {
        write_frame(dir, &format!("f{:02}.png", i), [i * 256, 512, 768, 0]);
    }
}

#[test]
fn composite_from_disk() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    seven_frames(tmp.path());
    let mut source = ImageDirSource::open(tmp.path()).unwrap();
    let mut cache = TileCache::new(10, ChannelMode::Composite);

    // R <- ch1, G <- ch2, B <- ch0
    let tile = cache.tile(&mut source, 5).unwrap();
    assert_eq!(tile.pixel(3, 3), [2, 3, 5]);

    let single = cache.get(&mut source, 5, ChannelMode::SingleChannel(2)).unwrap();
    assert_eq!(single.pixel(0, 0), [3, 3, 3]);
    assert_eq!(cache.len(), 2);
}

#[test]
fn overlay_saturates() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    write_frame(tmp.path(), "a.png", [0, 65000, 100, 60000]);
    let mut source = ImageDirSource::open(tmp.path()).unwrap();
    let mut cache = TileCache::new(1, ChannelMode::Composite);

    let tile = cache.tile(&mut source, 0).unwrap();
    // R clips to 65535 -> 255, G = 60100 >> 8, B = 60000 >> 8
    assert_eq!(tile.pixel(0, 0), [255, 234, 234]);
}

#[test]
fn last_page_is_partial() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    seven_frames(tmp.path());
    let mut source = ImageDirSource::open(tmp.path()).unwrap();
    let mut cache = TileCache::new(12, ChannelMode::Composite);
    let mut pager = Pager::new(PageGrid::default(), source.shape().count);

    assert_eq!(pager.page_count(), 2);
    pager.go_to(2, &mut cache, &mut source).unwrap();
    assert_eq!(pager.visible_ids(), 6..7);
    assert!(!pager.next_page(&mut cache, &mut source).unwrap());

    // Slots past the dataset render black without touching the cache.
    let ids: Vec<u64> = PageGrid::default().slots(2).map(|(_, _, id)| id).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10, 11]);
    let blank = cache.tile(&mut source, 11).unwrap();
    assert!(blank.is_black());
    assert_eq!((blank.width(), blank.height()), (4, 4));
    assert!(!cache.contains(11, ChannelMode::Composite));
}

#[test]
fn sheet_with_labels() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    seven_frames(tmp.path());
    let mut source = ImageDirSource::open(tmp.path()).unwrap();
    let mut cache = TileCache::new(12, ChannelMode::Composite);

    let mut labels = LabelTable::new(source.shape().count);
    labels.flag(1, 2).unwrap();
    labels.flag(2, 1).unwrap();

    let names = vec!["junk".to_string(), "cell".into(), "cluster".into()];
    let mut painter = SheetPainter::new(ColorAssignment::with_seed(9), names, 9).with_border(1);
    let sheet = painter
        .paint_page(&mut cache, &mut source, PageGrid::default(), 1, |id| {
            labels.get_label(id)
        })
        .unwrap();
    assert_eq!(sheet.dimensions(), (27, 18));

    // Palette order follows first appearance on the page: label 2 then label 1.
    assert_eq!(sheet.get_pixel(9, 0).0, [255, 0, 0]);
    assert_eq!(sheet.get_pixel(18, 0).0, [0, 0, 255]);
    assert_eq!(sheet.get_pixel(0, 0).0, [0, 0, 0]);
    // Tile body of frame 4 (second row, middle)
    assert_eq!(sheet.get_pixel(13, 13).0, [2, 3, 4]);

    let colors = painter.into_colors();
    assert_eq!(colors.assigned(2), Some(LabelColor::from(NamedColor::Red)));
    assert_eq!(colors.assigned(1), Some(LabelColor::from(NamedColor::Blue)));
    assert_eq!(colors.assigned(0), Some(LabelColor::BLACK));
}
