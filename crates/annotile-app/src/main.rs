//! Annotile - headless front end
//!
//! Opens a dataset directory, renders one page of tiles as a contact sheet
//! and writes it next to the configured output directory.
//!
//! Usage: annotile <dataset-dir> [config.json] [page]

use annotile_core::{Config, FrameSource};
use annotile_labels::{ColorAssignment, LabelTable};
use annotile_media::ImageDirSource;
use annotile_render::{Pager, SheetPainter, TileCache};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Labels live beside the frames under this name.
const LABEL_FILE: &str = "labels.json";

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let Some(dataset) = args.next().map(PathBuf::from) else {
        bail!("usage: annotile <dataset-dir> [config.json] [page]");
    };
    let config = match args.next() {
        Some(path) => Config::load(Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        None => Config::default(),
    };
    let page: u64 = match args.next() {
        Some(p) => p.parse().with_context(|| format!("invalid page '{}'", p))?,
        None => 1,
    };

    info!("Annotile starting...");
    let mut source = ImageDirSource::open(&dataset)
        .with_context(|| format!("opening dataset {}", dataset.display()))?;
    let shape = source.shape();

    let labels = load_labels(&dataset, shape.count)?;
    let mut cache = TileCache::from_config(&config.cache());
    let mut pager = Pager::new(config.page_grid(), shape.count);
    pager.go_to(page, &mut cache, &mut source)?;
    if pager.page() != page {
        warn!("Page {} does not exist, showing page {}", page, pager.page());
    }

    let mut painter = SheetPainter::new(
        ColorAssignment::new(),
        config.label_names(),
        config.tile_pixel_size,
    );
    let sheet = painter.paint_page(
        &mut cache,
        &mut source,
        pager.grid(),
        pager.page(),
        |id| labels.get_label(id),
    )?;
    source.close();

    let stem = dataset
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".into());
    let out = config
        .output_dir
        .join(format!("{}_page{}.png", stem, pager.page()));
    sheet
        .save(&out)
        .with_context(|| format!("writing {}", out.display()))?;

    let stats = cache.stats();
    info!(
        "Wrote {} (page {} / {}, {} hits, {} misses, {} cached)",
        out.display(),
        pager.page(),
        pager.page_count(),
        stats.hits,
        stats.misses,
        cache.len()
    );

    let colors = painter.into_colors();
    for (id, name) in config.label_names().iter().enumerate() {
        if let Some(color) = colors.assigned(id as u32) {
            info!("  {:>2} {:<12} {}", id, name, color.to_hex());
        }
    }
    Ok(())
}

fn load_labels(dataset: &Path, count: u64) -> Result<LabelTable> {
    let path = dataset.join(LABEL_FILE);
    if !path.exists() {
        return Ok(LabelTable::new(count));
    }
    let (table, _names) = LabelTable::load_json(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    if table.len() != count {
        warn!(
            "{} holds {} labels for {} frames",
            path.display(),
            table.len(),
            count
        );
    }
    Ok(table)
}
