//! Frame source over a directory of image files.
//!
//! Each file is one frame; frame ids follow the lexical order of the file
//! names. Grayscale, gray+alpha, RGB and RGBA images map to 1, 2, 3 and 4
//! channels, keeping 8- or 16-bit depth.

use annotile_core::{AnnotileError, DatasetShape, Frame, FrameSource, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extensions recognized as frames.
pub const FRAME_EXTENSIONS: &[&str] = &["png", "tif", "tiff"];

/// Dataset stored as one image file per frame.
pub struct ImageDirSource {
    dir: PathBuf,
    files: Vec<PathBuf>,
    shape: DatasetShape,
    open: bool,
}

impl ImageDirSource {
    /// Open a dataset directory.
    ///
    /// Fails with `Dataset` when the directory holds no frame files.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let (files, shape) = scan(&dir)?;
        info!(
            "Opened {} with {} frames of {}x{}x{}",
            dir.display(),
            shape.count,
            shape.height,
            shape.width,
            shape.channels
        );
        Ok(Self {
            dir,
            files,
            shape,
            open: true,
        })
    }

    /// Rescan the directory after it was closed or rewritten.
    pub fn reopen(&mut self) -> Result<()> {
        let (files, shape) = scan(&self.dir)?;
        self.files = files;
        self.shape = shape;
        self.open = true;
        info!("Reopened {} ({} frames)", self.dir.display(), shape.count);
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing frame `id`.
    pub fn frame_path(&self, id: u64) -> Option<&Path> {
        self.files.get(id as usize).map(PathBuf::as_path)
    }
}

impl FrameSource for ImageDirSource {
    fn shape(&self) -> DatasetShape {
        self.shape
    }

    fn read(&mut self, id: u64) -> Result<Frame> {
        if !self.open {
            return Err(AnnotileError::Dataset(format!(
                "{} is closed",
                self.dir.display()
            )));
        }
        let path = self
            .files
            .get(id as usize)
            .ok_or(AnnotileError::IndexOutOfRange {
                id,
                count: self.shape.count,
            })?;

        debug!("Reading frame {} from {}", id, path.display());
        let frame = decode_file(path)?;
        if frame.height() != self.shape.height
            || frame.width() != self.shape.width
            || frame.channels() != self.shape.channels
        {
            warn!(
                "Frame {} is {}x{}x{}, dataset is {}x{}x{}",
                id,
                frame.height(),
                frame.width(),
                frame.channels(),
                self.shape.height,
                self.shape.width,
                self.shape.channels
            );
        }
        Ok(frame)
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            info!("Closed {}", self.dir.display());
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// List frame files and probe the dataset shape from the first one.
fn scan(dir: &Path) -> Result<(Vec<PathBuf>, DatasetShape)> {
    if !dir.is_dir() {
        return Err(AnnotileError::Dataset(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_frame_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    let first = files.first().ok_or_else(|| {
        AnnotileError::Dataset(format!("no frame files found in {}", dir.display()))
    })?;
    let probe = decode_file(first)?;

    let shape = DatasetShape {
        count: files.len() as u64,
        height: probe.height(),
        width: probe.width(),
        channels: probe.channels(),
        sample_type: probe.sample_type(),
    };
    Ok((files, shape))
}

fn decode_file(path: &Path) -> Result<Frame> {
    let img = image::open(path)
        .map_err(|e| AnnotileError::Decode(format!("{}: {}", path.display(), e)))?;
    frame_from_image(img)
}

/// Convert a decoded image into a frame, keeping its channel layout.
pub fn frame_from_image(img: DynamicImage) -> Result<Frame> {
    let (width, height) = (img.width(), img.height());
    match img {
        DynamicImage::ImageLuma8(buf) => Frame::from_u8(height, width, 1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => Frame::from_u8(height, width, 2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => Frame::from_u8(height, width, 3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => Frame::from_u8(height, width, 4, buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => Frame::from_u16(height, width, 1, buf.into_raw()),
        DynamicImage::ImageLumaA16(buf) => Frame::from_u16(height, width, 2, buf.into_raw()),
        DynamicImage::ImageRgb16(buf) => Frame::from_u16(height, width, 3, buf.into_raw()),
        DynamicImage::ImageRgba16(buf) => Frame::from_u16(height, width, 4, buf.into_raw()),
        // Float images are quantized to 16 bits.
        other => Frame::from_u16(height, width, 4, other.into_rgba16().into_raw()),
    }
}
