//! Random-access frame source interface.
//!
//! Implementations hold the open dataset handle. The tile cache never owns a
//! source; callers pass it in per call so they can close and reopen the
//! dataset around writes.

use crate::error::Result;
use crate::frame::{Frame, SampleType};
use serde::{Deserialize, Serialize};

/// Shape of a frame dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetShape {
    /// Number of frames
    pub count: u64,
    /// Frame height in pixels
    pub height: u32,
    /// Frame width in pixels
    pub width: u32,
    /// Channels per pixel
    pub channels: u32,
    /// Element type
    pub sample_type: SampleType,
}

impl DatasetShape {
    /// Whether `id` addresses a frame in the dataset.
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        id < self.count
    }
}

/// Random-access reader of raw frames.
pub trait FrameSource {
    /// Shape of the dataset as of opening.
    fn shape(&self) -> DatasetShape;

    /// Read one frame.
    ///
    /// Fails with `IndexOutOfRange` when `id >= shape().count`, and with
    /// `Dataset` when the source has been closed.
    fn read(&mut self, id: u64) -> Result<Frame>;

    /// Release the dataset handle.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn shape(&self) -> DatasetShape {
        (**self).shape()
    }

    fn read(&mut self, id: u64) -> Result<Frame> {
        (**self).read(id)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
