//! Frame source backed by frames already in memory.

use annotile_core::{AnnotileError, DatasetShape, Frame, FrameSource, Result};

/// In-memory frame stack.
///
/// Counts how many frames it has served so callers can see cache behaviour.
pub struct MemorySource {
    frames: Vec<Frame>,
    shape: DatasetShape,
    open: bool,
    reads: u64,
}

impl MemorySource {
    /// Create a source; every frame must share the first frame's shape.
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| AnnotileError::Dataset("dataset contains no frames".into()))?;
        let shape = DatasetShape {
            count: frames.len() as u64,
            height: first.height(),
            width: first.width(),
            channels: first.channels(),
            sample_type: first.sample_type(),
        };

        for (i, frame) in frames.iter().enumerate() {
            if frame.height() != shape.height
                || frame.width() != shape.width
                || frame.channels() != shape.channels
                || frame.sample_type() != shape.sample_type
            {
                return Err(AnnotileError::Dataset(format!(
                    "frame {} has shape ({}, {}, {}) but the dataset is ({}, {}, {})",
                    i,
                    frame.height(),
                    frame.width(),
                    frame.channels(),
                    shape.height,
                    shape.width,
                    shape.channels
                )));
            }
        }

        Ok(Self {
            frames,
            shape,
            open: true,
            reads: 0,
        })
    }

    /// Number of successful reads so far.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Make the frames readable again after `close`.
    pub fn reopen(&mut self) {
        self.open = true;
    }
}

impl FrameSource for MemorySource {
    fn shape(&self) -> DatasetShape {
        self.shape
    }

    fn read(&mut self, id: u64) -> Result<Frame> {
        if !self.open {
            return Err(AnnotileError::Dataset("source is closed".into()));
        }
        let frame = self
            .frames
            .get(id as usize)
            .cloned()
            .ok_or(AnnotileError::IndexOutOfRange {
                id,
                count: self.shape.count,
            })?;
        self.reads += 1;
        Ok(frame)
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
