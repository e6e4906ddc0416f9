use {
    crate::*,
    base::{log_debug, log_info, log_warn},
};

/// A blocking source of frames, such as a decoder process or a device.
pub trait FrameSource {
    /// Reads the next frame. `Ok(None)` means the stream has ended.
    fn read(&mut self) -> Result<Option<VideoFrame>, VideoError>;

    /// Releases the underlying resource.
    fn release(&mut self) -> Result<(), VideoError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        (**self).read()
    }

    fn release(&mut self) -> Result<(), VideoError> {
        (**self).release()
    }
}

/// Scoped ownership of an open [`FrameSource`].
///
/// The source is released exactly once: either by an explicit [`CaptureHandle::release`]
/// or, on any path that skips it (early return, `?`, panic unwinding), when the handle
/// is dropped.
pub struct CaptureHandle<S: FrameSource> {
    source: S,
    released: bool,
    frames_read: u64,
}

impl<S: FrameSource> CaptureHandle<S> {
    pub fn open(source: S) -> Self {
        log_info!("capture opened");
        Self {
            source,
            released: false,
            frames_read: 0,
        }
    }

    pub fn read(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.released {
            return Err(VideoError::Stream("capture already released".to_string()));
        }
        let frame = self.source.read()?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Releases the source. Later calls are no-ops returning `Ok(())`.
    ///
    /// The handle counts as released even when the source reports a failure, so the
    /// release is never attempted twice.
    pub fn release(&mut self) -> Result<(), VideoError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        log_debug!("releasing capture after {} frames", self.frames_read);
        self.source.release()
    }
}

impl<S: FrameSource> Drop for CaptureHandle<S> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(error) = self.release() {
                log_warn!("capture release failed during drop: {}", error);
            }
        }
    }
}
