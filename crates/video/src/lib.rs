//! Frame capture for the interactive preview.
//!
//! [`FrameSource`] is the blocking read/release seam; [`CaptureHandle`] owns an open
//! source and guarantees its release; [`FfmpegSource`] decodes video files through the
//! system `ffmpeg` binary.

pub mod capture;
pub mod error;
pub mod ffmpeg;
pub mod videoframe;

pub use capture::{CaptureHandle, FrameSource};
pub use error::VideoError;
pub use ffmpeg::{FfmpegConfig, FfmpegSource};
pub use videoframe::VideoFrame;
