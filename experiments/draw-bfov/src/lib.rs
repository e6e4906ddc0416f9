pub mod config;
pub mod harness;

pub use config::{HarnessConfig, Mode};
pub use harness::{run, run_image_mode, run_video_mode};
