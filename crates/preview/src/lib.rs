//! Interactive perspective preview over an equirectangular video.
//!
//! [`InteractiveController`] owns the frame loop: it reads from a [`video::CaptureHandle`],
//! projects every frame at the current [`equi::Rotation`], shows it through a [`Preview`]
//! and turns key events into rotation steps. Per-frame latencies are collected in
//! [`FrameTimings`] and rendered with [`render_timing_chart`] once the loop drains.

pub mod chart;
pub mod controller;
pub mod error;
pub mod input;
pub mod preview;
pub mod timing;
pub mod window;

pub use chart::render_timing_chart;
pub use controller::{ControllerConfig, InteractiveController, RunReport, StopReason};
pub use error::PreviewError;
pub use input::{Action, Key, KeyBindings};
pub use preview::{HeadlessPreview, Preview};
pub use timing::FrameTimings;
pub use window::MinifbPreview;
