//! Image handling for the bounding-FOV tools.
//!
//! Everything downstream works on [`Image`], an 8-bit RGB tensor in planar
//! `[channels, height, width]` layout. [`normalize`] is the only way in from
//! capture frames and decoded files; [`codec`] wraps the `image` crate for disk I/O.

pub mod codec;
pub mod draw;
pub mod error;
pub mod image;
pub mod preprocess;

pub use codec::{encode_jpeg, load, save};
pub use draw::{draw_line, draw_polyline};
pub use error::ImageError;
pub use image::Image;
pub use preprocess::{ChannelOrder, RawInput, normalize};
