//! Field-of-view geometry over equirectangular panoramas.
//!
//! [`Projector`] is the seam to the reprojection maths; [`Equi2Pers`] is the
//! bundled implementation. [`BoundaryRenderer`] draws the outline a projector
//! reports, skipping the segments that jump across the panorama's left/right seam.

pub mod boundary;
pub mod equi2pers;
pub mod error;
pub mod projector;
pub mod rotation;

pub use boundary::{BoundaryRenderer, BoundaryStyle};
pub use equi2pers::{Equi2Pers, Interpolation, PersConfig};
pub use error::EquiError;
pub use projector::{BoundaryPoint, BoundaryPolygon, Projector};
pub use rotation::{Axis, Mat3, Rotation, mat_mul, mat_vec};
