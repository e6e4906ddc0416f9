use crate::*;
use image::Image;

/// A pixel position in the equirectangular image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub row: i32,
    pub col: i32,
}

impl BoundaryPoint {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// The outline of a field of view in equirectangular pixel space.
///
/// The point list is treated as closed: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPolygon {
    points: Vec<BoundaryPoint>,
}

impl BoundaryPolygon {
    pub fn new(points: Vec<BoundaryPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every consecutive pair, ending with the (last, first) pair.
    pub fn cyclic_pairs(&self) -> impl Iterator<Item = (BoundaryPoint, BoundaryPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Equirectangular to perspective reprojection.
///
/// Implementations are configured once (output size, horizontal FOV, interpolation)
/// and are deterministic for fixed inputs.
pub trait Projector {
    /// Samples the perspective crop seen at `rotation`.
    fn project(&self, equi: &Image, rotation: &Rotation) -> Result<Image, EquiError>;

    /// Outlines the field of view at `rotation`, in `equi` pixel coordinates.
    fn boundary(&self, equi: &Image, rotation: &Rotation) -> Result<BoundaryPolygon, EquiError>;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn project(&self, equi: &Image, rotation: &Rotation) -> Result<Image, EquiError> {
        (**self).project(equi, rotation)
    }

    fn boundary(&self, equi: &Image, rotation: &Rotation) -> Result<BoundaryPolygon, EquiError> {
        (**self).boundary(equi, rotation)
    }
}

impl<P: Projector + ?Sized> Projector for Box<P> {
    fn project(&self, equi: &Image, rotation: &Rotation) -> Result<Image, EquiError> {
        (**self).project(equi, rotation)
    }

    fn boundary(&self, equi: &Image, rotation: &Rotation) -> Result<BoundaryPolygon, EquiError> {
        (**self).boundary(equi, rotation)
    }
}
