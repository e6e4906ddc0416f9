use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    Axis { axis: usize, ndim: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::Axis { axis, ndim } => {
                write!(f, "axis {axis} out of range for a tensor of rank {ndim}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    // pixel buffers are large, so only the shape and element count are shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    let mut product: usize = 1;
    for &dim in shape {
        product = product
            .checked_mul(dim)
            .ok_or(TensorError::ShapeOverflow)?;
    }
    Ok(product)
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        if product != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected: product,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Copy> Tensor<T> {
    /// Reorders a rank-3 `[a, b, c]` tensor into `[c, a, b]`.
    ///
    /// This is the interleaved-to-planar move: an HWC pixel buffer becomes CHW.
    pub fn interleaved_to_planar(&self) -> Result<Self, TensorError> {
        let [a, b, c] = rank3(&self.shape)?;
        let plane = a * b;
        let mut data = Vec::with_capacity(self.data.len());
        for k in 0..c {
            data.extend((0..plane).map(|i| self.data[i * c + k]));
        }
        Tensor::new(vec![c, a, b], data)
    }

    /// Reorders a rank-3 `[c, a, b]` tensor into `[a, b, c]`, the inverse of
    /// [`Tensor::interleaved_to_planar`].
    pub fn planar_to_interleaved(&self) -> Result<Self, TensorError> {
        let [c, a, b] = rank3(&self.shape)?;
        let plane = a * b;
        let mut data = Vec::with_capacity(self.data.len());
        for i in 0..plane {
            data.extend((0..c).map(|k| self.data[k * plane + i]));
        }
        Tensor::new(vec![a, b, c], data)
    }
}

fn rank3(shape: &[usize]) -> Result<[usize; 3], TensorError> {
    match shape {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(TensorError::Axis {
            axis: 2,
            ndim: shape.len(),
        }),
    }
}
