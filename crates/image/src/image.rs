use {
    crate::ImageError,
    base::{Tensor, Vec2},
};

/// An 8-bit RGB image in planar layout, shape `[3, height, width]`.
///
/// The shape is checked on construction, so every `Image` in circulation has
/// rank 3 and exactly three channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    tensor: Tensor<u8>,
}

impl Image {
    pub const CHANNELS: usize = 3;

    pub fn from_planar(tensor: Tensor<u8>) -> Result<Self, ImageError> {
        if tensor.ndim() != 3 {
            return Err(ImageError::Precondition(format!(
                "image must have rank 3, got shape {:?}",
                tensor.shape
            )));
        }
        if tensor.shape[0] != Self::CHANNELS {
            return Err(ImageError::Precondition(format!(
                "image must have {} channels, got shape {:?}",
                Self::CHANNELS,
                tensor.shape
            )));
        }
        Ok(Self { tensor })
    }

    /// A `size.x` by `size.y` image where every pixel is `rgb`.
    pub fn filled(size: Vec2<usize>, rgb: [u8; 3]) -> Self {
        let plane = size.area();
        let mut data = Vec::with_capacity(plane * Self::CHANNELS);
        for value in rgb {
            data.extend(std::iter::repeat_n(value, plane));
        }
        Self {
            tensor: Tensor {
                shape: vec![Self::CHANNELS, size.y, size.x],
                data,
            },
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.tensor.shape
    }

    pub fn height(&self) -> usize {
        self.tensor.shape[1]
    }

    pub fn width(&self) -> usize {
        self.tensor.shape[2]
    }

    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.width(), self.height())
    }

    pub fn tensor(&self) -> &Tensor<u8> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<u8> {
        self.tensor
    }

    pub fn plane(&self, channel: usize) -> &[u8] {
        let plane = self.width() * self.height();
        &self.tensor.data[channel * plane..(channel + 1) * plane]
    }

    /// Returns `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let plane = self.width() * self.height();
        let i = y * self.width() + x;
        let d = &self.tensor.data;
        Some([d[i], d[plane + i], d[2 * plane + i]])
    }

    /// Writes one pixel; coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let plane = self.width() * self.height();
        let i = y * self.width() + x;
        let d = &mut self.tensor.data;
        d[i] = rgb[0];
        d[plane + i] = rgb[1];
        d[2 * plane + i] = rgb[2];
    }

    /// Swaps the first and last channel planes (RGB <-> BGR).
    pub fn flip_channels(&self) -> Self {
        let plane = self.width() * self.height();
        let mut data = Vec::with_capacity(self.tensor.data.len());
        data.extend_from_slice(self.plane(2));
        data.extend_from_slice(&self.tensor.data[plane..2 * plane]);
        data.extend_from_slice(self.plane(0));
        Self {
            tensor: Tensor {
                shape: self.tensor.shape.clone(),
                data,
            },
        }
    }

    /// Interleaved `[height, width, 3]` bytes, the layout encoders expect.
    pub fn to_interleaved(&self) -> Result<Vec<u8>, ImageError> {
        Ok(self.tensor.planar_to_interleaved()?.data)
    }

    /// Packs every pixel as `0xFFRRGGBB`, the layout framebuffer windows expect.
    pub fn to_u32(&self) -> Vec<u32> {
        let (r, g, b) = (self.plane(0), self.plane(1), self.plane(2));
        r.iter()
            .zip(g)
            .zip(b)
            .map(|((&r, &g), &b)| 0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
            .collect()
    }
}
