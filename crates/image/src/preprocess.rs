use {
    crate::{Image, ImageError},
    base::Tensor,
    crates_image::DynamicImage,
};

/// Order of the colour channels inside one interleaved pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// The representations an image can arrive in before normalization.
#[derive(Debug, Clone)]
pub enum RawInput {
    /// Interleaved `[height, width, channels]` bytes tagged with their channel order,
    /// as handed out by capture devices.
    RawArray {
        tensor: Tensor<u8>,
        order: ChannelOrder,
    },
    /// A decoded file; may carry alpha or wider samples.
    Decoded(DynamicImage),
}

/// Brings any [`RawInput`] to the canonical planar RGB [`Image`].
///
/// Raw arrays are reordered to RGB when tagged BGR; decoded images are reduced to
/// 8-bit RGB, dropping any alpha channel. Anything that does not end up as a rank 3
/// tensor with 3 channels is rejected with [`ImageError::Precondition`].
pub fn normalize(input: RawInput) -> Result<Image, ImageError> {
    let (tensor, order) = match input {
        RawInput::RawArray { tensor, order } => (tensor, order),
        RawInput::Decoded(decoded) => {
            let rgb = decoded.to_rgb8();
            let (width, height) = rgb.dimensions();
            let tensor = Tensor::new(
                vec![height as usize, width as usize, Image::CHANNELS],
                rgb.into_raw(),
            )?;
            (tensor, ChannelOrder::Rgb)
        }
    };

    if tensor.ndim() != 3 {
        return Err(ImageError::Precondition(format!(
            "input must be dim=3, got shape {:?}",
            tensor.shape
        )));
    }
    if tensor.shape[2] != Image::CHANNELS {
        return Err(ImageError::Precondition(format!(
            "input must be HWC with 3 channels, got shape {:?}",
            tensor.shape
        )));
    }

    let tensor = match order {
        ChannelOrder::Rgb => tensor,
        ChannelOrder::Bgr => swap_red_blue(tensor),
    };

    Image::from_planar(tensor.interleaved_to_planar()?)
}

fn swap_red_blue(mut tensor: Tensor<u8>) -> Tensor<u8> {
    for pixel in tensor.data.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
    tensor
}
