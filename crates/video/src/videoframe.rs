use {
    base::Tensor,
    image::{ChannelOrder, RawInput},
};

/// One captured frame: interleaved 8-bit pixels, `[height, width, 3]`, in the
/// channel order the source delivers.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub order: ChannelOrder,
    pub data: Tensor<u8>,
}

impl VideoFrame {
    /// Hands the pixels to the preprocessor, keeping the channel order tag.
    pub fn into_input(self) -> RawInput {
        RawInput::RawArray {
            tensor: self.data,
            order: self.order,
        }
    }
}
