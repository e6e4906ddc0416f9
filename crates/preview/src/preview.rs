use {
    crate::*,
    base::Vec2,
    std::time::Duration,
};

/// Where the controller shows frames and gets its key events from.
pub trait Preview {
    /// Shows one frame of packed `0xFFRRGGBB` pixels, `size.x` wide and `size.y` high.
    fn present(&mut self, pixels: &[u32], size: Vec2<usize>) -> Result<(), PreviewError>;

    /// Waits at most `wait` for a key press.
    fn poll_key(&mut self, wait: Duration) -> Option<Key>;
}

impl<V: Preview + ?Sized> Preview for &mut V {
    fn present(&mut self, pixels: &[u32], size: Vec2<usize>) -> Result<(), PreviewError> {
        (**self).present(pixels, size)
    }

    fn poll_key(&mut self, wait: Duration) -> Option<Key> {
        (**self).poll_key(wait)
    }
}

impl<V: Preview + ?Sized> Preview for Box<V> {
    fn present(&mut self, pixels: &[u32], size: Vec2<usize>) -> Result<(), PreviewError> {
        (**self).present(pixels, size)
    }

    fn poll_key(&mut self, wait: Duration) -> Option<Key> {
        (**self).poll_key(wait)
    }
}

/// No display and no keyboard. The loop runs until the source ends.
#[derive(Debug, Default)]
pub struct HeadlessPreview {
    frames: u64,
}

impl HeadlessPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Preview for HeadlessPreview {
    fn present(&mut self, _pixels: &[u32], _size: Vec2<usize>) -> Result<(), PreviewError> {
        self.frames += 1;
        Ok(())
    }

    fn poll_key(&mut self, _wait: Duration) -> Option<Key> {
        None
    }
}
