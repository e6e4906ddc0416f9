use {
    crate::*,
    base::{Vec2, log_debug},
    minifb::{KeyRepeat, Window, WindowOptions},
    std::{
        thread,
        time::{Duration, Instant},
    },
};

// pumping granularity while waiting for a key
const PUMP_INTERVAL: Duration = Duration::from_micros(200);

/// A minifb window. Closing it reports [`Key::Escape`].
pub struct MinifbPreview {
    window: Window,
}

impl MinifbPreview {
    pub fn new(title: &str, size: Vec2<usize>) -> Result<Self, PreviewError> {
        let mut window = Window::new(title, size.x, size.y, WindowOptions::default())?;
        // no update rate limit, so a key poll stays within its wait
        window.set_target_fps(0);
        log_debug!("preview window {}x{} opened", size.x, size.y);
        Ok(Self { window })
    }

    fn pressed(&self) -> Option<Key> {
        if !self.window.is_open() {
            return Some(Key::Escape);
        }
        self.window
            .get_keys_pressed(KeyRepeat::Yes)
            .into_iter()
            .next()
            .map(map_key)
    }
}

fn map_key(key: minifb::Key) -> Key {
    match key {
        minifb::Key::Q => Key::Q,
        minifb::Key::W => Key::W,
        minifb::Key::A => Key::A,
        minifb::Key::S => Key::S,
        minifb::Key::D => Key::D,
        minifb::Key::Escape => Key::Escape,
        _ => Key::Other,
    }
}

impl Preview for MinifbPreview {
    fn present(&mut self, pixels: &[u32], size: Vec2<usize>) -> Result<(), PreviewError> {
        self.window.update_with_buffer(pixels, size.x, size.y)?;
        Ok(())
    }

    fn poll_key(&mut self, wait: Duration) -> Option<Key> {
        // present() already pumped events once for this frame
        if let Some(key) = self.pressed() {
            return Some(key);
        }
        poll_until(wait, || {
            self.window.update();
            self.pressed()
        })
    }
}

// calls `pump` every PUMP_INTERVAL until it yields a key or `wait` has passed
fn poll_until(wait: Duration, mut pump: impl FnMut() -> Option<Key>) -> Option<Key> {
    let deadline = Instant::now() + wait;
    while Instant::now() < deadline {
        thread::sleep(PUMP_INTERVAL);
        if let Some(key) = pump() {
            return Some(key);
        }
    }
    None
}
