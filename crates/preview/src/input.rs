use equi::Axis;

/// Keys the preview distinguishes; everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Q,
    W,
    A,
    S,
    D,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Step `axis` by `sign` times the controller's rotation step.
    Rotate { axis: Axis, sign: f32 },
}

/// Key to action table.
///
/// Roll and pitch each get a pair of keys moving the same axis in opposite directions.
/// Yaw is left unbound.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    quit: Vec<Key>,
    roll_increase: Key,
    roll_decrease: Key,
    pitch_increase: Key,
    pitch_decrease: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: vec![Key::Q, Key::Escape],
            roll_increase: Key::S,
            roll_decrease: Key::W,
            pitch_increase: Key::A,
            pitch_decrease: Key::D,
        }
    }
}

impl KeyBindings {
    pub fn with_quit(mut self, keys: Vec<Key>) -> Self {
        self.quit = keys;
        self
    }

    pub fn with_roll(mut self, increase: Key, decrease: Key) -> Self {
        self.roll_increase = increase;
        self.roll_decrease = decrease;
        self
    }

    pub fn with_pitch(mut self, increase: Key, decrease: Key) -> Self {
        self.pitch_increase = increase;
        self.pitch_decrease = decrease;
        self
    }

    pub fn action(&self, key: Key) -> Option<Action> {
        if self.quit.contains(&key) {
            Some(Action::Quit)
        } else if key == self.roll_increase {
            Some(Action::Rotate { axis: Axis::Roll, sign: 1.0 })
        } else if key == self.roll_decrease {
            Some(Action::Rotate { axis: Axis::Roll, sign: -1.0 })
        } else if key == self.pitch_increase {
            Some(Action::Rotate { axis: Axis::Pitch, sign: 1.0 })
        } else if key == self.pitch_decrease {
            Some(Action::Rotate { axis: Axis::Pitch, sign: -1.0 })
        } else {
            None
        }
    }
}
