use {
    crate::*,
    base::{log_debug, log_info, log_warn},
    equi::{Projector, Rotation},
    image::{Image, normalize},
    std::time::{Duration, Instant},
    video::{CaptureHandle, FrameSource, VideoError},
};

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    step: f32,
    poll_wait: Duration,
    bindings: KeyBindings,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            step: 1.0f32.to_radians(),
            poll_wait: Duration::from_millis(1),
            bindings: KeyBindings::default(),
        }
    }
}

impl ControllerConfig {
    /// Set the rotation change per key press, in radians.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set how long each frame waits for a key.
    pub fn with_poll_wait(mut self, poll_wait: Duration) -> Self {
        self.poll_wait = poll_wait;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn poll_wait(&self) -> Duration {
        self.poll_wait
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    Quit,
}

/// What a finished run leaves behind.
#[derive(Debug)]
pub struct RunReport {
    pub timings: FrameTimings,
    pub mean: Option<Duration>,
    pub rotation: Rotation,
    pub stop: StopReason,
    pub chart: Image,
    pub release_error: Option<VideoError>,
}

/// Drives the preview loop for one capture.
pub struct InteractiveController<P: Projector> {
    projector: P,
    config: ControllerConfig,
}

impl<P: Projector> InteractiveController<P> {
    pub fn new(projector: P, config: ControllerConfig) -> Self {
        Self { projector, config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Runs until the source ends or a quit key arrives.
    ///
    /// Each frame is projected at the rotation left by the keys of the frames before it;
    /// the key polled after a frame only affects the next one. The capture is released
    /// exactly once: explicitly when the loop drains, or by its guard when an error
    /// leaves early. A failed release is logged and returned in the report.
    pub fn run<S: FrameSource, V: Preview>(
        &self,
        mut capture: CaptureHandle<S>,
        preview: &mut V,
    ) -> Result<RunReport, PreviewError> {
        let mut rotation = Rotation::default();
        let mut timings = FrameTimings::new();
        let mut quit = false;

        let stop = loop {
            if quit {
                break StopReason::Quit;
            }
            let Some(frame) = capture.read()? else {
                break StopReason::EndOfStream;
            };
            let equi = normalize(frame.into_input())?;

            let start = Instant::now();
            let pers = self.projector.project(&equi, &rotation)?;
            let pixels = pers.to_u32();
            timings.push(start.elapsed());

            preview.present(&pixels, pers.size())?;

            let Some(key) = preview.poll_key(self.config.poll_wait) else {
                continue;
            };
            match self.config.bindings.action(key) {
                Some(Action::Quit) => {
                    log_debug!("quit requested after {} frames", timings.len());
                    quit = true;
                }
                Some(Action::Rotate { axis, sign }) => {
                    rotation.step(axis, sign * self.config.step);
                    log_debug!(
                        "rotation roll {:.4} pitch {:.4} yaw {:.4}",
                        rotation.roll,
                        rotation.pitch,
                        rotation.yaw
                    );
                }
                None => {}
            }
        };

        let release_error = match capture.release() {
            Ok(()) => None,
            Err(error) => {
                log_warn!("capture release failed: {}", error);
                Some(error)
            }
        };

        let mean = timings.mean();
        match mean {
            Some(mean) => log_info!("mean {:?} over {} frames", mean, timings.len()),
            None => log_info!("no frames processed"),
        }
        let chart = render_timing_chart(&timings);

        Ok(RunReport {
            timings,
            mean,
            rotation,
            stop,
            chart,
            release_error,
        })
    }
}
