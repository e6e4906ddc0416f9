use base::{Tensor, Vec2};
use equi::{BoundaryPolygon, EquiError, Projector, Rotation};
use image::{ChannelOrder, Image, ImageError};
use preview::{
    ControllerConfig, InteractiveController, Key, Preview, PreviewError, StopReason,
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};
use video::{CaptureHandle, FrameSource, VideoError, VideoFrame};

// Scripted source: yields `frames` 4x2 frames, optionally failing a read or the release
struct MockSource {
    remaining: usize,
    next_index: u64,
    fail_read_at: Option<u64>,
    bad_shape: bool,
    fail_release: bool,
    releases: Rc<Cell<usize>>,
}

impl MockSource {
    fn new(frames: usize) -> (Self, Rc<Cell<usize>>) {
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                remaining: frames,
                next_index: 0,
                fail_read_at: None,
                bad_shape: false,
                fail_release: false,
                releases: Rc::clone(&releases),
            },
            releases,
        )
    }
}

impl FrameSource for MockSource {
    fn read(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.fail_read_at == Some(self.next_index) {
            return Err(VideoError::Stream("scripted read failure".to_string()));
        }
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.next_index += 1;
        let (shape, len) = if self.bad_shape {
            (vec![2, 4, 4], 32)
        } else {
            (vec![2, 4, 3], 24)
        };
        Ok(Some(VideoFrame {
            order: ChannelOrder::Bgr,
            data: Tensor::new(shape, vec![7u8; len])?,
        }))
    }

    fn release(&mut self) -> Result<(), VideoError> {
        self.releases.set(self.releases.get() + 1);
        if self.fail_release {
            Err(VideoError::Release("scripted release failure".to_string()))
        } else {
            Ok(())
        }
    }
}

// Replays one scripted poll result per frame, then reports no key
#[derive(Default)]
struct ScriptedPreview {
    keys: VecDeque<Option<Key>>,
    presented: Vec<(usize, Vec2<usize>)>,
}

impl ScriptedPreview {
    fn new(keys: Vec<Option<Key>>) -> Self {
        Self {
            keys: keys.into(),
            presented: Vec::new(),
        }
    }
}

impl Preview for ScriptedPreview {
    fn present(&mut self, pixels: &[u32], size: Vec2<usize>) -> Result<(), PreviewError> {
        self.presented.push((pixels.len(), size));
        Ok(())
    }

    fn poll_key(&mut self, _wait: Duration) -> Option<Key> {
        self.keys.pop_front().flatten()
    }
}

// Records the rotation of every projection and returns a fixed 3x3 crop
#[derive(Default)]
struct StubProjector {
    seen: RefCell<Vec<Rotation>>,
    fail_at: Option<usize>,
}

impl Projector for StubProjector {
    fn project(&self, equi: &Image, rotation: &Rotation) -> Result<Image, EquiError> {
        assert_eq!(equi.shape(), &[3, 2, 4]);
        let mut seen = self.seen.borrow_mut();
        if self.fail_at == Some(seen.len()) {
            return Err(EquiError::Input("scripted projection failure".to_string()));
        }
        seen.push(*rotation);
        Ok(Image::filled(Vec2::new(3, 3), [1, 2, 3]))
    }

    fn boundary(&self, _equi: &Image, _rotation: &Rotation) -> Result<BoundaryPolygon, EquiError> {
        Ok(BoundaryPolygon::default())
    }
}

fn step() -> f32 {
    ControllerConfig::default().step()
}

#[test]
fn test_config_defaults() {
    let config = ControllerConfig::default();
    assert_eq!(config.step(), 1.0f32.to_radians());
    assert_eq!(config.poll_wait(), Duration::from_millis(1));
}

#[test]
fn test_each_key_steps_one_axis() {
    let cases = [
        (Key::S, Rotation::new(step(), 0.0, 0.0)),
        (Key::W, Rotation::new(-step(), 0.0, 0.0)),
        (Key::A, Rotation::new(0.0, step(), 0.0)),
        (Key::D, Rotation::new(0.0, -step(), 0.0)),
        (Key::Other, Rotation::default()),
    ];
    for (key, expected) in cases {
        let (source, _) = MockSource::new(2);
        let projector = StubProjector::default();
        let controller = InteractiveController::new(&projector, ControllerConfig::default());
        let mut preview = ScriptedPreview::new(vec![Some(key)]);

        let report = controller
            .run(CaptureHandle::open(source), &mut preview)
            .unwrap();

        assert_eq!(report.rotation, expected, "key {key:?}");
        assert_eq!(*projector.seen.borrow(), vec![Rotation::default(), expected]);
    }
}

#[test]
fn test_key_applies_from_next_frame() {
    let (source, _) = MockSource::new(4);
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::new(vec![None, Some(Key::A), Some(Key::A), None]);

    let report = controller
        .run(CaptureHandle::open(source), &mut preview)
        .unwrap();

    let pitches: Vec<f32> = projector.seen.borrow().iter().map(|r| r.pitch).collect();
    assert_eq!(pitches, vec![0.0, 0.0, step(), 2.0 * step()]);
    assert_eq!(report.rotation.pitch, 2.0 * step());
    assert_eq!(report.stop, StopReason::EndOfStream);
}

#[test]
fn test_custom_step() {
    let (source, _) = MockSource::new(2);
    let projector = StubProjector::default();
    let controller =
        InteractiveController::new(&projector, ControllerConfig::default().with_step(0.25));
    let mut preview = ScriptedPreview::new(vec![Some(Key::S)]);

    let report = controller
        .run(CaptureHandle::open(source), &mut preview)
        .unwrap();
    assert_eq!(report.rotation, Rotation::new(0.25, 0.0, 0.0));
}

#[test]
fn test_quit_stops_after_current_frame() {
    for quit in [Key::Q, Key::Escape] {
        let (source, releases) = MockSource::new(5);
        let projector = StubProjector::default();
        let controller = InteractiveController::new(&projector, ControllerConfig::default());
        let mut preview = ScriptedPreview::new(vec![None, Some(quit)]);

        let report = controller
            .run(CaptureHandle::open(source), &mut preview)
            .unwrap();

        assert_eq!(report.stop, StopReason::Quit);
        assert_eq!(report.timings.len(), 2);
        assert_eq!(preview.presented.len(), 2);
        assert_eq!(releases.get(), 1);
        assert!(report.release_error.is_none());
    }
}

#[test]
fn test_end_of_stream_processes_every_frame() {
    let (source, releases) = MockSource::new(3);
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let report = controller
        .run(CaptureHandle::open(source), &mut preview)
        .unwrap();

    assert_eq!(report.stop, StopReason::EndOfStream);
    assert_eq!(report.timings.len(), 3);
    assert!(report.mean.is_some());
    assert_eq!(preview.presented, vec![(9, Vec2::new(3, 3)); 3]);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_empty_source_reports_no_mean() {
    let (source, releases) = MockSource::new(0);
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let report = controller
        .run(CaptureHandle::open(source), &mut preview)
        .unwrap();

    assert_eq!(report.stop, StopReason::EndOfStream);
    assert!(report.timings.is_empty());
    assert_eq!(report.mean, None);
    assert_eq!(report.chart.shape(), &[3, 480, 640]);
    assert!(projector.seen.borrow().is_empty());
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_release_failure_still_reports() {
    let (mut source, releases) = MockSource::new(2);
    source.fail_release = true;
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let report = controller
        .run(CaptureHandle::open(source), &mut preview)
        .unwrap();

    assert!(matches!(report.release_error, Some(VideoError::Release(_))));
    assert_eq!(report.timings.len(), 2);
    assert_eq!(report.chart.shape(), &[3, 480, 640]);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_read_error_releases_once() {
    let (mut source, releases) = MockSource::new(5);
    source.fail_read_at = Some(2);
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let result = controller.run(CaptureHandle::open(source), &mut preview);

    assert!(matches!(result, Err(PreviewError::Video(VideoError::Stream(_)))));
    assert_eq!(projector.seen.borrow().len(), 2);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_projection_error_releases_once() {
    let (source, releases) = MockSource::new(5);
    let projector = StubProjector {
        fail_at: Some(1),
        ..StubProjector::default()
    };
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let result = controller.run(CaptureHandle::open(source), &mut preview);

    assert!(matches!(result, Err(PreviewError::Equi(EquiError::Input(_)))));
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_bad_frame_shape_is_rejected_before_projection() {
    let (mut source, releases) = MockSource::new(3);
    source.bad_shape = true;
    let projector = StubProjector::default();
    let controller = InteractiveController::new(&projector, ControllerConfig::default());
    let mut preview = ScriptedPreview::default();

    let result = controller.run(CaptureHandle::open(source), &mut preview);

    assert!(matches!(
        result,
        Err(PreviewError::Image(ImageError::Precondition(_)))
    ));
    assert!(projector.seen.borrow().is_empty());
    assert_eq!(releases.get(), 1);
}
