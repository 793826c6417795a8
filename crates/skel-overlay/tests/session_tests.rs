use skel_base::Vec2;
use skel_infer::{
    COCO_KEYPOINT_COUNT, COCO_SCHEMA, CoordinateSpace, DetectionSource, RawKeypoint,
    RawKeypoints, SourceKind, SyntheticConfig, SyntheticSource,
};
use skel_overlay::{DetectionSession, OverlayConfig, OverlaySink, Surface, TickOutput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Clone, Default)]
struct Recorder {
    outputs: Arc<Mutex<Vec<TickOutput>>>,
}

impl Recorder {
    fn len(&self) -> usize {
        self.outputs.lock().unwrap().len()
    }

    fn take(&self) -> Vec<TickOutput> {
        std::mem::take(&mut *self.outputs.lock().unwrap())
    }
}

impl OverlaySink for Recorder {
    fn present(&mut self, output: &TickOutput) {
        self.outputs.lock().unwrap().push(output.clone());
    }
}

/// Every joint at one shared normalized position, optionally slow
struct FixedSource {
    position: Arc<Mutex<(f32, f32)>>,
    delay: Duration,
    running: Arc<AtomicUsize>,
    max_running: Arc<AtomicUsize>,
}

impl FixedSource {
    fn new(delay: Duration) -> Self {
        Self {
            position: Arc::new(Mutex::new((0.5, 0.5))),
            delay,
            running: Arc::new(AtomicUsize::new(0)),
            max_running: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl DetectionSource for FixedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Model
    }

    fn input_size(&self) -> Vec2<f32> {
        Vec2::new(1.0, 1.0)
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.running.fetch_sub(1, Ordering::SeqCst);

        let (x, y) = *self.position.lock().unwrap();
        RawKeypoints::new(
            vec![RawKeypoint { x, y, confidence: 0.9 }; COCO_KEYPOINT_COUNT],
            CoordinateSpace::Normalized,
        )
    }
}

/// Simulates a model whose inference fails every tick
struct FailingSource;

impl DetectionSource for FailingSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Model
    }

    fn input_size(&self) -> Vec2<f32> {
        Vec2::new(192.0, 192.0)
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        RawKeypoints::empty()
    }
}

/// Emits frames with fewer joints than the schema expects
struct TruncatedSource;

impl DetectionSource for TruncatedSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Model
    }

    fn input_size(&self) -> Vec2<f32> {
        Vec2::new(1.0, 1.0)
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        RawKeypoints::new(
            vec![RawKeypoint { x: 0.5, y: 0.5, confidence: 0.9 }; 5],
            CoordinateSpace::Normalized,
        )
    }
}

/// Remembers the tick interval the session hands it
#[derive(Default)]
struct IntervalSource {
    interval: Arc<Mutex<Option<Duration>>>,
}

impl DetectionSource for IntervalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Synthetic
    }

    fn input_size(&self) -> Vec2<f32> {
        Vec2::new(1.0, 1.0)
    }

    fn produce_frame(&mut self) -> RawKeypoints {
        RawKeypoints::empty()
    }

    fn set_tick_interval(&mut self, interval: Duration) {
        *self.interval.lock().unwrap() = Some(interval);
    }
}

fn fast_config() -> OverlayConfig {
    OverlayConfig::default()
        .with_canvas(100, 100)
        .with_tick_interval(Duration::from_millis(5))
}

async fn wait_for(recorder: &Recorder, count: usize) {
    for _ in 0..400 {
        if recorder.len() >= count {
            return;
        }
        sleep(Duration::from_millis(5)).await;
    }
    panic!("sink saw {} ticks, wanted {count}", recorder.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_synthetic_session_delivers_full_frames() {
    let recorder = Recorder::default();
    let source = SyntheticSource::new(SyntheticConfig::default().with_seed(3));
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    assert!(session.is_active());
    assert_eq!(session.source_kind(), SourceKind::Synthetic);
    wait_for(&recorder, 5).await;
    session.stop();
    assert!(!session.is_active());

    for output in recorder.take() {
        assert_eq!(output.frame.len(), COCO_KEYPOINT_COUNT);
        assert!(output.frame.iter().all(|j| j.confidence >= 0.8 && j.confidence <= 1.0));
        assert_eq!(output.summary.segments, COCO_SCHEMA.connections().len());
    }
    assert!(session.stats().committed >= 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_detection_never_overlaps() {
    let recorder = Recorder::default();
    let source = FixedSource::new(Duration::from_millis(40));
    let max_running = Arc::clone(&source.max_running);
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    wait_for(&recorder, 3).await;
    session.stop();

    assert_eq!(max_running.load(Ordering::SeqCst), 1);
    assert!(session.stats().skipped > 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_detection_in_flight_at_stop_is_discarded() {
    let recorder = Recorder::default();
    let source = FixedSource::new(Duration::from_millis(150));
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    sleep(Duration::from_millis(40)).await;
    session.stop();
    sleep(Duration::from_millis(250)).await;

    assert_eq!(recorder.len(), 0);
    let stats = session.stats();
    assert_eq!(stats.committed, 0);
    assert_eq!(stats.discarded, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failing_source_keeps_loop_running() {
    let recorder = Recorder::default();
    let mut session = DetectionSession::start(
        Box::new(FailingSource),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    wait_for(&recorder, 3).await;
    session.stop();

    assert!(recorder.take().iter().all(|o| o.frame.is_empty() && o.draw.is_empty()));
    let stats = session.stats();
    assert!(stats.empty >= 3);
    assert_eq!(stats.empty, stats.committed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_wrong_length_frames_present_empty_ticks() {
    let recorder = Recorder::default();
    let mut session = DetectionSession::start(
        Box::new(TruncatedSource),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    wait_for(&recorder, 3).await;
    session.stop();

    for output in recorder.take() {
        assert!(output.frame.is_empty());
        assert!(output.draw.is_empty());
        assert_eq!(output.draw.size(), Vec2::new(100.0, 100.0));
    }
    let stats = session.stats();
    assert!(stats.empty >= 3);
    assert_eq!(stats.empty, stats.committed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_restart_drops_smoothing_state() {
    let recorder = Recorder::default();
    let source = FixedSource::new(Duration::ZERO);
    let position = Arc::clone(&source.position);
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();

    wait_for(&recorder, 3).await;
    session.stop();
    sleep(Duration::from_millis(20)).await;

    *position.lock().unwrap() = (0.9, 0.1);
    recorder.take();
    session.restart().unwrap();
    assert!(session.is_active());
    wait_for(&recorder, 1).await;
    session.stop();

    let first = &recorder.take()[0];
    let p = first.frame.joints[0].position;
    assert!((p.x - 90.0).abs() < 1e-3, "expected cold start, got {p:?}");
    assert!((p.y - 10.0).abs() < 1e-3, "expected cold start, got {p:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_hidden_skeleton_still_ticks() {
    let recorder = Recorder::default();
    let source = SyntheticSource::new(SyntheticConfig::default().with_seed(1));
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(recorder.clone()),
        &COCO_SCHEMA,
        fast_config().with_show_skeleton(false),
    )
    .unwrap();

    wait_for(&recorder, 2).await;
    session.stop();

    for output in recorder.take() {
        assert_eq!(output.frame.len(), COCO_KEYPOINT_COUNT);
        assert!(output.draw.is_empty());
    }
}

#[tokio::test]
async fn test_session_tick_reaches_source() {
    let source = IntervalSource::default();
    let interval = Arc::clone(&source.interval);
    let mut session = DetectionSession::start(
        Box::new(source),
        Box::new(Recorder::default()),
        &COCO_SCHEMA,
        fast_config(),
    )
    .unwrap();
    session.stop();

    assert_eq!(*interval.lock().unwrap(), Some(Duration::from_millis(5)));
}

#[tokio::test]
async fn test_invalid_config_fails_to_start() {
    let result = DetectionSession::start(
        Box::new(FailingSource),
        Box::new(Recorder::default()),
        &COCO_SCHEMA,
        OverlayConfig::default().with_smoothing_alpha(0.0),
    );
    assert!(result.is_err());
}
