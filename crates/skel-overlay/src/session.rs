use crate::pipeline::{OverlayPipeline, TickOutput};
use crate::{OverlayConfig, OverlayError};
use skel_base::Vec2;
use skel_infer::{DetectionSource, KeypointSchema, RawKeypoints, SourceKind};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Receives each committed tick. Implemented by the rendering collaborator.
pub trait OverlaySink: Send {
    fn present(&mut self, output: &TickOutput);
}

impl<S: OverlaySink + ?Sized> OverlaySink for Box<S> {
    fn present(&mut self, output: &TickOutput) {
        (**self).present(output)
    }
}

/// Counters accumulated over the lifetime of a session, across restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks whose result reached the sink
    pub committed: u64,
    /// Ticks dropped because the previous detection was still running
    pub skipped: u64,
    /// Committed ticks that carried no joints
    pub empty: u64,
    /// Detections that finished after the session was stopped
    pub discarded: u64,
}

#[derive(Debug, Default)]
struct Counters {
    committed: AtomicU64,
    skipped: AtomicU64,
    empty: AtomicU64,
    discarded: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> SessionStats {
        SessionStats {
            committed: self.committed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

type SharedSource = Arc<Mutex<Box<dyn DetectionSource>>>;
type SharedSink = Arc<Mutex<Box<dyn OverlaySink>>>;

/// The single detection loop of a camera session.
///
/// A fixed-interval ticker drives `produce_frame -> map -> smooth -> render`.
/// Detection runs on the blocking pool and at most one call is in flight;
/// ticks that land while it runs are skipped. Stopping cancels the ticker,
/// and a detection still running at that point never reaches the sink.
///
/// Must be started from within a tokio runtime.
pub struct DetectionSession {
    schema: &'static KeypointSchema,
    config: OverlayConfig,
    source: SharedSource,
    sink: SharedSink,
    kind: SourceKind,
    counters: Arc<Counters>,
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl DetectionSession {
    /// Validate `config` and start ticking immediately. The source is told
    /// the tick interval so simulated time keeps pace with the ticker.
    pub fn start(
        mut source: Box<dyn DetectionSource>,
        sink: Box<dyn OverlaySink>,
        schema: &'static KeypointSchema,
        config: OverlayConfig,
    ) -> Result<Self, OverlayError> {
        config.validate()?;
        let kind = source.kind();
        if kind != config.source() {
            log::warn!("config selects {} source but {kind} was supplied", config.source());
        }
        source.set_tick_interval(config.tick_interval());

        let mut session = Self {
            schema,
            config,
            source: Arc::new(Mutex::new(source)),
            sink: Arc::new(Mutex::new(sink)),
            kind,
            counters: Arc::new(Counters::default()),
            active: Arc::new(AtomicBool::new(false)),
            task: None,
        };
        session.spawn()?;
        Ok(session)
    }

    /// Cancel the ticker. Idempotent.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("detection stopped ({} source)", self.kind);
        }
    }

    /// Stop, drop the smoothing state and start again with the same source.
    pub fn restart(&mut self) -> Result<(), OverlayError> {
        self.stop();
        log::info!("restarting detection");
        self.spawn()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn source_kind(&self) -> SourceKind {
        self.kind
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.counters.snapshot()
    }

    fn spawn(&mut self) -> Result<(), OverlayError> {
        // every run gets its own flag so a late result from an earlier run
        // still sees it cleared
        let active = Arc::new(AtomicBool::new(true));
        let pipeline = OverlayPipeline::new(self.schema, &self.config)?;

        let task = tokio::spawn(run_loop(
            pipeline,
            self.config.tick_interval(),
            Arc::clone(&self.source),
            Arc::clone(&self.sink),
            Arc::clone(&self.counters),
            Arc::clone(&active),
        ));

        self.active = active;
        self.task = Some(task);
        log::info!(
            "detection started ({} source, tick {:?})",
            self.kind,
            self.config.tick_interval()
        );
        Ok(())
    }
}

impl Drop for DetectionSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    mut pipeline: OverlayPipeline,
    tick: std::time::Duration,
    source: SharedSource,
    sink: SharedSink,
    counters: Arc<Counters>,
    active: Arc<AtomicBool>,
) {
    let mut ticker = time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let (tx, mut rx) = mpsc::channel::<(RawKeypoints, Vec2<f32>)>(1);
    let mut in_flight = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if in_flight {
                    counters.skipped.fetch_add(1, Ordering::Relaxed);
                    log::debug!("detection still in flight, skipping tick");
                    continue;
                }
                in_flight = true;

                let source = Arc::clone(&source);
                let counters = Arc::clone(&counters);
                let active = Arc::clone(&active);
                let tx = tx.clone();
                tokio::task::spawn_blocking(move || {
                    let detected = match source.lock() {
                        Ok(mut source) => (source.produce_frame(), source.input_size()),
                        Err(_) => {
                            log::error!("detection source poisoned by an earlier panic");
                            (RawKeypoints::empty(), Vec2::new(1.0, 1.0))
                        }
                    };
                    if !active.load(Ordering::SeqCst) {
                        counters.discarded.fetch_add(1, Ordering::Relaxed);
                        log::debug!("discarding detection finished after stop");
                        return;
                    }
                    // the loop may have been cancelled since the check above
                    let _ = tx.blocking_send(detected);
                });
            }
            Some((raw, input_size)) = rx.recv() => {
                in_flight = false;
                if !active.load(Ordering::SeqCst) {
                    counters.discarded.fetch_add(1, Ordering::Relaxed);
                    log::debug!("discarding detection finished after stop");
                    continue;
                }
                commit(&mut pipeline, &raw, input_size, &sink, &counters);
            }
        }
    }
}

fn commit(
    pipeline: &mut OverlayPipeline,
    raw: &RawKeypoints,
    input_size: Vec2<f32>,
    sink: &SharedSink,
    counters: &Counters,
) {
    let output = match pipeline.process(raw, input_size) {
        Ok(output) => output,
        Err(e) => {
            log::warn!("presenting empty tick: {e}");
            let canvas = pipeline.canvas();
            TickOutput::empty(canvas.x, canvas.y)
        }
    };

    if output.frame.is_empty() {
        counters.empty.fetch_add(1, Ordering::Relaxed);
    }
    match sink.lock() {
        Ok(mut sink) => sink.present(&output),
        Err(_) => log::error!("overlay sink poisoned by an earlier panic"),
    }
    counters.committed.fetch_add(1, Ordering::Relaxed);
}
