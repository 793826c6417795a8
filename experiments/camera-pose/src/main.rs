mod frames;
mod overlay;

use frames::TestCard;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use overlay::{compose, SharedOverlay};
use skel_base::{init_stdout_logger, log_fatal};
use skel_infer::backends::OnnxBackend;
use skel_infer::{
    COCO_SCHEMA, DetectionSource, Device, ModelSource, MoveNetConfig, MoveNetSource,
    SourceKind, SyntheticConfig, SyntheticSource,
};
use skel_overlay::{DetectionSession, FpsMeter, OverlayConfig};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn load_config() -> OverlayConfig {
    match env::var("SKEL_CONFIG") {
        Ok(path) => match OverlayConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => log_fatal!("Failed to load {}: {}", path, e),
        },
        Err(_) => OverlayConfig::default(),
    }
}

fn build_source(config: &OverlayConfig, card: &TestCard) -> Box<dyn DetectionSource> {
    match config.source() {
        SourceKind::Model => {
            let model_path: PathBuf = env::var("SKEL_MODEL_PATH")
                .unwrap_or_else(|_| "models/movenet-lightning.onnx".to_string())
                .into();
            log::info!("Model: {}", model_path.display());
            let backend = OnnxBackend::new(Device::Cpu);
            match MoveNetSource::new(
                ModelSource::File(model_path),
                &backend,
                card.clone(),
                MoveNetConfig::default(),
            ) {
                Ok(source) => Box::new(source),
                Err(e) => log_fatal!("Failed to load pose model: {}", e),
            }
        }
        SourceKind::Synthetic => Box::new(SyntheticSource::new(SyntheticConfig::default())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let mut config = load_config();
    if env::var_os("SKEL_MODEL_PATH").is_some() {
        config = config.with_source(SourceKind::Model);
    }
    let width = config.width() as usize;
    let height = config.height() as usize;

    log::info!("Skeleton overlay experiment");
    log::info!("Resolution: {}x{}", width, height);
    log::info!("Controls: ESC to exit, S to toggle the skeleton, R to restart detection");

    let card = TestCard::new(width, height)?;
    let source = build_source(&config, &card);
    let kind = source.kind();

    let overlay = SharedOverlay::default();
    let mut session =
        DetectionSession::start(source, Box::new(overlay.clone()), &COCO_SCHEMA, config)?;

    let mut window = Window::new(
        "Skeleton Overlay - ESC to exit",
        width,
        height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    let mut fps = FpsMeter::new();
    let mut last_seq = 0;
    let mut showing = true;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // hiding the skeleton tears the loop down, showing it starts cold
        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            showing = !showing;
            if showing {
                session.restart()?;
            } else {
                session.stop();
            }
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) && showing {
            session.restart()?;
            fps.reset();
        }

        let (seq, output) = overlay.latest();
        if seq != last_seq {
            last_seq = seq;
            if let Some(rate) = fps.tick(Instant::now()) {
                window.set_title(&format!("Skeleton Overlay - {kind} - {rate:.1} fps"));
            }
        }

        let shown = if showing { output.as_ref() } else { None };
        let frame = compose(card.rgb(), width, height, shown)?;
        window.update_with_buffer(&frame.to_argb(), width, height)?;
    }

    session.stop();
    let stats = session.stats();
    log::info!(
        "Exiting: {} ticks committed, {} skipped, {} empty, {} discarded",
        stats.committed,
        stats.skipped,
        stats.empty,
        stats.discarded
    );
    Ok(())
}
