use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use focustrack_core::annotation::infrastructure::overlay_annotator::OverlayAnnotator;
use focustrack_core::capture::domain::camera_source::CameraSource;
use focustrack_core::capture::infrastructure::image_sequence_camera::ImageSequenceCamera;
use focustrack_core::capture::infrastructure::synthetic_camera::SyntheticCamera;
use focustrack_core::classification::domain::attention_classifier::AttentionClassifier;
use focustrack_core::classification::domain::focus_band::FocusBand;
use focustrack_core::delivery::domain::frame_sink::FrameSink;
use focustrack_core::detection::domain::landmark_source::LandmarkSource;
use focustrack_core::detection::infrastructure::centroid_landmark_source::CentroidLandmarkSource;
use focustrack_core::detection::infrastructure::skip_frame_source::SkipFrameSource;
use focustrack_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use focustrack_core::pipeline::pipeline_logger::LogPipelineLogger;
use focustrack_core::pipeline::snapshot_cell::SnapshotCell;
use focustrack_core::pipeline::track_attention_use_case::TrackAttentionUseCase;

use focustrack_server::{create_router, AppState, BroadcastSink};

/// Attention tracking over a frame stream, served as annotated MJPEG video
/// with a JSON focus-status endpoint.
#[derive(Parser)]
#[command(name = "focustrack")]
struct Cli {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port.
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Play frames from this image directory instead of the synthetic
    /// pattern source.
    #[arg(long)]
    images: Option<PathBuf>,

    /// Synthetic source frame count (0 = run until shutdown).
    #[arg(long, default_value = "0")]
    frames: usize,

    /// Synthetic source frame width.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Synthetic source frame height.
    #[arg(long, default_value = "480")]
    height: u32,

    /// Capture frame rate.
    #[arg(long, default_value = "15")]
    fps: f64,

    /// Run landmark detection every Nth frame (1 = every frame).
    #[arg(long, default_value = "1")]
    skip_frames: usize,

    /// JPEG quality for the stream (1-100).
    #[arg(long, default_value = "80")]
    jpeg_quality: u8,

    /// Focus band lower bound on the x axis (inclusive).
    #[arg(long, default_value = "0.35")]
    band_x_low: f64,

    /// Focus band upper bound on the x axis (exclusive).
    #[arg(long, default_value = "0.65")]
    band_x_high: f64,

    /// Focus band lower bound on the y axis (inclusive).
    #[arg(long, default_value = "0.35")]
    band_y_low: f64,

    /// Focus band upper bound on the y axis (exclusive).
    #[arg(long, default_value = "0.65")]
    band_y_high: f64,

    /// Consecutive frames of contrary evidence required before the focus
    /// verdict flips (1 = react every frame).
    #[arg(long, default_value = "1")]
    debounce: usize,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let snapshots = SnapshotCell::new();
    let state = AppState::new(snapshots.clone());
    let cancelled = Arc::new(AtomicBool::new(false));

    let band = FocusBand::new(
        cli.band_x_low,
        cli.band_x_high,
        cli.band_y_low,
        cli.band_y_high,
    )?;
    let classifier = AttentionClassifier::new(band, cli.debounce)?;
    let camera = build_camera(&cli);
    let landmarks = build_landmark_source(&cli)?;
    let sink: Box<dyn FrameSink> =
        Box::new(BroadcastSink::new(state.frames.clone(), cli.jpeg_quality));

    let mut use_case = TrackAttentionUseCase::new(
        camera,
        landmarks,
        classifier,
        Box::new(OverlayAnnotator::new()),
        sink,
        Box::new(ThreadedPipelineExecutor::new()),
        Some(Box::new(LogPipelineLogger::default())),
        None,
        Some(cancelled.clone()),
    );

    let pipeline = std::thread::spawn(move || match use_case.execute(&snapshots) {
        Ok(delivered) => log::info!("Pipeline finished after {delivered} frames"),
        Err(e) => log::error!("Pipeline stopped: {e}"),
    });

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal(cancelled.clone()))
        .await?;

    // The signal handler already raised the flag; raise it again in case
    // serve returned for another reason, then let the pipeline drain.
    cancelled.store(true, Ordering::Relaxed);
    if pipeline.join().is_err() {
        return Err("pipeline thread panicked".into());
    }

    log::info!("Shutdown complete");
    Ok(())
}

fn build_camera(cli: &Cli) -> Box<dyn CameraSource> {
    match &cli.images {
        Some(dir) => Box::new(ImageSequenceCamera::new(dir, cli.fps)),
        None => Box::new(SyntheticCamera::new(
            cli.width, cli.height, cli.fps, cli.frames,
        )),
    }
}

fn build_landmark_source(cli: &Cli) -> Result<Box<dyn LandmarkSource>, Box<dyn std::error::Error>> {
    let base: Box<dyn LandmarkSource> = Box::new(CentroidLandmarkSource::default());
    if cli.skip_frames > 1 {
        Ok(Box::new(SkipFrameSource::new(base, cli.skip_frames)?))
    } else {
        Ok(base)
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.fps <= 0.0 {
        return Err(format!("Frame rate must be positive, got {}", cli.fps).into());
    }
    if cli.width == 0 || cli.height == 0 {
        return Err("Frame dimensions must be non-zero".into());
    }
    if cli.skip_frames == 0 {
        return Err("Skip interval must be at least 1".into());
    }
    if cli.jpeg_quality == 0 || cli.jpeg_quality > 100 {
        return Err(format!(
            "JPEG quality must be between 1 and 100, got {}",
            cli.jpeg_quality
        )
        .into());
    }
    if cli.debounce == 0 {
        return Err("Debounce window must be at least 1".into());
    }
    if let Some(dir) = &cli.images {
        if !dir.is_dir() {
            return Err(format!("Image directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

async fn shutdown_signal(cancelled: Arc<AtomicBool>) {
    if tokio::signal::ctrl_c().await.is_err() {
        log::error!("Failed to install shutdown handler");
    }
    log::info!("Shutdown requested");
    cancelled.store(true, Ordering::Relaxed);
}
