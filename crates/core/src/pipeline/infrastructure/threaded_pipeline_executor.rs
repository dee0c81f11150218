use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::capture::domain::camera_source::{CameraSource, CaptureError};
use crate::classification::domain::attention_classifier::AttentionClassifier;
use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::delivery::domain::frame_sink::FrameSink;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::detection::domain::landmark_source::LandmarkSource;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineError, PipelineExecutor};
use crate::pipeline::snapshot_cell::SnapshotCell;
use crate::shared::frame::Frame;

/// Executes the attention pipeline with dedicated threads for capture,
/// landmark detection, and delivery around a sequential classify/annotate
/// main loop.
///
/// Layout: `capture → detect → main [classify/annotate/publish] → sink`
///
/// Every channel holds at most one frame, so a slow consumer throttles the
/// producers instead of growing a backlog: the camera does not begin the
/// next acquisition until the previous frame has moved on. Classification
/// stays strictly sequential in frame order; the threads only overlap
/// *different* frames' stages.
pub struct ThreadedPipelineExecutor;

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        mut camera: Box<dyn CameraSource>,
        landmarks: Box<dyn LandmarkSource>,
        mut classifier: AttentionClassifier,
        annotator: Box<dyn FrameAnnotator>,
        sink: Box<dyn FrameSink>,
        snapshots: SnapshotCell,
        mut config: PipelineConfig,
    ) -> Result<usize, PipelineError> {
        let format = match camera.open() {
            Ok(format) => format,
            Err(e) => {
                camera.close();
                return Err(e.into());
            }
        };
        config.logger.info(&format!(
            "Capture opened: {}x{} @ {:.1} fps",
            format.width, format.height, format.fps
        ));

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Result<Frame, CaptureError>>(1);
        let (detected_tx, detected_rx) =
            crossbeam_channel::bounded::<Result<(Frame, Option<LandmarkSet>), CaptureError>>(1);
        let (deliver_tx, deliver_rx) =
            crossbeam_channel::bounded::<(Frame, AttentionSnapshot)>(1);

        let capture_handle = spawn_capture(camera, frame_tx, config.cancelled.clone());
        let detect_handle = spawn_detect(landmarks, frame_rx, detected_tx, config.cancelled.clone());
        let sink_handle = spawn_sink(sink, deliver_rx);

        let main_error = run_main_loop(
            detected_rx,
            &deliver_tx,
            &mut classifier,
            &*annotator,
            &snapshots,
            &mut config,
        );

        drop(deliver_tx);

        let result = join_threads(capture_handle, detect_handle, sink_handle, main_error);
        if result.is_ok() {
            config.logger.summary();
        }
        result
    }
}

fn spawn_capture(
    mut camera: Box<dyn CameraSource>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, CaptureError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in camera.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let failed = frame_result.is_err();
            if frame_tx.send(frame_result).is_err() || failed {
                break;
            }
        }
        camera.close();
    })
}

fn spawn_detect(
    mut landmarks: Box<dyn LandmarkSource>,
    frame_rx: crossbeam_channel::Receiver<Result<Frame, CaptureError>>,
    detected_tx: crossbeam_channel::Sender<Result<(Frame, Option<LandmarkSet>), CaptureError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in frame_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }

            let result = match frame_result {
                Ok(frame) => {
                    // A detector hiccup is frame-local: degrade to "no
                    // landmarks" instead of killing the stream.
                    let detected = match landmarks.detect(&frame) {
                        Ok(detected) => detected,
                        Err(e) => {
                            log::warn!(
                                "landmark detection failed on frame {}: {e}",
                                frame.index()
                            );
                            None
                        }
                    };
                    Ok((frame, detected))
                }
                Err(e) => Err(e),
            };

            let failed = result.is_err();
            if detected_tx.send(result).is_err() || failed {
                break;
            }
        }
    })
}

fn spawn_sink(
    mut sink: Box<dyn FrameSink>,
    deliver_rx: crossbeam_channel::Receiver<(Frame, AttentionSnapshot)>,
) -> std::thread::JoinHandle<Result<usize, String>> {
    std::thread::spawn(move || {
        let mut delivered = 0usize;
        let mut error: Option<String> = None;
        for (frame, snapshot) in deliver_rx {
            if let Err(e) = sink.write(&frame, &snapshot) {
                error = Some(e.to_string());
                break;
            }
            delivered += 1;
        }
        if let Err(e) = sink.close() {
            error.get_or_insert(e.to_string());
        }
        match error {
            Some(e) => Err(e),
            None => Ok(delivered),
        }
    })
}

/// Runs the sequential heart of the pipeline: receive detected frames in
/// order, classify, annotate, publish the snapshot, and hand off for
/// delivery.
fn run_main_loop(
    detected_rx: crossbeam_channel::Receiver<Result<(Frame, Option<LandmarkSet>), CaptureError>>,
    deliver_tx: &crossbeam_channel::Sender<(Frame, AttentionSnapshot)>,
    classifier: &mut AttentionClassifier,
    annotator: &dyn FrameAnnotator,
    snapshots: &SnapshotCell,
    config: &mut PipelineConfig,
) -> Option<PipelineError> {
    let mut processed = 0usize;

    for detected_result in detected_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            break;
        }

        let (mut frame, detected) = match detected_result {
            Ok(pair) => pair,
            Err(e) => return Some(e.into()),
        };

        let started = Instant::now();
        let snapshot = classifier.update(detected.as_ref());
        config
            .logger
            .timing("classify", started.elapsed().as_secs_f64() * 1000.0);

        if let Err(e) = annotator.annotate(&mut frame, &snapshot) {
            return Some(PipelineError::Annotation(e.to_string()));
        }

        snapshots.publish(snapshot);
        processed += 1;
        config.logger.progress(processed);

        if let Some(ref callback) = config.on_frame {
            if !callback(processed, &snapshot) {
                config.cancelled.store(true, Ordering::Relaxed);
                break;
            }
        }

        if deliver_tx.send((frame, snapshot)).is_err() {
            // Sink thread stopped; its error is picked up at join.
            break;
        }
    }

    None
}

/// Joins all pipeline threads and coalesces the first error encountered.
fn join_threads(
    capture_handle: std::thread::JoinHandle<()>,
    detect_handle: std::thread::JoinHandle<()>,
    sink_handle: std::thread::JoinHandle<Result<usize, String>>,
    mut first_error: Option<PipelineError>,
) -> Result<usize, PipelineError> {
    fn set_if_none(slot: &mut Option<PipelineError>, err: PipelineError) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    if capture_handle.join().is_err() {
        set_if_none(&mut first_error, PipelineError::ThreadPanicked("capture"));
    }
    if detect_handle.join().is_err() {
        set_if_none(&mut first_error, PipelineError::ThreadPanicked("detect"));
    }

    let delivered = match sink_handle.join() {
        Ok(Ok(count)) => count,
        Ok(Err(e)) => {
            set_if_none(&mut first_error, PipelineError::Delivery(e));
            0
        }
        Err(_) => {
            set_if_none(&mut first_error, PipelineError::ThreadPanicked("delivery"));
            0
        }
    };

    match first_error {
        Some(e) => Err(e),
        None => Ok(delivered),
    }
}
