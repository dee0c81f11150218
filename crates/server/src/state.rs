use axum::body::Bytes;
use tokio::sync::broadcast;

use focustrack_core::pipeline::snapshot_cell::SnapshotCell;

/// Shared application state.
///
/// `snapshots` is the cell the pipeline publishes into once per frame;
/// `frames` carries encoded MJPEG parts from the pipeline's sink to any
/// number of stream subscribers. The channel holds a single slot, so a
/// client that falls behind skips to the most recent frame instead of
/// accumulating a backlog.
#[derive(Clone)]
pub struct AppState {
    pub snapshots: SnapshotCell,
    pub frames: broadcast::Sender<Bytes>,
}

impl AppState {
    pub fn new(snapshots: SnapshotCell) -> Self {
        let (frames, _) = broadcast::channel(1);
        Self { snapshots, frames }
    }
}
