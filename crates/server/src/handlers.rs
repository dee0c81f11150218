use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use futures_util::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast;

use focustrack_core::shared::constants::STREAM_BOUNDARY;

use crate::state::AppState;

/// Focus status payload.
#[derive(Serialize)]
pub struct StatusResponse {
    pub is_focused: bool,
    pub session_time: u64,
}

/// Current focus verdict, served from the snapshot cell without touching
/// the pipeline. Session timing is not tracked; clients get a constant
/// zero.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        is_focused: state.snapshots.latest().is_focused,
        session_time: 0,
    })
}

/// Live annotated video as a multipart/x-mixed-replace MJPEG stream.
pub async fn video_feed(State(state): State<AppState>) -> Response {
    let rx = state.frames.subscribe();
    (
        [(
            header::CONTENT_TYPE,
            format!("multipart/x-mixed-replace; boundary={STREAM_BOUNDARY}"),
        )],
        Body::from_stream(part_stream(rx)),
    )
        .into_response()
}

/// Adapts a broadcast subscription into a byte stream. A receiver that
/// lagged behind jumps to the newest frame; the stream ends when the
/// pipeline drops its sender.
pub fn part_stream(
    rx: broadcast::Receiver<Bytes>,
) -> impl Stream<Item = Result<Bytes, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(part) => return Some((Ok(part), rx)),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}
