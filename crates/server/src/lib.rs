//! HTTP delivery surface for the attention tracker: an MJPEG stream of
//! annotated frames plus a JSON focus-status endpoint.

pub mod broadcast_sink;
pub mod handlers;
pub mod routes;
pub mod state;

pub use broadcast_sink::BroadcastSink;
pub use routes::create_router;
pub use state::AppState;
