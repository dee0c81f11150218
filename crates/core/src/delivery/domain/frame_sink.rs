use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::shared::frame::Frame;

/// Delivery boundary for annotated frames.
///
/// The pipeline hands over one frame at a time and does not start the next
/// acquisition until `write` returns, so a slow sink throttles the whole
/// pipeline instead of growing a backlog. A `write` error is stream-level
/// and terminates the run.
pub trait FrameSink: Send {
    fn write(
        &mut self,
        frame: &Frame,
        snapshot: &AttentionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes and releases the output. Called once, on every exit path.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
