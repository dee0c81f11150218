use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::shared::frame::Frame;

/// Draws visual feedback for a classification result onto a frame before
/// it is handed to the delivery boundary.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        snapshot: &AttentionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
