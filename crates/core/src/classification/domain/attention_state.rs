use crate::shared::point::Point;

/// The classifier's per-frame verdict. Exactly one value at any time;
/// transitions happen only in response to new frame evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttentionState {
    Focused,
    Distracted,
    NoSubject,
}

impl AttentionState {
    /// Human-readable label rendered onto the video overlay.
    pub fn label(&self) -> &'static str {
        match self {
            AttentionState::Focused => "Focused",
            AttentionState::Distracted => "Distracted",
            AttentionState::NoSubject => "No Subject",
        }
    }
}

/// The externally observable classification result, published once per
/// processed frame and read concurrently by status reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttentionSnapshot {
    pub state: AttentionState,
    pub is_focused: bool,
    /// The landmark the verdict was based on, for annotation. `None` when
    /// no subject was seen.
    pub reference_point: Option<Point>,
}

impl AttentionSnapshot {
    pub fn new(state: AttentionState, reference_point: Option<Point>) -> Self {
        Self {
            state,
            is_focused: state == AttentionState::Focused,
            reference_point,
        }
    }
}

impl Default for AttentionSnapshot {
    /// Snapshot before the first frame has been processed.
    fn default() -> Self {
        Self::new(AttentionState::NoSubject, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(AttentionState::Focused.label(), "Focused");
        assert_eq!(AttentionState::Distracted.label(), "Distracted");
        assert_eq!(AttentionState::NoSubject.label(), "No Subject");
    }

    #[test]
    fn test_is_focused_follows_state() {
        assert!(AttentionSnapshot::new(AttentionState::Focused, None).is_focused);
        assert!(!AttentionSnapshot::new(AttentionState::Distracted, None).is_focused);
        assert!(!AttentionSnapshot::new(AttentionState::NoSubject, None).is_focused);
    }

    #[test]
    fn test_default_is_no_subject() {
        let snapshot = AttentionSnapshot::default();
        assert_eq!(snapshot.state, AttentionState::NoSubject);
        assert!(!snapshot.is_focused);
        assert!(snapshot.reference_point.is_none());
    }
}
