use crate::classification::domain::attention_state::{AttentionSnapshot, AttentionState};
use crate::classification::domain::focus_band::FocusBand;
use crate::classification::domain::state_debouncer::StateDebouncer;
use crate::detection::domain::landmark_set::LandmarkSet;

/// Converts per-frame landmark evidence into the focused / distracted /
/// no-subject verdict.
///
/// `update` never fails: absence of a face is a valid input, and a
/// malformed landmark set (reference index missing or denormalized) is
/// treated the same way, degrading to `NoSubject` rather than faulting the
/// pipeline. The only cross-call state is the debouncer's streak and the
/// last snapshot; with the default window of 1 the classifier is a pure
/// function of its input and configuration.
pub struct AttentionClassifier {
    band: FocusBand,
    debouncer: StateDebouncer,
    last: AttentionSnapshot,
}

impl AttentionClassifier {
    pub fn new(band: FocusBand, debounce_window: usize) -> Result<Self, &'static str> {
        Ok(Self {
            band,
            debouncer: StateDebouncer::new(debounce_window)?,
            last: AttentionSnapshot::default(),
        })
    }

    /// Classifies one frame's evidence and returns the resulting snapshot.
    ///
    /// The snapshot's state is the debounced verdict; its reference point
    /// is always the point observed this frame, so the overlay marker
    /// tracks the subject even while a flip is still pending.
    pub fn update(&mut self, landmarks: Option<&LandmarkSet>) -> AttentionSnapshot {
        let reference = landmarks.and_then(LandmarkSet::reference_point);

        let raw = match reference {
            None => AttentionState::NoSubject,
            Some(point) if self.band.contains(point) => AttentionState::Focused,
            Some(_) => AttentionState::Distracted,
        };

        let committed = self.debouncer.observe(raw);
        self.last = AttentionSnapshot::new(committed, reference);
        self.last
    }

    /// The most recently computed snapshot.
    pub fn snapshot(&self) -> AttentionSnapshot {
        self.last
    }
}

impl Default for AttentionClassifier {
    fn default() -> Self {
        Self {
            band: FocusBand::default(),
            // Window 1 cannot fail validation.
            debouncer: StateDebouncer::new(1).expect("window 1 is valid"),
            last: AttentionSnapshot::default(),
        }
    }
}
