use crate::classification::domain::attention_state::AttentionState;

/// Temporal hysteresis for the focused/distracted verdict.
///
/// A raw single-point threshold test flips every frame when the reference
/// point sits on a band edge and jitters with detector noise. The debouncer
/// commits a `Focused`/`Distracted` candidate only after it has been
/// observed for `window` consecutive frames. `NoSubject` commits
/// immediately and clears the streak: absence of a face is hard evidence,
/// not jitter.
///
/// `window = 1` disables hysteresis; the committed state follows the raw
/// verdict frame by frame.
pub struct StateDebouncer {
    window: usize,
    committed: AttentionState,
    candidate: AttentionState,
    streak: usize,
}

impl StateDebouncer {
    pub fn new(window: usize) -> Result<Self, &'static str> {
        if window < 1 {
            return Err("debounce window must be >= 1");
        }
        Ok(Self {
            window,
            committed: AttentionState::NoSubject,
            candidate: AttentionState::NoSubject,
            streak: 0,
        })
    }

    /// Feeds one frame's raw verdict and returns the committed state.
    pub fn observe(&mut self, raw: AttentionState) -> AttentionState {
        if raw == AttentionState::NoSubject {
            self.committed = raw;
            self.candidate = raw;
            self.streak = 0;
            return self.committed;
        }

        if raw == self.committed {
            self.candidate = raw;
            self.streak = 0;
            return self.committed;
        }

        if raw == self.candidate {
            self.streak += 1;
        } else {
            self.candidate = raw;
            self.streak = 1;
        }

        if self.streak >= self.window {
            self.committed = raw;
            self.streak = 0;
        }
        self.committed
    }
}
