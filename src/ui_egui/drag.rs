// Drag-to-dismiss gesture
//
// Tracks a vertical pointer drag on the modal sheet. A downward drag past
// the threshold dismisses the modal; anything shorter snaps back on release.

/// Phase of the current pointer interaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    /// Pointer is down; `dy` is the cumulative vertical displacement
    Dragging { dy: f32 },
    /// Threshold crossed; remaining moves of this interaction are ignored
    Dismissed,
}

/// Result of feeding one pointer event into the gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    Ignored,
    Moved { dy: f32 },
    /// The modal should close now
    Dismiss,
    /// Pointer lifted below the threshold; the sheet should spring back from `dy`
    Released { dy: f32 },
}

#[derive(Clone, Debug)]
pub struct DragDismissGesture {
    phase: DragPhase,
    threshold: f32,
}

impl DragDismissGesture {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Current displacement while dragging, zero otherwise
    pub fn offset(&self) -> f32 {
        match self.phase {
            DragPhase::Dragging { dy } => dy,
            _ => 0.0,
        }
    }

    pub fn press(&mut self) {
        self.phase = DragPhase::Dragging { dy: 0.0 };
    }

    /// Set the cumulative displacement since the pointer went down
    pub fn move_to(&mut self, dy: f32) -> DragOutcome {
        match self.phase {
            DragPhase::Dragging { .. } => {
                if dy > self.threshold {
                    self.phase = DragPhase::Dismissed;
                    DragOutcome::Dismiss
                } else {
                    self.phase = DragPhase::Dragging { dy };
                    DragOutcome::Moved { dy }
                }
            }
            DragPhase::Idle | DragPhase::Dismissed => DragOutcome::Ignored,
        }
    }

    /// Add a per-frame delta to the cumulative displacement
    pub fn move_by(&mut self, delta: f32) -> DragOutcome {
        let dy = self.offset() + delta;
        self.move_to(dy)
    }

    pub fn release(&mut self) -> DragOutcome {
        let outcome = match self.phase {
            DragPhase::Dragging { dy } => DragOutcome::Released { dy },
            DragPhase::Idle | DragPhase::Dismissed => DragOutcome::Ignored,
        };
        self.phase = DragPhase::Idle;
        outcome
    }

    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
    }
}
