//! Legality hints for a square while a piece is being dragged.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropFeedback {
    /// The piece is over this square and may be dropped here.
    Accept,
    /// The piece may be dropped here but is elsewhere.
    Candidate,
    /// The piece is over this square and may not be dropped here.
    Reject,
}

/// Classify a square given whether the dragged piece hovers over it and whether
/// the engine allows the drop.
pub fn drop_feedback(is_over: bool, can_drop: bool) -> Option<DropFeedback> {
    match (is_over, can_drop) {
        (true, true) => Some(DropFeedback::Accept),
        (false, true) => Some(DropFeedback::Candidate),
        (true, false) => Some(DropFeedback::Reject),
        (false, false) => None,
    }
}
