//! crates/lesson_core/src/feedback.rs
//!
//! Sound/animation feedback as an explicit capability.
//!
//! State machines report what happened; whoever embeds the session decides
//! how to play it. `notify` is fire-and-forget and must never block a
//! transition.

/// The feedback cues a playback shell can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// A selection or navigation tap.
    Click,
    Correct,
    Incorrect,
    /// A multi-part component finished its last sub-item.
    Complete,
}

pub trait FeedbackSink: Send + Sync {
    fn notify(&self, kind: FeedbackKind);
}

/// The default sink: swallows every cue. Used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFeedback;

impl FeedbackSink for NoopFeedback {
    fn notify(&self, _kind: FeedbackKind) {}
}
