//! crates/lesson_core/src/state/mod.rs
//!
//! Per-component interactive state machines.
//!
//! Every gamified component runs the same abstract attempt cycle —
//! select/arrange while unanswered, a single Check that finalizes the
//! verdict, try-again from an incorrect verdict — parameterized by its own
//! domain data. Machines are plain values with one `dispatch` entry point;
//! they never touch the score or the store themselves but report what
//! happened through [`Outcome`], which the session applies. That keeps every
//! transition table testable in isolation.
//!
//! Scoring is guarded by an `awarded_points` high-water mark per machine: a
//! Check awards only the amount by which the attempt's earnings exceed what
//! was already awarded. Repeat checks are no-ops, reset-and-retry can only
//! add the missing difference, and nothing ever subtracts.

mod blanks;
mod cards;
mod code;
mod order;
mod pairs;
mod quiz;

pub use blanks::{BlanksAction, BlanksState};
pub use cards::{CardsAction, CardsState};
pub use code::{CodeAction, CodeState};
pub use order::{OrderAction, OrderState};
pub use pairs::{PairsAction, PairsState};
pub use quiz::{QuizAction, QuizState};

use crate::domain::{ComponentBody, ComponentKind};
use crate::feedback::FeedbackKind;
use crate::ports::CodeRunner;
use crate::rng::SessionRng;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The persisted interaction state of one session, keyed by component id.
/// Insertion-ordered so serialized snapshots are stable.
pub type ComponentsState = IndexMap<String, ComponentState>;

/// The interaction state of a single component, tagged with its type so a
/// persisted snapshot is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComponentState {
    Quiz(QuizState),
    MatchingPairs(PairsState),
    DragDrop(OrderState),
    FillInTheBlank(BlanksState),
    CodeEditor(CodeState),
    Flashcards(CardsState),
}

/// A user-input event routed to one component's machine.
#[derive(Debug, Clone)]
pub enum Action {
    Quiz(QuizAction),
    MatchingPairs(PairsAction),
    DragDrop(OrderAction),
    FillInTheBlank(BlanksAction),
    CodeEditor(CodeAction),
    Flashcards(CardsAction),
}

/// What a transition did, for the session to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Points newly awarded by this transition (already guarded, never
    /// awarded twice).
    pub awarded: u32,
    pub feedback: Option<FeedbackKind>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn feedback(kind: FeedbackKind) -> Self {
        Self {
            awarded: 0,
            feedback: Some(kind),
        }
    }

    pub fn awarded(points: u32, kind: FeedbackKind) -> Self {
        Self {
            awarded: points,
            feedback: Some(kind),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("component '{0}' has no interactive state")]
    UnknownComponent(String),
    #[error("action does not match component type '{0}'")]
    ActionMismatch(&'static str),
}

impl ComponentState {
    /// Fresh state for a component, shuffling presentation order where the
    /// component asks for it. Returns `None` for purely presentational kinds.
    pub fn init(body: &ComponentBody, rng: &mut SessionRng) -> Option<Self> {
        match body {
            ComponentBody::Quiz(props) => Some(ComponentState::Quiz(QuizState::new(props))),
            ComponentBody::MatchingPairs(props) => {
                Some(ComponentState::MatchingPairs(PairsState::new(props, rng)))
            }
            ComponentBody::DragDrop(props) => {
                Some(ComponentState::DragDrop(OrderState::new(props, rng)))
            }
            ComponentBody::FillInTheBlank(props) => {
                Some(ComponentState::FillInTheBlank(BlanksState::new(props)))
            }
            ComponentBody::CodeEditor(props) => {
                Some(ComponentState::CodeEditor(CodeState::new(props)))
            }
            ComponentBody::Flashcards(_) => Some(ComponentState::Flashcards(CardsState::new())),
            _ => None,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentState::Quiz(_) => ComponentKind::Quiz,
            ComponentState::MatchingPairs(_) => ComponentKind::MatchingPairs,
            ComponentState::DragDrop(_) => ComponentKind::DragDrop,
            ComponentState::FillInTheBlank(_) => ComponentKind::FillInTheBlank,
            ComponentState::CodeEditor(_) => ComponentKind::CodeEditor,
            ComponentState::Flashcards(_) => ComponentKind::Flashcards,
        }
    }

    /// Points this machine has awarded so far. Summing this over a snapshot
    /// re-derives the session score without re-running any Check.
    pub fn awarded_points(&self) -> u32 {
        match self {
            ComponentState::Quiz(s) => s.awarded_points,
            ComponentState::MatchingPairs(s) => s.awarded_points,
            ComponentState::DragDrop(s) => s.awarded_points,
            ComponentState::FillInTheBlank(s) => s.awarded_points,
            ComponentState::CodeEditor(s) => s.awarded_points,
            ComponentState::Flashcards(_) => 0,
        }
    }

    /// Whether the component's attempt has reached its terminal success
    /// state (all questions answered, order/pairs/blanks/tests fully
    /// correct). Flashcards carry no notion of completion and always count.
    pub fn is_complete(&self) -> bool {
        match self {
            ComponentState::Quiz(s) => s.is_complete,
            ComponentState::MatchingPairs(s) => s.is_submitted && s.is_correct,
            ComponentState::DragDrop(s) => s.is_submitted && s.is_correct,
            ComponentState::FillInTheBlank(s) => s.is_submitted && s.is_correct,
            ComponentState::CodeEditor(s) => s.is_submitted && s.is_correct,
            ComponentState::Flashcards(_) => true,
        }
    }

    /// Run one transition. The component's props are the ground truth the
    /// machine evaluates against; `runner` only matters to the code editor
    /// and `rng` only to machines that re-shuffle on try-again.
    ///
    /// User-input-driven transitions never fail: an action that does not
    /// apply in the current phase is a no-op. Only a type mismatch between
    /// the action and the machine is an error, and that is a programming
    /// error in the caller.
    pub fn dispatch(
        &mut self,
        body: &ComponentBody,
        action: Action,
        runner: &dyn CodeRunner,
        rng: &mut SessionRng,
    ) -> Result<Outcome, DispatchError> {
        match (self, body, action) {
            (ComponentState::Quiz(state), ComponentBody::Quiz(props), Action::Quiz(action)) => {
                Ok(state.dispatch(props, action))
            }
            (
                ComponentState::MatchingPairs(state),
                ComponentBody::MatchingPairs(props),
                Action::MatchingPairs(action),
            ) => Ok(state.dispatch(props, action, rng)),
            (
                ComponentState::DragDrop(state),
                ComponentBody::DragDrop(props),
                Action::DragDrop(action),
            ) => Ok(state.dispatch(props, action, rng)),
            (
                ComponentState::FillInTheBlank(state),
                ComponentBody::FillInTheBlank(props),
                Action::FillInTheBlank(action),
            ) => Ok(state.dispatch(props, action)),
            (
                ComponentState::CodeEditor(state),
                ComponentBody::CodeEditor(props),
                Action::CodeEditor(action),
            ) => Ok(state.dispatch(props, action, runner)),
            (
                ComponentState::Flashcards(state),
                ComponentBody::Flashcards(props),
                Action::Flashcards(action),
            ) => Ok(state.dispatch(props, action)),
            (state, ..) => Err(DispatchError::ActionMismatch(state.kind().tag())),
        }
    }
}

/// Awards the difference between what an attempt has earned and what was
/// already paid out, raising the mark. This is the exactly-once guard every
/// scoring machine shares.
pub(crate) fn award_up_to(awarded_points: &mut u32, earned_total: u32) -> u32 {
    let newly = earned_total.saturating_sub(*awarded_points);
    *awarded_points += newly;
    newly
}
