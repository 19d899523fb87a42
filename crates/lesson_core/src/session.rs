//! crates/lesson_core/src/session.rs
//!
//! A playback session: one user working through one lesson.
//!
//! The session owns the per-component state map that is the unit of
//! persistence, routes user actions to the right machine, applies score and
//! feedback effects, and tracks navigation. Every state-affecting transition
//! leaves the map describing the post-transition state, so whatever snapshot
//! the caller persists next can never be stale relative to what the learner
//! saw.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Lesson;
use crate::feedback::FeedbackSink;
use crate::ports::{CodeRunner, InteractionRecord};
use crate::rng::SessionRng;
use crate::score::ScoreContext;
use crate::state::{Action, ComponentState, ComponentsState, DispatchError};

pub struct PlaybackSession {
    lesson: Lesson,
    user_id: Uuid,
    current_slide: usize,
    score: ScoreContext,
    states: ComponentsState,
    rng: SessionRng,
    runner: Arc<dyn CodeRunner>,
    feedback: Arc<dyn FeedbackSink>,
    /// Set when the state map changed since the last snapshot was taken.
    dirty: bool,
}

impl PlaybackSession {
    /// Starts a fresh session: every interactive component gets its initial
    /// state up front, shuffled where it asks for it. The map is immediately
    /// ready to persist, so a second viewer attaching to the same record sees
    /// the same presentation order instead of a new shuffle.
    pub fn new(
        lesson: Lesson,
        user_id: Uuid,
        seed: u64,
        runner: Arc<dyn CodeRunner>,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        let mut rng = SessionRng::new(seed);
        let mut states = ComponentsState::new();
        for component in lesson.components() {
            if let Some(state) = ComponentState::init(&component.body, &mut rng) {
                states.insert(component.id.clone(), state);
            }
        }
        let score = ScoreContext::for_lesson(&lesson);
        Self {
            lesson,
            user_id,
            current_slide: 0,
            score,
            states,
            rng,
            runner,
            feedback,
            dirty: true,
        }
    }

    /// Rebuilds a session from a persisted record. Saved component states are
    /// adopted verbatim — submission flags, selections and shuffled orders
    /// included — and the score is replayed from their award marks. States
    /// for components the lesson no longer contains are dropped; components
    /// saved under a different type, or never seen before, start fresh.
    pub fn resume(
        lesson: Lesson,
        record: InteractionRecord,
        seed: u64,
        runner: Arc<dyn CodeRunner>,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        let mut rng = SessionRng::new(seed);
        let mut saved = record.components_state;
        let mut states = ComponentsState::new();
        for component in lesson.components() {
            let adopted = saved
                .shift_remove(&component.id)
                .filter(|state| Some(state.kind()) == component.body.kind());
            let state = match adopted {
                Some(state) => Some(state),
                None => ComponentState::init(&component.body, &mut rng),
            };
            if let Some(state) = state {
                states.insert(component.id.clone(), state);
            }
        }
        let score = ScoreContext::replay(&lesson, &states);
        Self {
            lesson,
            user_id: record.user_id,
            current_slide: 0,
            score,
            states,
            rng,
            runner,
            feedback,
            dirty: false,
        }
    }

    /// Routes one user action to the component's machine, applies its
    /// outcome, and returns the component's post-transition state — the
    /// snapshot a caller should persist.
    pub fn dispatch(
        &mut self,
        component_id: &str,
        action: Action,
    ) -> Result<&ComponentState, DispatchError> {
        let component = self
            .lesson
            .components()
            .find(|c| c.id == component_id)
            .ok_or_else(|| DispatchError::UnknownComponent(component_id.to_string()))?;
        let state = self
            .states
            .get_mut(component_id)
            .ok_or_else(|| DispatchError::UnknownComponent(component_id.to_string()))?;

        let outcome = state.dispatch(&component.body, action, self.runner.as_ref(), &mut self.rng)?;

        if outcome.awarded > 0 {
            self.score.add_points(outcome.awarded);
            debug!(
                component = component_id,
                awarded = outcome.awarded,
                score = self.score.score,
                "points awarded"
            );
        }
        if let Some(kind) = outcome.feedback {
            // Fire-and-forget; the sink must not block the transition.
            self.feedback.notify(kind);
        }
        self.dirty = true;
        Ok(&self.states[component_id])
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn score(&self) -> ScoreContext {
        self.score
    }

    pub fn components_state(&self) -> &ComponentsState {
        &self.states
    }

    pub fn component_state(&self, component_id: &str) -> Option<&ComponentState> {
        self.states.get(component_id)
    }

    /// Whether there are changes no snapshot has captured yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clones the state map for persistence and marks the session clean.
    pub fn take_snapshot(&mut self) -> ComponentsState {
        self.dirty = false;
        self.states.clone()
    }

    /// Every gamified component has reached its terminal success state.
    pub fn is_complete(&self) -> bool {
        self.lesson
            .components()
            .filter(|c| c.body.is_gamified())
            .all(|c| self.states.get(&c.id).is_some_and(ComponentState::is_complete))
    }

    /// The full record to upsert into the interaction store.
    pub fn to_record(&self) -> InteractionRecord {
        InteractionRecord {
            user_id: self.user_id,
            lesson_id: self.lesson.id.clone(),
            components_state: self.states.clone(),
            completed: self.is_complete(),
            score: self.score.score,
            total_possible: self.score.total_possible,
            last_updated: Utc::now(),
        }
    }

    //=====================================================================================
    // Navigation
    //=====================================================================================

    pub fn current_slide_index(&self) -> usize {
        self.current_slide
    }

    pub fn current_slide(&self) -> &crate::domain::Slide {
        &self.lesson.slides[self.current_slide]
    }

    /// Jump directly to a slide; out-of-range targets are ignored.
    /// Navigation never disturbs component state.
    pub fn go_to_slide(&mut self, index: usize) {
        if index < self.lesson.slides.len() {
            self.current_slide = index;
        }
    }

    pub fn next_slide(&mut self) {
        if self.current_slide + 1 < self.lesson.slides.len() {
            self.current_slide += 1;
        }
    }

    pub fn prev_slide(&mut self) {
        self.current_slide = self.current_slide.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoopFeedback;
    use crate::ports::NoRunner;
    use crate::state::{OrderAction, QuizAction};

    fn lesson_fixture() -> Lesson {
        serde_json::from_value(serde_json::json!({
            "id": "l1",
            "title": "Fixture",
            "slides": [
                { "id": "s1", "title": "One", "components": [
                    { "id": "intro", "type": "paragraph", "props": { "content": "hi" } },
                    { "id": "quiz1", "type": "quiz", "props": {
                        "points": 10,
                        "questions": [{
                            "id": "q1",
                            "question": "Pick A",
                            "options": [
                                { "id": "a", "text": "A", "isCorrect": true },
                                { "id": "b", "text": "B", "isCorrect": false }
                            ]
                        }]
                    }}
                ]},
                { "id": "s2", "title": "Two", "components": [
                    { "id": "order1", "type": "dragDrop", "props": {
                        "points": 15,
                        "shuffled": true,
                        "items": [
                            { "id": "x", "text": "X", "correctIndex": 0 },
                            { "id": "y", "text": "Y", "correctIndex": 1 },
                            { "id": "z", "text": "Z", "correctIndex": 2 }
                        ]
                    }}
                ]}
            ]
        }))
        .unwrap()
    }

    fn new_session(lesson: Lesson, seed: u64) -> PlaybackSession {
        PlaybackSession::new(
            lesson,
            Uuid::nil(),
            seed,
            Arc::new(NoRunner),
            Arc::new(NoopFeedback),
        )
    }

    #[test]
    fn fresh_session_initializes_every_interactive_slot() {
        let session = new_session(lesson_fixture(), 42);
        assert!(session.component_state("quiz1").is_some());
        assert!(session.component_state("order1").is_some());
        // Presentational components carry no state.
        assert!(session.component_state("intro").is_none());
        // The initial snapshot is ready to persist.
        assert!(session.is_dirty());
    }

    #[test]
    fn dispatch_feeds_the_score_exactly_once() {
        let mut session = new_session(lesson_fixture(), 42);
        assert_eq!(session.score().total_possible, 25);

        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Select("a".into())))
            .unwrap();
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Check))
            .unwrap();
        assert_eq!(session.score().score, 10);

        // A second check is a structural no-op.
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Check))
            .unwrap();
        assert_eq!(session.score().score, 10);
    }

    #[test]
    fn unknown_component_is_a_typed_error() {
        let mut session = new_session(lesson_fixture(), 42);
        let result = session.dispatch("missing", Action::Quiz(QuizAction::Check));
        assert!(matches!(result, Err(DispatchError::UnknownComponent(_))));
    }

    #[test]
    fn resume_adopts_saved_state_verbatim_and_replays_the_score() {
        let mut session = new_session(lesson_fixture(), 42);
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Select("a".into())))
            .unwrap();
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Check))
            .unwrap();

        // Round-trip the snapshot through JSON, as the store would.
        let record = session.to_record();
        let json = serde_json::to_string(&record).unwrap();
        let restored: InteractionRecord = serde_json::from_str(&json).unwrap();

        // A different seed must not matter: saved order is adopted, not
        // re-shuffled.
        let resumed = PlaybackSession::resume(
            lesson_fixture(),
            restored,
            999,
            Arc::new(NoRunner),
            Arc::new(NoopFeedback),
        );

        assert_eq!(resumed.components_state(), session.components_state());
        assert_eq!(resumed.score().score, 10);
        assert!(!resumed.is_dirty());
    }

    #[test]
    fn resume_drops_states_for_components_no_longer_present() {
        let session = new_session(lesson_fixture(), 42);
        let mut record = session.to_record();
        // Simulate a stale slot from an edited-out component.
        let stray = record.components_state["quiz1"].clone();
        record.components_state.insert("ghost".to_string(), stray);

        let resumed = PlaybackSession::resume(
            lesson_fixture(),
            record,
            42,
            Arc::new(NoRunner),
            Arc::new(NoopFeedback),
        );
        assert!(resumed.component_state("ghost").is_none());
        assert!(resumed.component_state("quiz1").is_some());
    }

    #[test]
    fn completion_requires_every_gamified_component() {
        let mut session = new_session(lesson_fixture(), 42);
        assert!(!session.is_complete());

        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Select("a".into())))
            .unwrap();
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Check))
            .unwrap();
        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Advance))
            .unwrap();
        assert!(!session.is_complete());

        // Solve the ordering regardless of the shuffle it started with.
        for (target, id) in ["x", "y", "z"].iter().enumerate() {
            let current = match session.component_state("order1").unwrap() {
                ComponentState::DragDrop(s) => s.order.clone(),
                _ => unreachable!(),
            };
            let from = current.iter().position(|o| o == id).unwrap();
            session
                .dispatch(
                    "order1",
                    Action::DragDrop(OrderAction::Move { from, to: target }),
                )
                .unwrap();
        }
        session
            .dispatch("order1", Action::DragDrop(OrderAction::Check))
            .unwrap();

        assert!(session.is_complete());
        assert_eq!(session.score().score, 25);
        assert!(session.to_record().completed);
    }

    #[test]
    fn navigation_clamps_and_leaves_state_alone() {
        let mut session = new_session(lesson_fixture(), 42);
        let before = session.components_state().clone();

        session.next_slide();
        assert_eq!(session.current_slide_index(), 1);
        session.next_slide();
        assert_eq!(session.current_slide_index(), 1);
        session.prev_slide();
        session.prev_slide();
        assert_eq!(session.current_slide_index(), 0);
        session.go_to_slide(99);
        assert_eq!(session.current_slide_index(), 0);

        assert_eq!(session.components_state(), &before);
    }

    #[test]
    fn snapshot_clears_the_dirty_flag() {
        let mut session = new_session(lesson_fixture(), 42);
        assert!(session.is_dirty());
        let _ = session.take_snapshot();
        assert!(!session.is_dirty());

        session
            .dispatch("quiz1", Action::Quiz(QuizAction::Select("a".into())))
            .unwrap();
        assert!(session.is_dirty());
    }
}
