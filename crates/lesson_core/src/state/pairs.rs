//! Matching-pairs machine.
//!
//! The left column keeps its authored order; the right column is shuffled.
//! Selecting one item from each column binds them. Each left item holds at
//! most one binding and a bound item cannot be re-bound until a try-again.
//! A match is right when the two sides came from the same pair, so per-pair
//! feedback is always derivable from the bindings alone.

use super::{award_up_to, Outcome};
use crate::domain::MatchingPairsProps;
use crate::feedback::FeedbackKind;
use crate::rng::SessionRng;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsState {
    /// Pair ids in the right column's presentation order; persisted so a
    /// resumed session never re-shuffles under the learner.
    pub right_order: Vec<String>,
    pub selected_left: Option<String>,
    pub selected_right: Option<String>,
    /// left pair id -> right pair id.
    pub matches: IndexMap<String, String>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub correct_count: u32,
    pub awarded_points: u32,
}

#[derive(Debug, Clone)]
pub enum PairsAction {
    SelectLeft(String),
    SelectRight(String),
    Check,
    /// Try again after an incorrect check; clears bindings and re-shuffles.
    Reset,
}

fn shuffled_right(props: &MatchingPairsProps, rng: &mut SessionRng) -> Vec<String> {
    let mut order: Vec<String> = props.pairs.iter().map(|p| p.id.clone()).collect();
    if props.shuffled {
        rng.shuffle(&mut order);
    }
    order
}

impl PairsState {
    pub fn new(props: &MatchingPairsProps, rng: &mut SessionRng) -> Self {
        Self {
            right_order: shuffled_right(props, rng),
            selected_left: None,
            selected_right: None,
            matches: IndexMap::new(),
            is_submitted: false,
            is_correct: false,
            correct_count: 0,
            awarded_points: 0,
        }
    }

    pub fn dispatch(
        &mut self,
        props: &MatchingPairsProps,
        action: PairsAction,
        rng: &mut SessionRng,
    ) -> Outcome {
        match action {
            PairsAction::SelectLeft(id) => self.select_left(props, id),
            PairsAction::SelectRight(id) => self.select_right(props, id),
            PairsAction::Check => self.check(props),
            PairsAction::Reset => self.reset(props, rng),
        }
    }

    fn select_left(&mut self, props: &MatchingPairsProps, id: String) -> Outcome {
        if self.is_submitted || !props.pairs.iter().any(|p| p.id == id) {
            return Outcome::none();
        }
        // A left item already bound cannot take a second binding.
        if self.matches.contains_key(&id) {
            return Outcome::none();
        }
        self.selected_left = Some(id);
        self.try_bind();
        Outcome::feedback(FeedbackKind::Click)
    }

    fn select_right(&mut self, props: &MatchingPairsProps, id: String) -> Outcome {
        if self.is_submitted || !props.pairs.iter().any(|p| p.id == id) {
            return Outcome::none();
        }
        if self.matches.values().any(|right| right == &id) {
            return Outcome::none();
        }
        self.selected_right = Some(id);
        self.try_bind();
        Outcome::feedback(FeedbackKind::Click)
    }

    /// Binds the pending selections once both sides are chosen.
    fn try_bind(&mut self) {
        if let (Some(left), Some(right)) = (&self.selected_left, &self.selected_right) {
            self.matches.insert(left.clone(), right.clone());
            self.selected_left = None;
            self.selected_right = None;
        }
    }

    fn check(&mut self, props: &MatchingPairsProps) -> Outcome {
        if self.is_submitted {
            return Outcome::none();
        }
        self.correct_count = self
            .matches
            .iter()
            .filter(|(left, right)| left == right)
            .count() as u32;
        // Unbound pairs count against the verdict; an empty board is not a win.
        self.is_correct = !props.pairs.is_empty()
            && self.correct_count as usize == props.pairs.len()
            && self.matches.len() == props.pairs.len();
        self.is_submitted = true;

        if self.is_correct {
            let newly = award_up_to(&mut self.awarded_points, props.points);
            Outcome::awarded(newly, FeedbackKind::Correct)
        } else {
            Outcome::feedback(FeedbackKind::Incorrect)
        }
    }

    fn reset(&mut self, props: &MatchingPairsProps, rng: &mut SessionRng) -> Outcome {
        if !self.is_submitted || self.is_correct {
            return Outcome::none();
        }
        self.right_order = shuffled_right(props, rng);
        self.selected_left = None;
        self.selected_right = None;
        self.matches.clear();
        self.is_submitted = false;
        self.is_correct = false;
        self.correct_count = 0;
        Outcome::feedback(FeedbackKind::Click)
    }

    /// Verdict per binding, in binding order, valid once submitted.
    pub fn match_flags(&self) -> Vec<(String, bool)> {
        self.matches
            .iter()
            .map(|(left, right)| (left.clone(), left == right))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchingPair;

    fn three_pairs() -> MatchingPairsProps {
        let pair = |id: &str, left: &str, right: &str| MatchingPair {
            id: id.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        };
        MatchingPairsProps {
            title: "Match".into(),
            pairs: vec![
                pair("p1", "Cat", "Kitten"),
                pair("p2", "Dog", "Puppy"),
                pair("p3", "Cow", "Calf"),
            ],
            shuffled: true,
            points: 15,
        }
    }

    #[test]
    fn selecting_both_sides_binds_them() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p2".into()), &mut rng);

        assert_eq!(state.matches.get("p1").map(String::as_str), Some("p2"));
        assert_eq!(state.selected_left, None);
        assert_eq!(state.selected_right, None);
    }

    #[test]
    fn bound_left_item_refuses_a_second_binding() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p2".into()), &mut rng);

        // Clicking the already-bound left item again must not open a new
        // binding or disturb the existing one.
        let outcome = state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        assert_eq!(outcome, Outcome::none());
        state.dispatch(&props, PairsAction::SelectRight("p3".into()), &mut rng);
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.matches.get("p1").map(String::as_str), Some("p2"));
    }

    #[test]
    fn bound_right_item_cannot_be_taken_twice() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p1".into()), &mut rng);

        state.dispatch(&props, PairsAction::SelectLeft("p2".into()), &mut rng);
        let outcome = state.dispatch(&props, PairsAction::SelectRight("p1".into()), &mut rng);
        assert_eq!(outcome, Outcome::none());
        assert_eq!(state.matches.len(), 1);
    }

    #[test]
    fn all_correct_awards_once_and_flags_each_pair() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        for id in ["p1", "p2", "p3"] {
            state.dispatch(&props, PairsAction::SelectLeft(id.into()), &mut rng);
            state.dispatch(&props, PairsAction::SelectRight(id.into()), &mut rng);
        }

        let first = state.dispatch(&props, PairsAction::Check, &mut rng);
        assert!(state.is_correct);
        assert_eq!(first.awarded, 15);
        assert!(state.match_flags().iter().all(|(_, ok)| *ok));

        let second = state.dispatch(&props, PairsAction::Check, &mut rng);
        assert_eq!(second.awarded, 0);
        assert_eq!(state.awarded_points, 15);
    }

    #[test]
    fn partial_board_checks_incorrect_with_per_pair_flags() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        // One right binding, one wrong, one missing.
        state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectLeft("p2".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p3".into()), &mut rng);

        let outcome = state.dispatch(&props, PairsAction::Check, &mut rng);
        assert!(!state.is_correct);
        assert_eq!(state.correct_count, 1);
        assert_eq!(outcome.awarded, 0);
        assert_eq!(
            state.match_flags(),
            vec![("p1".to_string(), true), ("p2".to_string(), false)]
        );
    }

    #[test]
    fn reset_clears_the_board_then_success_awards_once() {
        let props = three_pairs();
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);

        state.dispatch(&props, PairsAction::SelectLeft("p1".into()), &mut rng);
        state.dispatch(&props, PairsAction::SelectRight("p2".into()), &mut rng);
        state.dispatch(&props, PairsAction::Check, &mut rng);
        assert!(!state.is_correct);

        state.dispatch(&props, PairsAction::Reset, &mut rng);
        assert!(state.matches.is_empty());
        assert!(!state.is_submitted);

        for id in ["p1", "p2", "p3"] {
            state.dispatch(&props, PairsAction::SelectLeft(id.into()), &mut rng);
            state.dispatch(&props, PairsAction::SelectRight(id.into()), &mut rng);
        }
        let outcome = state.dispatch(&props, PairsAction::Check, &mut rng);
        assert_eq!(outcome.awarded, 15);
        assert_eq!(state.awarded_points, 15);
    }

    #[test]
    fn empty_pair_list_checks_incorrect() {
        let props = MatchingPairsProps {
            title: "Match".into(),
            pairs: vec![],
            shuffled: true,
            points: 15,
        };
        let mut rng = SessionRng::new(3);
        let mut state = PairsState::new(&props, &mut rng);
        let outcome = state.dispatch(&props, PairsAction::Check, &mut rng);
        assert!(state.is_submitted);
        assert!(!state.is_correct);
        assert_eq!(outcome.awarded, 0);
    }
}
