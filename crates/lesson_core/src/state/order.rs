//! Drag-to-reorder machine.
//!
//! Items are presented in a (usually shuffled) order; the learner rearranges
//! them and checks once. Correctness is evaluated per position, so feedback
//! can flag exactly which items sit wrong even when the overall verdict is
//! incorrect.

use super::{award_up_to, Outcome};
use crate::domain::{DragDropProps, OrderItem};
use crate::feedback::FeedbackKind;
use crate::rng::SessionRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderState {
    /// Item ids in current presentation order. Persisted so a resumed
    /// session shows the same arrangement instead of re-shuffling.
    pub order: Vec<String>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub awarded_points: u32,
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the item at `from` so it sits at `to`.
    Move { from: usize, to: usize },
    Check,
    /// Try again after an incorrect check; re-shuffles.
    Reset,
}

fn presentation_order(props: &DragDropProps, rng: &mut SessionRng) -> Vec<String> {
    let mut items: Vec<&OrderItem> = props.items.iter().collect();
    items.sort_by_key(|i| i.correct_index);
    let mut order: Vec<String> = items.into_iter().map(|i| i.id.clone()).collect();
    if props.shuffled {
        rng.shuffle(&mut order);
    }
    order
}

impl OrderState {
    pub fn new(props: &DragDropProps, rng: &mut SessionRng) -> Self {
        Self {
            order: presentation_order(props, rng),
            is_submitted: false,
            is_correct: false,
            awarded_points: 0,
        }
    }

    pub fn dispatch(
        &mut self,
        props: &DragDropProps,
        action: OrderAction,
        rng: &mut SessionRng,
    ) -> Outcome {
        match action {
            OrderAction::Move { from, to } => self.move_item(from, to),
            OrderAction::Check => self.check(props),
            OrderAction::Reset => self.reset(props, rng),
        }
    }

    fn move_item(&mut self, from: usize, to: usize) -> Outcome {
        if self.is_submitted || from >= self.order.len() || to >= self.order.len() {
            return Outcome::none();
        }
        if from != to {
            let item = self.order.remove(from);
            self.order.insert(to, item);
        }
        Outcome::feedback(FeedbackKind::Click)
    }

    fn check(&mut self, props: &DragDropProps) -> Outcome {
        if self.is_submitted {
            return Outcome::none();
        }
        let flags = self.position_flags(props);
        // Nothing to arrange counts as incorrect, not as vacuously correct.
        self.is_correct = !flags.is_empty()
            && flags.iter().all(|&ok| ok)
            && self.order.len() == props.items.len();
        self.is_submitted = true;

        if self.is_correct {
            let newly = award_up_to(&mut self.awarded_points, props.points);
            Outcome::awarded(newly, FeedbackKind::Correct)
        } else {
            Outcome::feedback(FeedbackKind::Incorrect)
        }
    }

    fn reset(&mut self, props: &DragDropProps, rng: &mut SessionRng) -> Outcome {
        // Correct is terminal for the attempt.
        if !self.is_submitted || self.is_correct {
            return Outcome::none();
        }
        self.order = presentation_order(props, rng);
        self.is_submitted = false;
        self.is_correct = false;
        Outcome::feedback(FeedbackKind::Click)
    }

    /// Whether the item at each presentation position sits where the answer
    /// key wants it. Ids the props no longer contain count as wrong.
    pub fn position_flags(&self, props: &DragDropProps) -> Vec<bool> {
        self.order
            .iter()
            .enumerate()
            .map(|(position, id)| {
                props
                    .items
                    .iter()
                    .find(|item| &item.id == id)
                    .map_or(false, |item| item.correct_index == position)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_items() -> DragDropProps {
        let item = |id: &str, index: usize| OrderItem {
            id: id.to_string(),
            text: id.to_uppercase(),
            correct_index: index,
        };
        DragDropProps {
            title: "Order".into(),
            items: vec![item("a", 0), item("b", 1), item("c", 2)],
            shuffled: false,
            points: 15,
        }
    }

    fn state_with_order(order: &[&str]) -> OrderState {
        OrderState {
            order: order.iter().map(|s| s.to_string()).collect(),
            is_submitted: false,
            is_correct: false,
            awarded_points: 0,
        }
    }

    #[test]
    fn wrong_order_flags_each_position() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        // Presented as [b, a, c]: b and a are misplaced, c is home.
        let mut state = state_with_order(&["b", "a", "c"]);

        let outcome = state.dispatch(&props, OrderAction::Check, &mut rng);
        assert!(state.is_submitted);
        assert!(!state.is_correct);
        assert_eq!(outcome.awarded, 0);
        assert_eq!(state.position_flags(&props), vec![false, false, true]);
    }

    #[test]
    fn correct_order_awards_once() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        let mut state = state_with_order(&["b", "a", "c"]);

        state.dispatch(&props, OrderAction::Move { from: 1, to: 0 }, &mut rng);
        assert_eq!(state.order, vec!["a", "b", "c"]);

        let first = state.dispatch(&props, OrderAction::Check, &mut rng);
        assert!(state.is_correct);
        assert_eq!(first.awarded, 15);

        // Checking again without a reset changes nothing.
        let second = state.dispatch(&props, OrderAction::Check, &mut rng);
        assert_eq!(second.awarded, 0);
        assert_eq!(state.awarded_points, 15);
    }

    #[test]
    fn reset_then_solve_awards_exactly_once() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        let mut state = state_with_order(&["c", "b", "a"]);

        state.dispatch(&props, OrderAction::Check, &mut rng);
        assert!(!state.is_correct);

        state.dispatch(&props, OrderAction::Reset, &mut rng);
        assert!(!state.is_submitted);

        // Solve it regardless of where the reshuffle left things.
        state.order = vec!["a".into(), "b".into(), "c".into()];
        let outcome = state.dispatch(&props, OrderAction::Check, &mut rng);
        assert_eq!(outcome.awarded, 15);
        assert_eq!(state.awarded_points, 15);
    }

    #[test]
    fn reset_after_success_is_refused() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        let mut state = state_with_order(&["a", "b", "c"]);

        state.dispatch(&props, OrderAction::Check, &mut rng);
        assert!(state.is_correct);

        let outcome = state.dispatch(&props, OrderAction::Reset, &mut rng);
        assert_eq!(outcome, Outcome::none());
        assert!(state.is_submitted);
    }

    #[test]
    fn moves_are_ignored_after_submission() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        let mut state = state_with_order(&["a", "b", "c"]);
        state.dispatch(&props, OrderAction::Check, &mut rng);

        state.dispatch(&props, OrderAction::Move { from: 0, to: 2 }, &mut rng);
        assert_eq!(state.order, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_item_list_checks_incorrect() {
        let props = DragDropProps {
            title: "Order".into(),
            items: vec![],
            shuffled: true,
            points: 15,
        };
        let mut rng = SessionRng::new(7);
        let mut state = OrderState::new(&props, &mut rng);
        let outcome = state.dispatch(&props, OrderAction::Check, &mut rng);
        assert!(state.is_submitted);
        assert!(!state.is_correct);
        assert_eq!(outcome.awarded, 0);
    }

    #[test]
    fn out_of_bounds_move_is_a_no_op() {
        let props = three_items();
        let mut rng = SessionRng::new(7);
        let mut state = state_with_order(&["a", "b", "c"]);
        state.dispatch(&props, OrderAction::Move { from: 0, to: 9 }, &mut rng);
        assert_eq!(state.order, vec!["a", "b", "c"]);
    }
}
