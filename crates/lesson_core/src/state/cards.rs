//! Flashcards machine.
//!
//! Pure navigation: flip the current card, step forward and back. Flashcards
//! never score, so there is no check phase and nothing to award.

use super::Outcome;
use crate::domain::FlashcardsProps;
use crate::feedback::FeedbackKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsState {
    pub current_card: usize,
    pub is_flipped: bool,
}

#[derive(Debug, Clone)]
pub enum CardsAction {
    Flip,
    Next,
    Prev,
}

impl CardsState {
    pub fn new() -> Self {
        Self {
            current_card: 0,
            is_flipped: false,
        }
    }

    pub fn dispatch(&mut self, props: &FlashcardsProps, action: CardsAction) -> Outcome {
        if props.cards.is_empty() {
            return Outcome::none();
        }
        match action {
            CardsAction::Flip => {
                self.is_flipped = !self.is_flipped;
                Outcome::feedback(FeedbackKind::Click)
            }
            CardsAction::Next => {
                if self.current_card + 1 < props.cards.len() {
                    self.current_card += 1;
                    self.is_flipped = false;
                    Outcome::feedback(FeedbackKind::Click)
                } else {
                    Outcome::none()
                }
            }
            CardsAction::Prev => {
                if self.current_card > 0 {
                    self.current_card -= 1;
                    self.is_flipped = false;
                    Outcome::feedback(FeedbackKind::Click)
                } else {
                    Outcome::none()
                }
            }
        }
    }
}

impl Default for CardsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flashcard;

    fn two_cards() -> FlashcardsProps {
        FlashcardsProps {
            title: "Cards".into(),
            cards: vec![
                Flashcard {
                    id: "c1".into(),
                    front: "2 + 2".into(),
                    back: "4".into(),
                },
                Flashcard {
                    id: "c2".into(),
                    front: "3 + 3".into(),
                    back: "6".into(),
                },
            ],
        }
    }

    #[test]
    fn stepping_unflips_and_clamps_at_the_ends() {
        let props = two_cards();
        let mut state = CardsState::new();

        state.dispatch(&props, CardsAction::Flip);
        assert!(state.is_flipped);

        state.dispatch(&props, CardsAction::Next);
        assert_eq!(state.current_card, 1);
        assert!(!state.is_flipped);

        // Already on the last card.
        let outcome = state.dispatch(&props, CardsAction::Next);
        assert_eq!(outcome, Outcome::none());
        assert_eq!(state.current_card, 1);

        state.dispatch(&props, CardsAction::Prev);
        let outcome = state.dispatch(&props, CardsAction::Prev);
        assert_eq!(outcome, Outcome::none());
        assert_eq!(state.current_card, 0);
    }

    #[test]
    fn empty_deck_ignores_everything() {
        let props = FlashcardsProps {
            title: "Cards".into(),
            cards: vec![],
        };
        let mut state = CardsState::new();
        assert_eq!(state.dispatch(&props, CardsAction::Flip), Outcome::none());
    }
}
