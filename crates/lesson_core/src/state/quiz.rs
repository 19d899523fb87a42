//! Multiple-choice quiz machine.
//!
//! A quiz is a sequence of questions, each running its own
//! select → check → advance cycle. A wrong answer still advances (there is
//! no retry per question); the component completes after the last question.

use super::{award_up_to, Outcome};
use crate::domain::QuizProps;
use crate::feedback::FeedbackKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    pub current_question: usize,
    pub selected_option: Option<String>,
    /// Whether the current question's answer has been checked.
    pub is_answered: bool,
    /// Verdict for the current question, valid once `is_answered`.
    pub is_correct: bool,
    pub correct_count: u32,
    pub is_complete: bool,
    pub awarded_points: u32,
}

#[derive(Debug, Clone)]
pub enum QuizAction {
    /// Pick (or change) an option before checking.
    Select(String),
    Check,
    /// Move to the next question, or complete after the last one.
    Advance,
}

impl QuizState {
    pub fn new(props: &QuizProps) -> Self {
        Self {
            current_question: 0,
            selected_option: None,
            is_answered: false,
            is_correct: false,
            correct_count: 0,
            // A quiz without questions has nothing to run.
            is_complete: props.questions.is_empty(),
            awarded_points: 0,
        }
    }

    pub fn dispatch(&mut self, props: &QuizProps, action: QuizAction) -> Outcome {
        match action {
            QuizAction::Select(option_id) => self.select(props, option_id),
            QuizAction::Check => self.check(props),
            QuizAction::Advance => self.advance(props),
        }
    }

    fn select(&mut self, props: &QuizProps, option_id: String) -> Outcome {
        if self.is_complete || self.is_answered {
            return Outcome::none();
        }
        let Some(question) = props.questions.get(self.current_question) else {
            return Outcome::none();
        };
        if !question.options.iter().any(|o| o.id == option_id) {
            return Outcome::none();
        }
        // Changing your mind before checking costs nothing.
        self.selected_option = Some(option_id);
        Outcome::feedback(FeedbackKind::Click)
    }

    fn check(&mut self, props: &QuizProps) -> Outcome {
        if self.is_complete || self.is_answered {
            return Outcome::none();
        }
        let Some(question) = props.questions.get(self.current_question) else {
            return Outcome::none();
        };
        let Some(selected) = &self.selected_option else {
            return Outcome::none();
        };

        let correct = question
            .options
            .iter()
            .find(|o| &o.id == selected)
            .map_or(false, |o| o.is_correct);

        self.is_answered = true;
        self.is_correct = correct;
        if correct {
            self.correct_count += 1;
            let earned = self.correct_count * props.points;
            let newly = award_up_to(&mut self.awarded_points, earned);
            Outcome::awarded(newly, FeedbackKind::Correct)
        } else {
            Outcome::feedback(FeedbackKind::Incorrect)
        }
    }

    fn advance(&mut self, props: &QuizProps) -> Outcome {
        if self.is_complete || !self.is_answered {
            return Outcome::none();
        }
        if self.current_question + 1 < props.questions.len() {
            self.current_question += 1;
            self.selected_option = None;
            self.is_answered = false;
            self.is_correct = false;
            Outcome::feedback(FeedbackKind::Click)
        } else {
            self.is_complete = true;
            Outcome::feedback(FeedbackKind::Complete)
        }
    }
}
