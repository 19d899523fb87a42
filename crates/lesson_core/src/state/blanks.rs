//! Fill-in-the-blank machine.
//!
//! Answers are compared per blank against the main answer and its
//! alternatives, case-insensitively unless the component says otherwise.
//! This is the one partial-credit machine: points scale with the fraction
//! of blanks answered right.

use super::{award_up_to, Outcome};
use crate::domain::{Blank, FillInTheBlankProps};
use crate::feedback::FeedbackKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlanksState {
    /// One pending answer per blank, by position.
    pub answers: Vec<String>,
    /// Per-blank verdicts, filled in by Check.
    pub results: Vec<bool>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub correct_count: u32,
    pub awarded_points: u32,
}

#[derive(Debug, Clone)]
pub enum BlanksAction {
    SetAnswer { index: usize, text: String },
    Check,
    /// Try again after an incorrect check; clears the entered answers.
    Reset,
}

fn answer_matches(blank: &Blank, user_answer: &str, case_sensitive: bool) -> bool {
    // An empty answer never matches, even an empty answer key.
    if user_answer.is_empty() {
        return false;
    }
    let hit = |expected: &str| {
        if case_sensitive {
            user_answer == expected
        } else {
            user_answer.eq_ignore_ascii_case(expected)
        }
    };
    hit(&blank.answer) || blank.alternatives.iter().any(|alt| hit(alt))
}

impl BlanksState {
    pub fn new(props: &FillInTheBlankProps) -> Self {
        Self {
            answers: vec![String::new(); props.blanks.len()],
            results: Vec::new(),
            is_submitted: false,
            is_correct: false,
            correct_count: 0,
            awarded_points: 0,
        }
    }

    pub fn dispatch(&mut self, props: &FillInTheBlankProps, action: BlanksAction) -> Outcome {
        match action {
            BlanksAction::SetAnswer { index, text } => self.set_answer(index, text),
            BlanksAction::Check => self.check(props),
            BlanksAction::Reset => self.reset(props),
        }
    }

    fn set_answer(&mut self, index: usize, text: String) -> Outcome {
        if self.is_submitted || index >= self.answers.len() {
            return Outcome::none();
        }
        self.answers[index] = text;
        Outcome::none()
    }

    fn check(&mut self, props: &FillInTheBlankProps) -> Outcome {
        if self.is_submitted {
            return Outcome::none();
        }
        self.results = props
            .blanks
            .iter()
            .enumerate()
            .map(|(i, blank)| {
                let user_answer = self.answers.get(i).map(String::as_str).unwrap_or("");
                answer_matches(blank, user_answer, props.case_sensitive)
            })
            .collect();
        self.correct_count = self.results.iter().filter(|&&ok| ok).count() as u32;
        self.is_correct =
            !props.blanks.is_empty() && self.correct_count as usize == props.blanks.len();
        self.is_submitted = true;

        let earned = if props.blanks.is_empty() {
            0
        } else {
            let fraction = f64::from(self.correct_count) / props.blanks.len() as f64;
            (fraction * f64::from(props.points)).round() as u32
        };
        let newly = award_up_to(&mut self.awarded_points, earned);
        let feedback = if self.is_correct {
            FeedbackKind::Correct
        } else {
            FeedbackKind::Incorrect
        };
        Outcome {
            awarded: newly,
            feedback: Some(feedback),
        }
    }

    fn reset(&mut self, props: &FillInTheBlankProps) -> Outcome {
        if !self.is_submitted || self.is_correct {
            return Outcome::none();
        }
        self.answers = vec![String::new(); props.blanks.len()];
        self.results = Vec::new();
        self.is_submitted = false;
        self.is_correct = false;
        self.correct_count = 0;
        Outcome::feedback(FeedbackKind::Click)
    }
}
