//! crates/lesson_core/src/score.rs
//!
//! Session-scoped score aggregation.
//!
//! `total_possible` is fixed when playback starts by summing what every
//! gamified component in the lesson can award. `score` only ever grows, and
//! only through the state machines' guarded Check transitions. The aggregate
//! is also re-derivable from a persisted snapshot, so a resumed session shows
//! the right score before the learner touches anything.

use crate::domain::{Lesson, Slide};
use crate::state::ComponentsState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContext {
    pub score: u32,
    pub total_possible: u32,
}

impl ScoreContext {
    /// The canonical scope: every gamified component in the lesson.
    pub fn for_lesson(lesson: &Lesson) -> Self {
        Self {
            score: 0,
            total_possible: lesson
                .components()
                .map(|c| c.body.points_possible())
                .sum(),
        }
    }

    /// A single slide's share of the total.
    pub fn for_slide(slide: &Slide) -> Self {
        Self {
            score: 0,
            total_possible: slide
                .components
                .iter()
                .map(|c| c.body.points_possible())
                .sum(),
        }
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    /// Rebuilds the aggregate from a persisted snapshot: the lesson fixes
    /// the denominator, the snapshot's award marks fix the numerator.
    pub fn replay(lesson: &Lesson, states: &ComponentsState) -> Self {
        let mut context = Self::for_lesson(lesson);
        context.score = states.values().map(|s| s.awarded_points()).sum();
        context
    }

    pub fn percent(&self) -> u32 {
        if self.total_possible == 0 {
            0
        } else {
            (self.score * 100 + self.total_possible / 2) / self.total_possible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lesson;

    fn lesson_fixture() -> Lesson {
        serde_json::from_value(serde_json::json!({
            "id": "l1",
            "title": "Fixture",
            "slides": [
                { "id": "s1", "title": "One", "components": [
                    { "id": "p1", "type": "paragraph", "props": { "content": "hi" } },
                    { "id": "quiz1", "type": "quiz", "props": {
                        "points": 10,
                        "questions": [
                            { "id": "q1", "options": [] },
                            { "id": "q2", "options": [] }
                        ]
                    }}
                ]},
                { "id": "s2", "title": "Two", "components": [
                    { "id": "order1", "type": "dragDrop", "props": { "points": 15, "items": [] } },
                    { "id": "cards1", "type": "flashcards", "props": { "cards": [] } }
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn lesson_total_counts_only_gamified_components() {
        let lesson = lesson_fixture();
        // quiz: 10 points x 2 questions; dragDrop: 15; the rest: nothing.
        assert_eq!(ScoreContext::for_lesson(&lesson).total_possible, 35);
    }

    #[test]
    fn slide_totals_partition_the_lesson_total() {
        let lesson = lesson_fixture();
        let per_slide: u32 = lesson
            .slides
            .iter()
            .map(|s| ScoreContext::for_slide(s).total_possible)
            .sum();
        assert_eq!(per_slide, ScoreContext::for_lesson(&lesson).total_possible);
    }

    #[test]
    fn percent_rounds_half_up() {
        let context = ScoreContext {
            score: 1,
            total_possible: 3,
        };
        assert_eq!(context.percent(), 33);
        let context = ScoreContext {
            score: 2,
            total_possible: 3,
        };
        assert_eq!(context.percent(), 67);
    }

    #[test]
    fn empty_total_percent_is_zero() {
        let context = ScoreContext {
            score: 0,
            total_possible: 0,
        };
        assert_eq!(context.percent(), 0);
    }
}
