//! crates/lesson_core/src/render.rs
//!
//! Maps a component (plus its interaction state and the score context) to a
//! serializable view model describing what a front end should draw. This is
//! the seam that keeps the closed component set decoupled from any particular
//! playback or editing surface: surfaces consume [`RenderView`], never the
//! component types themselves.
//!
//! Rendering is total. Unknown kinds become [`RenderView::Unsupported`],
//! missing interaction state renders like a fresh component, and malformed
//! props degrade to an empty view rather than failing.

use crate::domain::{Component, ComponentBody, HotspotRegion, BLANK_MARKER};
use crate::score::ScoreContext;
use crate::state::ComponentState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Author-side preview: interactive components collapse to a summary
    /// card instead of running their machines.
    Edit,
    Play,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderView {
    Paragraph {
        content: String,
        align: Option<String>,
    },
    Heading {
        content: String,
        level: u8,
        align: Option<String>,
    },
    BulletList {
        items: Vec<String>,
        ordered: bool,
    },
    Image {
        src: String,
        alt: String,
        caption: Option<String>,
        width: Option<String>,
    },
    Table {
        data: Vec<Vec<String>>,
    },
    Quiz(QuizView),
    MatchingPairs(PairsView),
    DragDrop(OrderView),
    FillInTheBlank(BlanksView),
    CodeEditor(CodeView),
    Flashcards(CardsView),
    Hotspot {
        image: String,
        hotspots: Vec<HotspotRegion>,
    },
    ScoreBoard(ScoreBoardView),
    /// Author-side summary of an interactive component.
    EditorCard {
        title: String,
        detail: String,
    },
    /// Fallback for a type tag this build does not implement.
    Unsupported {
        kind: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub title: String,
    pub points: u32,
    pub question_count: usize,
    pub current_question: usize,
    pub question: Option<QuizQuestionView>,
    pub is_answered: bool,
    pub is_correct: bool,
    pub correct_count: u32,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionView {
    pub question: String,
    pub options: Vec<QuizOptionView>,
    /// Shown only after the answer is checked.
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOptionView {
    pub id: String,
    pub text: String,
    pub selected: bool,
    /// After checking: `Some(true)` marks the right option, `Some(false)`
    /// marks a chosen wrong one.
    pub verdict: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairsView {
    pub title: String,
    pub points: u32,
    pub left: Vec<PairItemView>,
    pub right: Vec<PairItemView>,
    pub matched_count: usize,
    pub pair_count: usize,
    pub is_submitted: bool,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairItemView {
    pub id: String,
    pub text: String,
    pub selected: bool,
    pub matched: bool,
    /// Per-pair verdict once submitted.
    pub verdict: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub title: String,
    pub points: u32,
    pub items: Vec<OrderItemView>,
    pub is_submitted: bool,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: String,
    pub text: String,
    /// Whether this position is right, once submitted.
    pub verdict: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlanksView {
    pub title: String,
    pub points: u32,
    /// The text split around its blank markers, in reading order.
    pub segments: Vec<BlankSegment>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub correct_count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlankSegment {
    Text {
        text: String,
    },
    Input {
        index: usize,
        value: String,
        verdict: Option<bool>,
        /// The expected answer, revealed for a wrong verdict.
        expected: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeView {
    pub title: String,
    pub language: String,
    pub code: String,
    pub read_only: bool,
    pub output: Option<String>,
    pub tests: Vec<TestView>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestView {
    pub id: String,
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsView {
    pub title: String,
    pub card_count: usize,
    pub current_card: usize,
    pub front: String,
    pub back: String,
    pub is_flipped: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBoardView {
    pub title: String,
    pub score: u32,
    pub total_possible: u32,
    pub percent: u32,
    pub show_total: bool,
    pub show_percentage: bool,
}

/// Resolves a component to its view model.
pub fn render(
    component: &Component,
    mode: RenderMode,
    state: Option<&ComponentState>,
    score: Option<ScoreContext>,
) -> RenderView {
    if mode == RenderMode::Edit {
        if let Some(card) = editor_card(&component.body) {
            return card;
        }
    }
    match &component.body {
        ComponentBody::Paragraph(p) => RenderView::Paragraph {
            content: p.content.clone(),
            align: p.align.clone(),
        },
        ComponentBody::Heading(p) => RenderView::Heading {
            content: p.content.clone(),
            level: p.level,
            align: p.align.clone(),
        },
        ComponentBody::BulletList(p) => RenderView::BulletList {
            items: p.items.clone(),
            ordered: p.list_type.as_deref() == Some("ordered"),
        },
        ComponentBody::Image(p) => RenderView::Image {
            src: p.src.clone(),
            alt: p.alt.clone(),
            caption: p.caption.clone(),
            width: p.width.clone(),
        },
        ComponentBody::Table(p) => RenderView::Table {
            data: p.data.clone(),
        },
        ComponentBody::Quiz(props) => RenderView::Quiz(quiz_view(props, state)),
        ComponentBody::MatchingPairs(props) => {
            RenderView::MatchingPairs(pairs_view(props, state))
        }
        ComponentBody::DragDrop(props) => RenderView::DragDrop(order_view(props, state)),
        ComponentBody::FillInTheBlank(props) => {
            RenderView::FillInTheBlank(blanks_view(props, state))
        }
        ComponentBody::CodeEditor(props) => RenderView::CodeEditor(code_view(props, state)),
        ComponentBody::Flashcards(props) => RenderView::Flashcards(cards_view(props, state)),
        ComponentBody::Hotspot(p) => RenderView::Hotspot {
            image: p.image.clone(),
            hotspots: p.hotspots.clone(),
        },
        ComponentBody::ScoreBoard(p) => {
            let context = score.unwrap_or(ScoreContext {
                score: 0,
                total_possible: 0,
            });
            RenderView::ScoreBoard(ScoreBoardView {
                title: p.title.clone(),
                score: context.score,
                total_possible: context.total_possible,
                percent: context.percent(),
                show_total: p.show_total,
                show_percentage: p.show_percentage,
            })
        }
        ComponentBody::Unknown { kind, .. } => RenderView::Unsupported { kind: kind.clone() },
    }
}

/// The collapsed author preview for interactive kinds; content kinds render
/// in full even while editing.
fn editor_card(body: &ComponentBody) -> Option<RenderView> {
    let (title, detail) = match body {
        ComponentBody::Quiz(p) => (
            p.title.clone(),
            format!(
                "{} question{} • {} points",
                p.questions.len(),
                if p.questions.len() == 1 { "" } else { "s" },
                p.points
            ),
        ),
        ComponentBody::MatchingPairs(p) => (
            p.title.clone(),
            format!("{} pairs • {} points", p.pairs.len(), p.points),
        ),
        ComponentBody::DragDrop(p) => (
            p.title.clone(),
            format!("{} items • {} points", p.items.len(), p.points),
        ),
        ComponentBody::FillInTheBlank(p) => (
            p.title.clone(),
            format!("{} blanks • {} points", p.blanks.len(), p.points),
        ),
        ComponentBody::CodeEditor(p) => (
            p.title.clone(),
            format!("{} • {} tests • {} points", p.language, p.test_cases.len(), p.points),
        ),
        ComponentBody::Flashcards(p) => {
            (p.title.clone(), format!("{} cards", p.cards.len()))
        }
        _ => return None,
    };
    Some(RenderView::EditorCard { title, detail })
}

fn quiz_view(props: &crate::domain::QuizProps, state: Option<&ComponentState>) -> QuizView {
    let fresh = crate::state::QuizState::new(props);
    let state = match state {
        Some(ComponentState::Quiz(s)) => s,
        _ => &fresh,
    };
    let question = props.questions.get(state.current_question).map(|q| {
        let options = q
            .options
            .iter()
            .map(|o| {
                let selected = state.selected_option.as_deref() == Some(o.id.as_str());
                let verdict = if !state.is_answered {
                    None
                } else if o.is_correct {
                    Some(true)
                } else if selected {
                    Some(false)
                } else {
                    None
                };
                QuizOptionView {
                    id: o.id.clone(),
                    text: o.text.clone(),
                    selected,
                    verdict,
                }
            })
            .collect();
        QuizQuestionView {
            question: q.question.clone(),
            options,
            explanation: if state.is_answered {
                q.explanation.clone()
            } else {
                None
            },
        }
    });
    QuizView {
        title: props.title.clone(),
        points: props.points,
        question_count: props.questions.len(),
        current_question: state.current_question,
        question,
        is_answered: state.is_answered,
        is_correct: state.is_correct,
        correct_count: state.correct_count,
        is_complete: state.is_complete,
    }
}

fn pairs_view(
    props: &crate::domain::MatchingPairsProps,
    state: Option<&ComponentState>,
) -> PairsView {
    let state = match state {
        Some(ComponentState::MatchingPairs(s)) => Some(s),
        _ => None,
    };

    let left = props
        .pairs
        .iter()
        .map(|pair| {
            let (selected, matched, verdict) = match state {
                Some(s) => {
                    let bound = s.matches.get(&pair.id);
                    (
                        s.selected_left.as_deref() == Some(pair.id.as_str()),
                        bound.is_some(),
                        if s.is_submitted {
                            bound.map(|right| right == &pair.id)
                        } else {
                            None
                        },
                    )
                }
                None => (false, false, None),
            };
            PairItemView {
                id: pair.id.clone(),
                text: pair.left.clone(),
                selected,
                matched,
                verdict,
            }
        })
        .collect();

    // The right column follows the persisted presentation order; with no
    // state yet it falls back to authored order.
    let right_ids: Vec<String> = match state {
        Some(s) => s.right_order.clone(),
        None => props.pairs.iter().map(|p| p.id.clone()).collect(),
    };
    let right = right_ids
        .iter()
        .filter_map(|id| props.pairs.iter().find(|p| &p.id == id))
        .map(|pair| {
            let (selected, bound_left) = match state {
                Some(s) => (
                    s.selected_right.as_deref() == Some(pair.id.as_str()),
                    s.matches
                        .iter()
                        .find(|(_, right)| *right == &pair.id)
                        .map(|(left, _)| left.clone()),
                ),
                None => (false, None),
            };
            let verdict = match (state, &bound_left) {
                (Some(s), Some(left)) if s.is_submitted => Some(left == &pair.id),
                _ => None,
            };
            PairItemView {
                id: pair.id.clone(),
                text: pair.right.clone(),
                selected,
                matched: bound_left.is_some(),
                verdict,
            }
        })
        .collect();

    PairsView {
        title: props.title.clone(),
        points: props.points,
        left,
        right,
        matched_count: state.map_or(0, |s| s.matches.len()),
        pair_count: props.pairs.len(),
        is_submitted: state.is_some_and(|s| s.is_submitted),
        is_correct: state.is_some_and(|s| s.is_correct),
    }
}

fn order_view(props: &crate::domain::DragDropProps, state: Option<&ComponentState>) -> OrderView {
    let state = match state {
        Some(ComponentState::DragDrop(s)) => Some(s),
        _ => None,
    };
    let order: Vec<String> = match state {
        Some(s) => s.order.clone(),
        None => {
            let mut items: Vec<_> = props.items.iter().collect();
            items.sort_by_key(|i| i.correct_index);
            items.into_iter().map(|i| i.id.clone()).collect()
        }
    };
    let flags = state.map(|s| s.position_flags(props));
    let items = order
        .iter()
        .enumerate()
        .filter_map(|(position, id)| {
            props.items.iter().find(|i| &i.id == id).map(|item| {
                let verdict = match (state, &flags) {
                    (Some(s), Some(flags)) if s.is_submitted => flags.get(position).copied(),
                    _ => None,
                };
                OrderItemView {
                    id: item.id.clone(),
                    text: item.text.clone(),
                    verdict,
                }
            })
        })
        .collect();
    OrderView {
        title: props.title.clone(),
        points: props.points,
        items,
        is_submitted: state.is_some_and(|s| s.is_submitted),
        is_correct: state.is_some_and(|s| s.is_correct),
    }
}

fn blanks_view(
    props: &crate::domain::FillInTheBlankProps,
    state: Option<&ComponentState>,
) -> BlanksView {
    let fresh = crate::state::BlanksState::new(props);
    let state = match state {
        Some(ComponentState::FillInTheBlank(s)) => s,
        _ => &fresh,
    };
    let mut segments = Vec::new();
    for (index, part) in props.text.split(BLANK_MARKER).enumerate() {
        if index > 0 {
            let blank_index = index - 1;
            if blank_index < props.blanks.len() {
                let verdict = if state.is_submitted {
                    state.results.get(blank_index).copied()
                } else {
                    None
                };
                segments.push(BlankSegment::Input {
                    index: blank_index,
                    value: state
                        .answers
                        .get(blank_index)
                        .cloned()
                        .unwrap_or_default(),
                    verdict,
                    expected: match verdict {
                        Some(false) => {
                            props.blanks.get(blank_index).map(|b| b.answer.clone())
                        }
                        _ => None,
                    },
                });
            }
        }
        if !part.is_empty() {
            segments.push(BlankSegment::Text {
                text: part.to_string(),
            });
        }
    }
    BlanksView {
        title: props.title.clone(),
        points: props.points,
        segments,
        is_submitted: state.is_submitted,
        is_correct: state.is_correct,
        correct_count: state.correct_count,
    }
}

fn code_view(props: &crate::domain::CodeEditorProps, state: Option<&ComponentState>) -> CodeView {
    let fresh = crate::state::CodeState::new(props);
    let state = match state {
        Some(ComponentState::CodeEditor(s)) => s,
        _ => &fresh,
    };
    let tests = props
        .test_cases
        .iter()
        .map(|t| TestView {
            id: t.id.clone(),
            passed: if state.is_submitted {
                state.test_results.get(&t.id).copied()
            } else {
                None
            },
        })
        .collect();
    CodeView {
        title: props.title.clone(),
        language: props.language.clone(),
        code: state.code.clone(),
        read_only: props.read_only,
        output: state.output.clone(),
        tests,
        is_submitted: state.is_submitted,
        is_correct: state.is_correct,
        points: props.points,
    }
}

fn cards_view(
    props: &crate::domain::FlashcardsProps,
    state: Option<&ComponentState>,
) -> CardsView {
    let fresh = crate::state::CardsState::new();
    let state = match state {
        Some(ComponentState::Flashcards(s)) => s,
        _ => &fresh,
    };
    let card = props.cards.get(state.current_card);
    CardsView {
        title: props.title.clone(),
        card_count: props.cards.len(),
        current_card: state.current_card,
        front: card.map(|c| c.front.clone()).unwrap_or_default(),
        back: card.map(|c| c.back.clone()).unwrap_or_default(),
        is_flipped: state.is_flipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Component;

    fn component(json: serde_json::Value) -> Component {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn unknown_kinds_render_a_placeholder() {
        let c = component(serde_json::json!({
            "id": "c1", "type": "vrScene", "props": { "world": "mars" }
        }));
        match render(&c, RenderMode::Play, None, None) {
            RenderView::Unsupported { kind } => assert_eq!(kind, "vrScene"),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn interactive_components_collapse_in_edit_mode() {
        let c = component(serde_json::json!({
            "id": "c1", "type": "quiz", "props": {
                "title": "Animals",
                "points": 15,
                "questions": [
                    { "id": "q1", "options": [] },
                    { "id": "q2", "options": [] }
                ]
            }
        }));
        match render(&c, RenderMode::Edit, None, None) {
            RenderView::EditorCard { title, detail } => {
                assert_eq!(title, "Animals");
                assert_eq!(detail, "2 questions • 15 points");
            }
            other => panic!("expected editor card, got {other:?}"),
        }
    }

    #[test]
    fn blank_text_splits_into_segments_around_markers() {
        let c = component(serde_json::json!({
            "id": "c1", "type": "fillInTheBlank", "props": {
                "text": "Roses are {{blank}} and violets are {{blank}}.",
                "blanks": [
                    { "id": "b1", "answer": "red" },
                    { "id": "b2", "answer": "blue" }
                ]
            }
        }));
        let RenderView::FillInTheBlank(view) = render(&c, RenderMode::Play, None, None) else {
            panic!("wrong view");
        };
        let inputs = view
            .segments
            .iter()
            .filter(|s| matches!(s, BlankSegment::Input { .. }))
            .count();
        assert_eq!(inputs, 2);
        assert!(matches!(
            &view.segments[0],
            BlankSegment::Text { text } if text == "Roses are "
        ));
    }

    #[test]
    fn score_board_reflects_the_score_context() {
        let c = component(serde_json::json!({
            "id": "c1", "type": "scoreBoard", "props": {}
        }));
        let context = ScoreContext {
            score: 30,
            total_possible: 60,
        };
        let RenderView::ScoreBoard(view) = render(&c, RenderMode::Play, None, Some(context))
        else {
            panic!("wrong view");
        };
        assert_eq!(view.score, 30);
        assert_eq!(view.percent, 50);
    }
}
