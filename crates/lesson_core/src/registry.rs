//! crates/lesson_core/src/registry.rs
//!
//! The component definition registry: one static entry per component kind,
//! with the metadata the builder library shows (label, icon, category), the
//! editable property schema, and the default props a freshly placed
//! component starts with. Pure data — looked up, never mutated.

use crate::domain::{
    Blank, BulletListProps, CodeEditorProps, Component, ComponentBody, ComponentKind,
    DragDropProps, FillInTheBlankProps, Flashcard, FlashcardsProps, HeadingProps, HotspotProps,
    ImageProps, MatchingPair, MatchingPairsProps, OrderItem, ParagraphProps, QuizOption,
    QuizProps, QuizQuestion, ScoreBoardProps, TableProps, TestCase,
};

/// The editable property types the component editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    String,
    Number,
    Boolean,
    Select,
    RichText,
    Image,
    /// A nested list of sub-items (questions, pairs, cards, ...).
    ComponentArray,
}

/// Describes one editable property of a component kind.
#[derive(Debug, Clone, Copy)]
pub struct PropDef {
    pub name: &'static str,
    pub label: &'static str,
    pub prop_type: PropType,
    pub required: bool,
    pub options: &'static [&'static str],
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub placeholder: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl PropDef {
    const fn new(name: &'static str, label: &'static str, prop_type: PropType) -> Self {
        Self {
            name,
            label,
            prop_type,
            required: false,
            options: &[],
            min: None,
            max: None,
            step: None,
            placeholder: None,
            description: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }
}

/// Static metadata for one component kind.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDefinition {
    pub kind: ComponentKind,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub prop_definitions: &'static [PropDef],
}

impl ComponentDefinition {
    pub fn category(&self) -> crate::domain::Category {
        self.kind.category()
    }
}

const POINTS: PropDef = PropDef::new("points", "Points", PropType::Number).range(0.0, 100.0, 5.0);

static DEFINITIONS: [ComponentDefinition; 13] = [
    ComponentDefinition {
        kind: ComponentKind::Paragraph,
        label: "Paragraph",
        description: "A block of rich text",
        icon: "¶",
        prop_definitions: &[
            PropDef::new("content", "Content", PropType::RichText).required(),
            PropDef::new("align", "Alignment", PropType::Select)
                .options(&["left", "center", "right", "justify"]),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Heading,
        label: "Heading",
        description: "A section or slide title",
        icon: "H",
        prop_definitions: &[
            PropDef::new("content", "Text", PropType::String).required(),
            PropDef::new("level", "Level", PropType::Number).range(1.0, 6.0, 1.0),
            PropDef::new("align", "Alignment", PropType::Select)
                .options(&["left", "center", "right"]),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::BulletList,
        label: "Bullet List",
        description: "An ordered or unordered list",
        icon: "•",
        prop_definitions: &[
            PropDef::new("items", "Items", PropType::ComponentArray).required(),
            PropDef::new("type", "List style", PropType::Select).options(&["unordered", "ordered"]),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Image,
        label: "Image",
        description: "A picture with an optional caption",
        icon: "🖼",
        prop_definitions: &[
            PropDef::new("src", "Source", PropType::Image).required(),
            PropDef::new("alt", "Alt text", PropType::String).required(),
            PropDef::new("caption", "Caption", PropType::String),
            PropDef::new("width", "Width", PropType::String),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Table,
        label: "Table",
        description: "A simple grid of text cells",
        icon: "▦",
        prop_definitions: &[
            PropDef::new("rows", "Rows", PropType::Number).range(1.0, 10.0, 1.0),
            PropDef::new("columns", "Columns", PropType::Number).range(1.0, 10.0, 1.0),
            PropDef::new("data", "Cells", PropType::ComponentArray),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Quiz,
        label: "Quiz",
        description: "Multiple-choice questions with points",
        icon: "?",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("questions", "Questions", PropType::ComponentArray).required(),
            POINTS,
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::MatchingPairs,
        label: "Matching Pairs",
        description: "Match items from two columns",
        icon: "⇄",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("pairs", "Pairs", PropType::ComponentArray).required(),
            PropDef::new("shuffled", "Shuffle items", PropType::Boolean),
            POINTS,
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::DragDrop,
        label: "Drag & Drop Order",
        description: "Arrange items in the correct order",
        icon: "⇅",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("items", "Items", PropType::ComponentArray).required(),
            PropDef::new("shuffled", "Shuffle items", PropType::Boolean),
            POINTS,
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::FillInTheBlank,
        label: "Fill in the Blank",
        description: "Complete the text by typing the missing words",
        icon: "_",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("text", "Text", PropType::RichText).required(),
            PropDef::new("blanks", "Blanks", PropType::ComponentArray).required(),
            PropDef::new("caseSensitive", "Case sensitive", PropType::Boolean),
            POINTS,
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::CodeEditor,
        label: "Code Editor",
        description: "Write code and run it against test cases",
        icon: "</>",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("initialCode", "Starter code", PropType::String),
            PropDef::new("language", "Language", PropType::Select)
                .options(&["javascript", "python"]),
            PropDef::new("readOnly", "Read only", PropType::Boolean),
            PropDef::new("testCases", "Test cases", PropType::ComponentArray),
            POINTS,
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Flashcards,
        label: "Flashcards",
        description: "Flip cards to reveal their backs",
        icon: "🃏",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("cards", "Cards", PropType::ComponentArray).required(),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::Hotspot,
        label: "Hotspot",
        description: "Labelled points of interest on an image",
        icon: "◎",
        prop_definitions: &[
            PropDef::new("image", "Image", PropType::Image).required(),
            PropDef::new("hotspots", "Hotspots", PropType::ComponentArray),
        ],
    },
    ComponentDefinition {
        kind: ComponentKind::ScoreBoard,
        label: "Score Board",
        description: "Shows the learner's score so far",
        icon: "★",
        prop_definitions: &[
            PropDef::new("title", "Title", PropType::String),
            PropDef::new("showTotal", "Show total", PropType::Boolean),
            PropDef::new("showPercentage", "Show percentage", PropType::Boolean),
            PropDef::new("animation", "Animate", PropType::Boolean),
        ],
    },
];

/// Every registered definition, in library order.
pub fn definitions() -> &'static [ComponentDefinition] {
    &DEFINITIONS
}

/// Resolves a type tag to its definition. Unknown tags return `None`; the
/// renderer falls back to a placeholder rather than failing.
pub fn lookup(tag: &str) -> Option<&'static ComponentDefinition> {
    let kind = ComponentKind::from_tag(tag)?;
    DEFINITIONS.iter().find(|d| d.kind == kind)
}

/// The props a freshly placed component starts with: small, friendly sample
/// content the author immediately sees working.
pub fn default_body(kind: ComponentKind) -> ComponentBody {
    match kind {
        ComponentKind::Paragraph => ComponentBody::Paragraph(ParagraphProps {
            content: "Write something here...".into(),
            align: None,
        }),
        ComponentKind::Heading => ComponentBody::Heading(HeadingProps {
            content: "New heading".into(),
            level: 2,
            align: None,
        }),
        ComponentKind::BulletList => ComponentBody::BulletList(BulletListProps {
            items: vec!["First point".into(), "Second point".into()],
            list_type: None,
        }),
        ComponentKind::Image => ComponentBody::Image(ImageProps {
            src: String::new(),
            alt: "Describe the image".into(),
            caption: None,
            width: None,
        }),
        ComponentKind::Table => ComponentBody::Table(TableProps {
            rows: 2,
            columns: 2,
            data: vec![
                vec![String::new(), String::new()],
                vec![String::new(), String::new()],
            ],
        }),
        ComponentKind::Quiz => ComponentBody::Quiz(QuizProps {
            title: "Quiz".into(),
            questions: vec![QuizQuestion {
                id: "q1".into(),
                question: "What is 2 + 2?".into(),
                options: vec![
                    QuizOption {
                        id: "a".into(),
                        text: "3".into(),
                        is_correct: false,
                    },
                    QuizOption {
                        id: "b".into(),
                        text: "4".into(),
                        is_correct: true,
                    },
                ],
                explanation: None,
            }],
            points: 15,
        }),
        ComponentKind::MatchingPairs => ComponentBody::MatchingPairs(MatchingPairsProps {
            title: "Match the items".into(),
            pairs: vec![
                MatchingPair {
                    id: "p1".into(),
                    left: "Cat".into(),
                    right: "Kitten".into(),
                },
                MatchingPair {
                    id: "p2".into(),
                    left: "Dog".into(),
                    right: "Puppy".into(),
                },
            ],
            shuffled: true,
            points: 15,
        }),
        ComponentKind::DragDrop => ComponentBody::DragDrop(DragDropProps {
            title: "Arrange in the correct order".into(),
            items: vec![
                OrderItem {
                    id: "i1".into(),
                    text: "First".into(),
                    correct_index: 0,
                },
                OrderItem {
                    id: "i2".into(),
                    text: "Second".into(),
                    correct_index: 1,
                },
                OrderItem {
                    id: "i3".into(),
                    text: "Third".into(),
                    correct_index: 2,
                },
            ],
            shuffled: true,
            points: 15,
        }),
        ComponentKind::FillInTheBlank => ComponentBody::FillInTheBlank(FillInTheBlankProps {
            title: "Fill in the blanks".into(),
            text: "The sky is {{blank}}.".into(),
            blanks: vec![Blank {
                id: "b1".into(),
                answer: "blue".into(),
                alternatives: vec![],
            }],
            case_sensitive: false,
            points: 10,
        }),
        ComponentKind::CodeEditor => ComponentBody::CodeEditor(CodeEditorProps {
            title: "Code Editor".into(),
            initial_code: "// Write your code here\n".into(),
            language: "javascript".into(),
            read_only: false,
            test_cases: vec![TestCase {
                id: "t1".into(),
                input: String::new(),
                expected_output: String::new(),
            }],
            points: 10,
        }),
        ComponentKind::Flashcards => ComponentBody::Flashcards(FlashcardsProps {
            title: "Flashcards".into(),
            cards: vec![Flashcard {
                id: "c1".into(),
                front: "Front of the card".into(),
                back: "Back of the card".into(),
            }],
        }),
        ComponentKind::Hotspot => ComponentBody::Hotspot(HotspotProps {
            image: String::new(),
            hotspots: vec![],
        }),
        ComponentKind::ScoreBoard => ComponentBody::ScoreBoard(ScoreBoardProps {
            title: "Your Score".into(),
            show_total: true,
            show_percentage: true,
            animation: true,
        }),
    }
}

/// Builds a new component of the given kind with registry defaults.
pub fn new_component(kind: ComponentKind, id: impl Into<String>) -> Component {
    Component {
        id: id.into(),
        body: default_body(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_exactly_one_definition() {
        for kind in ComponentKind::ALL {
            let hits = DEFINITIONS.iter().filter(|d| d.kind == kind).count();
            assert_eq!(hits, 1, "{:?}", kind);
        }
        assert_eq!(DEFINITIONS.len(), ComponentKind::ALL.len());
    }

    #[test]
    fn lookup_resolves_tags_and_aliases() {
        assert_eq!(lookup("quiz").unwrap().kind, ComponentKind::Quiz);
        assert_eq!(lookup("slideTitle").unwrap().kind, ComponentKind::Heading);
        assert!(lookup("holodeck").is_none());
    }

    #[test]
    fn default_bodies_match_their_kind() {
        for kind in ComponentKind::ALL {
            assert_eq!(default_body(kind).kind(), Some(kind));
        }
    }

    #[test]
    fn default_bodies_survive_the_wire_format() {
        for kind in ComponentKind::ALL {
            let component = new_component(kind, "c1");
            let json = serde_json::to_string(&component).unwrap();
            let back: Component = serde_json::from_str(&json).unwrap();
            assert_eq!(back, component, "{:?}", kind);
        }
    }
}
