//! crates/lesson_core/src/domain.rs
//!
//! Defines the pure, core data structures for a lesson document.
//! These structs are independent of any database or transport; the serde
//! impls exist because the lesson JSON document is itself the interchange
//! format authors exchange.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A top-level authored document: an ordered sequence of slides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub level: String,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    pub slides: Vec<Slide>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// One screen of a lesson: an ordered sequence of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub components: Vec<Component>,
}

/// A typed, configurable content or interactive unit placed on a slide.
///
/// Serializes as `{ "id": ..., "type": ..., "props": {...} }`. Unknown type
/// tags round-trip through [`ComponentBody::Unknown`] instead of failing, so
/// a document authored by a newer tool still loads and renders a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub body: ComponentBody,
}

/// The closed set of component type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Paragraph,
    Heading,
    BulletList,
    Image,
    Table,
    Quiz,
    MatchingPairs,
    DragDrop,
    FillInTheBlank,
    CodeEditor,
    Flashcards,
    Hotspot,
    ScoreBoard,
}

/// Library grouping for a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Content,
    Interactive,
    Gamified,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 13] = [
        ComponentKind::Paragraph,
        ComponentKind::Heading,
        ComponentKind::BulletList,
        ComponentKind::Image,
        ComponentKind::Table,
        ComponentKind::Quiz,
        ComponentKind::MatchingPairs,
        ComponentKind::DragDrop,
        ComponentKind::FillInTheBlank,
        ComponentKind::CodeEditor,
        ComponentKind::Flashcards,
        ComponentKind::Hotspot,
        ComponentKind::ScoreBoard,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ComponentKind::Paragraph => "paragraph",
            ComponentKind::Heading => "heading",
            ComponentKind::BulletList => "bulletList",
            ComponentKind::Image => "image",
            ComponentKind::Table => "table",
            ComponentKind::Quiz => "quiz",
            ComponentKind::MatchingPairs => "matchingPairs",
            ComponentKind::DragDrop => "dragDrop",
            ComponentKind::FillInTheBlank => "fillInTheBlank",
            ComponentKind::CodeEditor => "codeEditor",
            ComponentKind::Flashcards => "flashcards",
            ComponentKind::Hotspot => "hotspot",
            ComponentKind::ScoreBoard => "scoreBoard",
        }
    }

    /// Resolves a type tag, including the legacy `slideTitle` alias.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "paragraph" => Some(ComponentKind::Paragraph),
            "heading" => Some(ComponentKind::Heading),
            // Old documents used a dedicated slideTitle component.
            "slideTitle" => Some(ComponentKind::Heading),
            "bulletList" => Some(ComponentKind::BulletList),
            "image" => Some(ComponentKind::Image),
            "table" => Some(ComponentKind::Table),
            "quiz" => Some(ComponentKind::Quiz),
            "matchingPairs" => Some(ComponentKind::MatchingPairs),
            "dragDrop" => Some(ComponentKind::DragDrop),
            "fillInTheBlank" => Some(ComponentKind::FillInTheBlank),
            "codeEditor" => Some(ComponentKind::CodeEditor),
            "flashcards" => Some(ComponentKind::Flashcards),
            "hotspot" => Some(ComponentKind::Hotspot),
            "scoreBoard" => Some(ComponentKind::ScoreBoard),
            _ => None,
        }
    }

    pub fn category(self) -> Category {
        match self {
            ComponentKind::Paragraph
            | ComponentKind::Heading
            | ComponentKind::BulletList
            | ComponentKind::Image
            | ComponentKind::Table => Category::Content,
            ComponentKind::Flashcards | ComponentKind::Hotspot => Category::Interactive,
            ComponentKind::Quiz
            | ComponentKind::MatchingPairs
            | ComponentKind::DragDrop
            | ComponentKind::FillInTheBlank
            | ComponentKind::CodeEditor
            | ComponentKind::ScoreBoard => Category::Gamified,
        }
    }

    /// Whether this kind can award points toward the lesson score.
    /// The score board sits in the gamified library category but only
    /// displays the aggregate; it never awards.
    pub fn is_gamified(self) -> bool {
        matches!(
            self,
            ComponentKind::Quiz
                | ComponentKind::MatchingPairs
                | ComponentKind::DragDrop
                | ComponentKind::FillInTheBlank
                | ComponentKind::CodeEditor
        )
    }
}

/// The typed payload of a component, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentBody {
    Paragraph(ParagraphProps),
    Heading(HeadingProps),
    BulletList(BulletListProps),
    Image(ImageProps),
    Table(TableProps),
    Quiz(QuizProps),
    MatchingPairs(MatchingPairsProps),
    DragDrop(DragDropProps),
    FillInTheBlank(FillInTheBlankProps),
    CodeEditor(CodeEditorProps),
    Flashcards(FlashcardsProps),
    Hotspot(HotspotProps),
    ScoreBoard(ScoreBoardProps),
    /// A type tag this build does not know. Kept verbatim so re-export does
    /// not lose data; rendered as a placeholder.
    Unknown {
        kind: String,
        props: serde_json::Value,
    },
}

impl ComponentBody {
    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            ComponentBody::Paragraph(_) => Some(ComponentKind::Paragraph),
            ComponentBody::Heading(_) => Some(ComponentKind::Heading),
            ComponentBody::BulletList(_) => Some(ComponentKind::BulletList),
            ComponentBody::Image(_) => Some(ComponentKind::Image),
            ComponentBody::Table(_) => Some(ComponentKind::Table),
            ComponentBody::Quiz(_) => Some(ComponentKind::Quiz),
            ComponentBody::MatchingPairs(_) => Some(ComponentKind::MatchingPairs),
            ComponentBody::DragDrop(_) => Some(ComponentKind::DragDrop),
            ComponentBody::FillInTheBlank(_) => Some(ComponentKind::FillInTheBlank),
            ComponentBody::CodeEditor(_) => Some(ComponentKind::CodeEditor),
            ComponentBody::Flashcards(_) => Some(ComponentKind::Flashcards),
            ComponentBody::Hotspot(_) => Some(ComponentKind::Hotspot),
            ComponentBody::ScoreBoard(_) => Some(ComponentKind::ScoreBoard),
            ComponentBody::Unknown { .. } => None,
        }
    }

    /// The wire type tag, including unknown tags preserved from input.
    pub fn tag(&self) -> &str {
        match self {
            ComponentBody::Unknown { kind, .. } => kind,
            other => other.kind().expect("known variant").tag(),
        }
    }

    pub fn is_gamified(&self) -> bool {
        self.kind().map_or(false, ComponentKind::is_gamified)
    }

    /// How many points this component can contribute to the lesson total.
    /// Each quiz question is independently scorable, so a quiz contributes
    /// its points once per question.
    pub fn points_possible(&self) -> u32 {
        match self {
            ComponentBody::Quiz(p) => p.points * p.questions.len() as u32,
            ComponentBody::MatchingPairs(p) => p.points,
            ComponentBody::DragDrop(p) => p.points,
            ComponentBody::FillInTheBlank(p) => p.points,
            ComponentBody::CodeEditor(p) => p.points,
            _ => 0,
        }
    }

    fn from_parts(tag: &str, props: serde_json::Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;
        let body = match ComponentKind::from_tag(tag) {
            Some(ComponentKind::Paragraph) => ComponentBody::Paragraph(from_value(props)?),
            Some(ComponentKind::Heading) => ComponentBody::Heading(from_value(props)?),
            Some(ComponentKind::BulletList) => ComponentBody::BulletList(from_value(props)?),
            Some(ComponentKind::Image) => ComponentBody::Image(from_value(props)?),
            Some(ComponentKind::Table) => ComponentBody::Table(from_value(props)?),
            Some(ComponentKind::Quiz) => ComponentBody::Quiz(from_value(props)?),
            Some(ComponentKind::MatchingPairs) => ComponentBody::MatchingPairs(from_value(props)?),
            Some(ComponentKind::DragDrop) => ComponentBody::DragDrop(from_value(props)?),
            Some(ComponentKind::FillInTheBlank) => {
                ComponentBody::FillInTheBlank(from_value(props)?)
            }
            Some(ComponentKind::CodeEditor) => ComponentBody::CodeEditor(from_value(props)?),
            Some(ComponentKind::Flashcards) => ComponentBody::Flashcards(from_value(props)?),
            Some(ComponentKind::Hotspot) => ComponentBody::Hotspot(from_value(props)?),
            Some(ComponentKind::ScoreBoard) => ComponentBody::ScoreBoard(from_value(props)?),
            None => ComponentBody::Unknown {
                kind: tag.to_string(),
                props,
            },
        };
        Ok(body)
    }

    fn props_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        use serde_json::to_value;
        match self {
            ComponentBody::Paragraph(p) => to_value(p),
            ComponentBody::Heading(p) => to_value(p),
            ComponentBody::BulletList(p) => to_value(p),
            ComponentBody::Image(p) => to_value(p),
            ComponentBody::Table(p) => to_value(p),
            ComponentBody::Quiz(p) => to_value(p),
            ComponentBody::MatchingPairs(p) => to_value(p),
            ComponentBody::DragDrop(p) => to_value(p),
            ComponentBody::FillInTheBlank(p) => to_value(p),
            ComponentBody::CodeEditor(p) => to_value(p),
            ComponentBody::Flashcards(p) => to_value(p),
            ComponentBody::Hotspot(p) => to_value(p),
            ComponentBody::ScoreBoard(p) => to_value(p),
            ComponentBody::Unknown { props, .. } => Ok(props.clone()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    props: serde_json::Value,
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let props = self.body.props_value().map_err(serde::ser::Error::custom)?;
        RawComponent {
            id: self.id.clone(),
            kind: self.body.tag().to_string(),
            props,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawComponent::deserialize(deserializer)?;
        let body = ComponentBody::from_parts(&raw.kind, raw.props).map_err(D::Error::custom)?;
        Ok(Component { id: raw.id, body })
    }
}

//=========================================================================================
// Per-kind props
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProps {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingProps {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_heading_level")]
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletListProps {
    #[serde(default)]
    pub items: Vec<String>,
    /// "ordered" or "unordered".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProps {
    #[serde(default = "default_table_dim")]
    pub rows: u32,
    #[serde(default = "default_table_dim")]
    pub columns: u32,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

fn default_table_dim() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizProps {
    #[serde(default = "default_quiz_title")]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(default = "default_points_15")]
    pub points: u32,
}

fn default_quiz_title() -> String {
    "Quiz".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPairsProps {
    #[serde(default = "default_matching_title")]
    pub title: String,
    #[serde(default)]
    pub pairs: Vec<MatchingPair>,
    #[serde(default = "default_true")]
    pub shuffled: bool,
    #[serde(default = "default_points_15")]
    pub points: u32,
}

fn default_matching_title() -> String {
    "Match the items".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPair {
    pub id: String,
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragDropProps {
    #[serde(default = "default_drag_drop_title")]
    pub title: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default = "default_true")]
    pub shuffled: bool,
    #[serde(default = "default_points_15")]
    pub points: u32,
}

fn default_drag_drop_title() -> String {
    "Arrange in the correct order".to_string()
}

/// An orderable item; `correct_index` is its position in the answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInTheBlankProps {
    #[serde(default = "default_blank_title")]
    pub title: String,
    /// Free text with one `{{blank}}` marker per entry in `blanks`.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub blanks: Vec<Blank>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_points_10")]
    pub points: u32,
}

fn default_blank_title() -> String {
    "Fill in the blanks".to_string()
}

/// The literal marker that stands for one blank inside
/// [`FillInTheBlankProps::text`].
pub const BLANK_MARKER: &str = "{{blank}}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    pub id: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEditorProps {
    #[serde(default = "default_code_title")]
    pub title: String,
    #[serde(default)]
    pub initial_code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default = "default_points_10")]
    pub points: u32,
}

fn default_code_title() -> String {
    "Code Editor".to_string()
}

fn default_language() -> String {
    "javascript".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardsProps {
    #[serde(default = "default_flashcards_title")]
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
}

fn default_flashcards_title() -> String {
    "Flashcards".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotProps {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub hotspots: Vec<HotspotRegion>,
}

/// A labelled point on the hotspot image; `x`/`y` are fractions of the
/// rendered image size in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRegion {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBoardProps {
    #[serde(default = "default_score_board_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub show_total: bool,
    #[serde(default = "default_true")]
    pub show_percentage: bool,
    #[serde(default = "default_true")]
    pub animation: bool,
}

fn default_score_board_title() -> String {
    "Your Score".to_string()
}

fn default_true() -> bool {
    true
}

fn default_points_15() -> u32 {
    15
}

fn default_points_10() -> u32 {
    10
}

//=========================================================================================
// Document invariants
//=========================================================================================

/// A structural problem with a lesson document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a lesson must have at least one slide")]
    NoSlides,
    #[error("component id '{0}' appears more than once in the lesson")]
    DuplicateComponentId(String),
}

impl Lesson {
    /// Checks the document invariants: at least one slide, and component ids
    /// unique across the whole lesson (interaction state is keyed by
    /// component id with no slide disambiguation).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slides.is_empty() {
            return Err(ValidationError::NoSlides);
        }
        let mut seen = std::collections::HashSet::new();
        for component in self.components() {
            if !seen.insert(component.id.as_str()) {
                return Err(ValidationError::DuplicateComponentId(component.id.clone()));
            }
        }
        Ok(())
    }

    /// All components across all slides, in playback order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.slides.iter().flat_map(|s| s.components.iter())
    }

    pub fn find_component(&self, component_id: &str) -> Option<&Component> {
        self.components().find(|c| c.id == component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component_json(kind: &str, props: serde_json::Value) -> String {
        serde_json::json!({ "id": "c1", "type": kind, "props": props }).to_string()
    }

    #[test]
    fn quiz_component_round_trips() {
        let json = component_json(
            "quiz",
            serde_json::json!({
                "title": "Animals",
                "questions": [{
                    "id": "q1",
                    "question": "Which one flies?",
                    "options": [
                        { "id": "a", "text": "Dog", "isCorrect": false },
                        { "id": "b", "text": "Owl", "isCorrect": true }
                    ]
                }],
                "points": 20
            }),
        );

        let component: Component = serde_json::from_str(&json).unwrap();
        match &component.body {
            ComponentBody::Quiz(props) => {
                assert_eq!(props.points, 20);
                assert_eq!(props.questions[0].options[1].id, "b");
                assert!(props.questions[0].options[1].is_correct);
            }
            other => panic!("expected quiz, got {:?}", other.tag()),
        }

        let back = serde_json::to_value(&component).unwrap();
        assert_eq!(back["type"], "quiz");
        assert_eq!(back["props"]["questions"][0]["options"][1]["isCorrect"], true);
    }

    #[test]
    fn unknown_kind_is_preserved_not_rejected() {
        let json = component_json("threeDModel", serde_json::json!({ "mesh": "cube.glb" }));
        let component: Component = serde_json::from_str(&json).unwrap();

        assert_eq!(component.body.tag(), "threeDModel");
        assert!(component.body.kind().is_none());
        assert_eq!(component.body.points_possible(), 0);

        // Re-export keeps the foreign payload intact.
        let back = serde_json::to_value(&component).unwrap();
        assert_eq!(back["type"], "threeDModel");
        assert_eq!(back["props"]["mesh"], "cube.glb");
    }

    #[test]
    fn slide_title_alias_maps_to_heading() {
        let json = component_json("slideTitle", serde_json::json!({ "content": "Welcome" }));
        let component: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(component.body.kind(), Some(ComponentKind::Heading));
    }

    #[test]
    fn quiz_total_counts_each_question() {
        let json = component_json(
            "quiz",
            serde_json::json!({
                "points": 10,
                "questions": [
                    { "id": "q1", "options": [] },
                    { "id": "q2", "options": [] },
                    { "id": "q3", "options": [] }
                ]
            }),
        );
        let component: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(component.body.points_possible(), 30);
    }

    #[test]
    fn duplicate_component_ids_fail_validation() {
        let lesson: Lesson = serde_json::from_value(serde_json::json!({
            "id": "l1",
            "title": "T",
            "slides": [
                { "id": "s1", "title": "One", "components": [
                    { "id": "c1", "type": "paragraph", "props": {} }
                ]},
                { "id": "s2", "title": "Two", "components": [
                    { "id": "c1", "type": "heading", "props": {} }
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(
            lesson.validate(),
            Err(ValidationError::DuplicateComponentId("c1".to_string()))
        );
    }
}
