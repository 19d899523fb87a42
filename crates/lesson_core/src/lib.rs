pub mod authoring;
pub mod domain;
pub mod feedback;
pub mod import;
pub mod ports;
pub mod registry;
pub mod render;
pub mod rng;
pub mod score;
pub mod session;
pub mod state;

pub use authoring::{AuthoringError, LessonMetadata};
pub use domain::{Component, ComponentBody, ComponentKind, Lesson, Slide, ValidationError};
pub use feedback::{FeedbackKind, FeedbackSink, NoopFeedback};
pub use import::{export_lesson, import_lesson, ImportError};
pub use ports::{
    CodeRunner, InteractionRecord, InteractionStore, LessonStore, LessonSummary,
    LessonWithInteraction, NoRunner, PortError, PortResult, RunnerError, UserLessonIndex,
};
pub use render::{render, RenderMode, RenderView};
pub use score::ScoreContext;
pub use session::PlaybackSession;
pub use state::{Action, ComponentState, ComponentsState, DispatchError, Outcome};
