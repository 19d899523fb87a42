//! crates/lesson_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases
//! or code-execution sandboxes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Lesson;
use crate::state::ComponentsState;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    Validation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Records
//=========================================================================================

/// The persisted per-user-per-lesson interaction record: every component's
/// in-progress or completed state, plus the derived score columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub user_id: Uuid,
    pub lesson_id: String,
    pub components_state: ComponentsState,
    pub completed: bool,
    pub score: u32,
    pub total_possible: u32,
    pub last_updated: DateTime<Utc>,
}

/// A lesson opened for playback together with the caller's saved progress,
/// if any. A missing lesson is an error; missing progress is a fresh start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonWithInteraction {
    pub lesson: Lesson,
    pub interaction: Option<InteractionRecord>,
}

/// One row of a user's lesson list: interaction records joined to lesson
/// metadata, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub lesson_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub last_opened: DateTime<Utc>,
    pub score: u32,
    pub total_possible: u32,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait LessonStore: Send + Sync {
    async fn get_lesson(&self, lesson_id: &str) -> PortResult<Lesson>;

    /// Stores or replaces a lesson document wholesale.
    async fn put_lesson(&self, lesson: &Lesson) -> PortResult<()>;

    /// Loads a lesson and, when a user is given, that user's saved progress
    /// alongside it.
    async fn get_lesson_with_interaction(
        &self,
        lesson_id: &str,
        user_id: Option<Uuid>,
    ) -> PortResult<LessonWithInteraction>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// `Ok(None)` means the user has not interacted with this lesson yet,
    /// which is a fresh start, not an error.
    async fn get_interaction(
        &self,
        user_id: Uuid,
        lesson_id: &str,
    ) -> PortResult<Option<InteractionRecord>>;

    /// Last-write-wins upsert of the full record for `(user, lesson)`.
    async fn upsert_interaction(&self, record: &InteractionRecord) -> PortResult<()>;
}

#[async_trait]
pub trait UserLessonIndex: Send + Sync {
    async fn list_lessons_for_user(&self, user_id: Uuid) -> PortResult<Vec<LessonSummary>>;
}

//=========================================================================================
// Capability Ports
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("running {0} code is not supported here")]
    UnsupportedLanguage(String),
    #[error("execution failed: {0}")]
    Failed(String),
}

/// Executes learner code for the code-editor component. Sandboxing is the
/// implementor's concern; the state machine only compares output.
pub trait CodeRunner: Send + Sync {
    fn run(&self, language: &str, code: &str, input: &str) -> Result<String, RunnerError>;
}

/// The default runner: refuses every language, so code tests fail safely
/// instead of pretending to pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRunner;

impl CodeRunner for NoRunner {
    fn run(&self, language: &str, _code: &str, _input: &str) -> Result<String, RunnerError> {
        Err(RunnerError::UnsupportedLanguage(language.to_string()))
    }
}
