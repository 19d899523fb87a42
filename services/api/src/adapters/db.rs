//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the store ports from the `core` crate. It handles all
//! interactions with the PostgreSQL database using `sqlx`. Lesson documents
//! and interaction state maps are stored as JSONB, the document shapes being
//! owned by the core crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lesson_core::domain::Lesson;
use lesson_core::ports::{
    InteractionRecord, InteractionStore, LessonStore, LessonSummary, LessonWithInteraction,
    PortError, PortResult, UserLessonIndex,
};
use lesson_core::state::ComponentsState;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the lesson, interaction and listing
/// store ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct LessonRecord {
    id: String,
    doc: serde_json::Value,
}

impl LessonRecord {
    fn to_domain(self) -> PortResult<Lesson> {
        serde_json::from_value(self.doc).map_err(|e| {
            PortError::Unexpected(format!("stored lesson {} is corrupt: {}", self.id, e))
        })
    }
}

#[derive(FromRow)]
struct InteractionRow {
    user_id: Uuid,
    lesson_id: String,
    components_state: serde_json::Value,
    completed: bool,
    score: i32,
    total_possible: i32,
    last_updated: DateTime<Utc>,
}

impl InteractionRow {
    fn to_domain(self) -> PortResult<InteractionRecord> {
        let components_state: ComponentsState = serde_json::from_value(self.components_state)
            .map_err(|e| {
                PortError::Unexpected(format!(
                    "stored interaction for lesson {} is corrupt: {}",
                    self.lesson_id, e
                ))
            })?;
        Ok(InteractionRecord {
            user_id: self.user_id,
            lesson_id: self.lesson_id,
            components_state,
            completed: self.completed,
            score: self.score.max(0) as u32,
            total_possible: self.total_possible.max(0) as u32,
            last_updated: self.last_updated,
        })
    }
}

#[derive(FromRow)]
struct SummaryRow {
    lesson_id: String,
    title: Option<String>,
    description: Option<String>,
    completed: bool,
    last_updated: DateTime<Utc>,
    score: i32,
    total_possible: i32,
}

impl SummaryRow {
    fn to_domain(self) -> LessonSummary {
        LessonSummary {
            lesson_id: self.lesson_id,
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            description: self.description.unwrap_or_default(),
            completed: self.completed,
            last_opened: self.last_updated,
            score: self.score.max(0) as u32,
            total_possible: self.total_possible.max(0) as u32,
        }
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// Store Trait Implementations
//=========================================================================================

#[async_trait]
impl LessonStore for DbAdapter {
    async fn get_lesson(&self, lesson_id: &str) -> PortResult<Lesson> {
        let record = sqlx::query_as::<_, LessonRecord>(
            "SELECT id, doc FROM lessons WHERE id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or_else(|| PortError::NotFound(format!("Lesson {} not found", lesson_id)))?;
        record.to_domain()
    }

    async fn put_lesson(&self, lesson: &Lesson) -> PortResult<()> {
        let doc = serde_json::to_value(lesson)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        sqlx::query(
            "INSERT INTO lessons (id, title, description, doc, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id)
             DO UPDATE SET title = $2, description = $3, doc = $4, updated_at = $5",
        )
        .bind(&lesson.id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(doc)
        .bind(lesson.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_lesson_with_interaction(
        &self,
        lesson_id: &str,
        user_id: Option<Uuid>,
    ) -> PortResult<LessonWithInteraction> {
        let lesson = self.get_lesson(lesson_id).await?;
        let interaction = match user_id {
            Some(user_id) => self.get_interaction(user_id, lesson_id).await?,
            None => None,
        };
        Ok(LessonWithInteraction { lesson, interaction })
    }
}

#[async_trait]
impl InteractionStore for DbAdapter {
    async fn get_interaction(
        &self,
        user_id: Uuid,
        lesson_id: &str,
    ) -> PortResult<Option<InteractionRecord>> {
        let row = sqlx::query_as::<_, InteractionRow>(
            "SELECT user_id, lesson_id, components_state, completed, score, total_possible, last_updated
             FROM interactions WHERE user_id = $1 AND lesson_id = $2",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        // No record is a fresh start, not an error.
        row.map(InteractionRow::to_domain).transpose()
    }

    async fn upsert_interaction(&self, record: &InteractionRecord) -> PortResult<()> {
        let components_state = serde_json::to_value(&record.components_state)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        // Last write wins; there is one active writer per (user, lesson).
        sqlx::query(
            "INSERT INTO interactions
                 (user_id, lesson_id, components_state, completed, score, total_possible, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, now())
             ON CONFLICT (user_id, lesson_id)
             DO UPDATE SET components_state = $3, completed = $4, score = $5,
                           total_possible = $6, last_updated = now()",
        )
        .bind(record.user_id)
        .bind(&record.lesson_id)
        .bind(components_state)
        .bind(record.completed)
        .bind(record.score as i32)
        .bind(record.total_possible as i32)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }
}

#[async_trait]
impl UserLessonIndex for DbAdapter {
    async fn list_lessons_for_user(&self, user_id: Uuid) -> PortResult<Vec<LessonSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT i.lesson_id, l.title, l.description, i.completed,
                    i.last_updated, i.score, i.total_possible
             FROM interactions i
             LEFT JOIN lessons l ON l.id = i.lesson_id
             WHERE i.user_id = $1
             ORDER BY i.last_updated DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(rows.into_iter().map(SummaryRow::to_domain).collect())
    }
}
