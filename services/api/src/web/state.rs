//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use lesson_core::ports::{InteractionStore, LessonStore, UserLessonIndex};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. The three store handles usually point at the same database
/// adapter, but handlers only ever see the ports.
#[derive(Clone)]
pub struct AppState {
    pub lessons: Arc<dyn LessonStore>,
    pub interactions: Arc<dyn InteractionStore>,
    pub user_index: Arc<dyn UserLessonIndex>,
    pub config: Arc<Config>,
}
