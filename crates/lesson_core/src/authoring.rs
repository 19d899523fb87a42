//! crates/lesson_core/src/authoring.rs
//!
//! Builder-side mutations of a lesson document: slide management, component
//! placement and reordering, and the fill-in-the-blank text/blanks sync.
//! Every mutation keeps the document invariants intact and stamps
//! `updated_at`; a mutation that would break an invariant fails without
//! touching the lesson.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Blank, Component, ComponentBody, ComponentKind, Lesson, Slide, BLANK_MARKER};
use crate::registry;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("a lesson must keep at least one slide")]
    LastSlide,
    #[error("no slide at index {0}")]
    SlideOutOfRange(usize),
    #[error("no component at position {0}")]
    PositionOutOfRange(usize),
    #[error("no component '{0}' in this lesson")]
    ComponentNotFound(String),
    #[error("component id '{0}' is already taken")]
    DuplicateComponentId(String),
    #[error("component '{0}' is not a fill-in-the-blank")]
    NotFillInTheBlank(String),
}

/// Metadata fields an author can change without touching the slides.
#[derive(Debug, Clone, Default)]
pub struct LessonMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub level: Option<String>,
    pub duration: Option<u32>,
    pub theme_id: Option<Option<String>>,
}

impl Lesson {
    /// Appends a new, empty slide and returns its index.
    pub fn add_slide(&mut self) -> usize {
        let slide = Slide {
            id: format!("slide-{}", Uuid::new_v4()),
            title: format!("Slide {}", self.slides.len() + 1),
            components: Vec::new(),
        };
        self.slides.push(slide);
        self.touch();
        self.slides.len() - 1
    }

    /// Removes a slide. Refused when it would leave the lesson empty.
    pub fn remove_slide(&mut self, index: usize) -> Result<Slide, AuthoringError> {
        if index >= self.slides.len() {
            return Err(AuthoringError::SlideOutOfRange(index));
        }
        if self.slides.len() == 1 {
            return Err(AuthoringError::LastSlide);
        }
        let removed = self.slides.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Moves a slide to a new position, shifting the ones between.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<(), AuthoringError> {
        if from >= self.slides.len() {
            return Err(AuthoringError::SlideOutOfRange(from));
        }
        if to >= self.slides.len() {
            return Err(AuthoringError::SlideOutOfRange(to));
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        self.touch();
        Ok(())
    }

    pub fn rename_slide(&mut self, index: usize, title: String) -> Result<(), AuthoringError> {
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(AuthoringError::SlideOutOfRange(index))?;
        slide.title = title;
        self.touch();
        Ok(())
    }

    pub fn update_metadata(&mut self, metadata: LessonMetadata) {
        if let Some(title) = metadata.title {
            self.title = title;
        }
        if let Some(description) = metadata.description {
            self.description = description;
        }
        if let Some(author) = metadata.author {
            self.author = author;
        }
        if let Some(level) = metadata.level {
            self.level = level;
        }
        if let Some(duration) = metadata.duration {
            self.duration = duration;
        }
        if let Some(theme_id) = metadata.theme_id {
            self.theme_id = theme_id;
        }
        self.touch();
    }

    /// Places a new component with registry defaults at the end of a slide
    /// and returns its id.
    pub fn add_component(
        &mut self,
        slide_index: usize,
        kind: ComponentKind,
    ) -> Result<String, AuthoringError> {
        if slide_index >= self.slides.len() {
            return Err(AuthoringError::SlideOutOfRange(slide_index));
        }
        let id = format!("{}-{}", kind.tag(), Uuid::new_v4());
        let component = registry::new_component(kind, id.clone());
        self.slides[slide_index].components.push(component);
        self.touch();
        Ok(id)
    }

    /// Inserts an existing component at a position. The id must be free.
    pub fn insert_component(
        &mut self,
        slide_index: usize,
        position: usize,
        component: Component,
    ) -> Result<(), AuthoringError> {
        if self.find_component(&component.id).is_some() {
            return Err(AuthoringError::DuplicateComponentId(component.id));
        }
        let slide = self
            .slides
            .get_mut(slide_index)
            .ok_or(AuthoringError::SlideOutOfRange(slide_index))?;
        let position = position.min(slide.components.len());
        slide.components.insert(position, component);
        self.touch();
        Ok(())
    }

    /// Replaces a component's props wholesale. Props are never patched
    /// field-by-field; the editor hands back the full new payload.
    pub fn replace_component_props(
        &mut self,
        component_id: &str,
        body: ComponentBody,
    ) -> Result<(), AuthoringError> {
        let component = self
            .component_mut(component_id)
            .ok_or_else(|| AuthoringError::ComponentNotFound(component_id.to_string()))?;
        component.body = body;
        self.touch();
        Ok(())
    }

    pub fn remove_component(&mut self, component_id: &str) -> Result<Component, AuthoringError> {
        let found = self.slides.iter().enumerate().find_map(|(slide_index, slide)| {
            slide
                .components
                .iter()
                .position(|c| c.id == component_id)
                .map(|position| (slide_index, position))
        });
        let (slide_index, position) =
            found.ok_or_else(|| AuthoringError::ComponentNotFound(component_id.to_string()))?;
        let removed = self.slides[slide_index].components.remove(position);
        self.touch();
        Ok(removed)
    }

    /// Reorders a component within its slide.
    pub fn move_component(
        &mut self,
        slide_index: usize,
        from: usize,
        to: usize,
    ) -> Result<(), AuthoringError> {
        let slide = self
            .slides
            .get_mut(slide_index)
            .ok_or(AuthoringError::SlideOutOfRange(slide_index))?;
        if from >= slide.components.len() {
            return Err(AuthoringError::PositionOutOfRange(from));
        }
        if to >= slide.components.len() {
            return Err(AuthoringError::PositionOutOfRange(to));
        }
        let component = slide.components.remove(from);
        slide.components.insert(to, component);
        self.touch();
        Ok(())
    }

    /// Moves a component to (the end of) another slide.
    pub fn move_component_to_slide(
        &mut self,
        component_id: &str,
        target_slide: usize,
    ) -> Result<(), AuthoringError> {
        if target_slide >= self.slides.len() {
            return Err(AuthoringError::SlideOutOfRange(target_slide));
        }
        let component = self.remove_component(component_id)?;
        self.slides[target_slide].components.push(component);
        self.touch();
        Ok(())
    }

    /// Re-syncs a fill-in-the-blank component's blanks list with the blank
    /// markers in a new text: one blank per marker, keeping already-entered
    /// answers by position, growing with fresh empty blanks, shrinking from
    /// the tail.
    pub fn sync_blanks(
        &mut self,
        component_id: &str,
        new_text: String,
    ) -> Result<(), AuthoringError> {
        let component = self
            .component_mut(component_id)
            .ok_or_else(|| AuthoringError::ComponentNotFound(component_id.to_string()))?;
        let ComponentBody::FillInTheBlank(props) = &mut component.body else {
            return Err(AuthoringError::NotFillInTheBlank(component_id.to_string()));
        };

        let marker_count = new_text.matches(BLANK_MARKER).count();
        props.text = new_text;
        while props.blanks.len() < marker_count {
            props.blanks.push(Blank {
                id: format!("blank-{}", Uuid::new_v4()),
                answer: String::new(),
                alternatives: Vec::new(),
            });
        }
        props.blanks.truncate(marker_count);
        self.touch();
        Ok(())
    }

    fn component_mut(&mut self, component_id: &str) -> Option<&mut Component> {
        self.slides
            .iter_mut()
            .flat_map(|s| s.components.iter_mut())
            .find(|c| c.id == component_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
