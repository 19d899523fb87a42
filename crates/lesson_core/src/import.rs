//! crates/lesson_core/src/import.rs
//!
//! Lesson file import and export.
//!
//! The interchange format is the lesson JSON shape itself. Import walks the
//! raw document first so a rejection can name exactly which slide or
//! component is missing which required field, then parses and checks the
//! structural invariants. A failed import returns an error and nothing else:
//! the caller's current lesson is never touched, because nothing is mutated
//! here at all.

use crate::domain::Lesson;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("not a valid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid lesson file: {0}")]
    Invalid(String),
}

/// Parses and validates a lesson file.
pub fn import_lesson(raw: &str) -> Result<Lesson, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    check_required_fields(&value)?;
    let lesson: Lesson = serde_json::from_value(value)?;
    lesson
        .validate()
        .map_err(|e| ImportError::Invalid(e.to_string()))?;
    Ok(lesson)
}

/// Serializes a lesson for download, pretty-printed for humans and diffs.
pub fn export_lesson(lesson: &Lesson) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(lesson)
}

fn check_required_fields(value: &Value) -> Result<(), ImportError> {
    let invalid = |reason: String| ImportError::Invalid(reason);

    let root = value
        .as_object()
        .ok_or_else(|| invalid("the document is not a JSON object".into()))?;
    if !root.get("id").is_some_and(Value::is_string) {
        return Err(invalid("missing required field: id".into()));
    }
    let slides = match root.get("slides") {
        Some(Value::Array(slides)) => slides,
        Some(_) => return Err(invalid("slides must be an array".into())),
        None => return Err(invalid("missing required field: slides".into())),
    };

    for (slide_number, slide) in slides.iter().enumerate() {
        let slide_number = slide_number + 1;
        let slide = slide
            .as_object()
            .ok_or_else(|| invalid(format!("slide {slide_number} is not an object")))?;
        for field in ["id", "title"] {
            if !slide.get(field).is_some_and(Value::is_string) {
                return Err(invalid(format!(
                    "slide {slide_number} is missing required field: {field}"
                )));
            }
        }
        let components = match slide.get("components") {
            Some(Value::Array(components)) => components,
            Some(_) => {
                return Err(invalid(format!(
                    "slide {slide_number}: components must be an array"
                )))
            }
            None => {
                return Err(invalid(format!(
                    "slide {slide_number} is missing required field: components"
                )))
            }
        };

        for (component_number, component) in components.iter().enumerate() {
            let component_number = component_number + 1;
            let component = component.as_object().ok_or_else(|| {
                invalid(format!(
                    "slide {slide_number}, component {component_number} is not an object"
                ))
            })?;
            for field in ["id", "type"] {
                if !component.get(field).is_some_and(Value::is_string) {
                    return Err(invalid(format!(
                        "slide {slide_number}, component {component_number} is missing required field: {field}"
                    )));
                }
            }
            if !component.get("props").is_some_and(Value::is_object) {
                return Err(invalid(format!(
                    "slide {slide_number}, component {component_number} is missing required field: props"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_document_without_slides_is_rejected() {
        let error = import_lesson(r#"{ "id": "x" }"#).unwrap_err();
        assert!(error.to_string().contains("missing required field: slides"));
    }

    #[test]
    fn a_component_without_props_names_its_position() {
        let raw = serde_json::json!({
            "id": "l1",
            "slides": [{
                "id": "s1",
                "title": "One",
                "components": [{ "id": "c1", "type": "paragraph" }]
            }]
        })
        .to_string();
        let error = import_lesson(&raw).unwrap_err();
        let reason = error.to_string();
        assert!(reason.contains("slide 1, component 1"), "{reason}");
        assert!(reason.contains("props"), "{reason}");
    }

    #[test]
    fn an_empty_slide_list_is_rejected() {
        let raw = serde_json::json!({ "id": "l1", "slides": [] }).to_string();
        let error = import_lesson(&raw).unwrap_err();
        assert!(error.to_string().contains("at least one slide"));
    }

    #[test]
    fn malformed_json_is_rejected_up_front() {
        assert!(matches!(
            import_lesson("{ not json"),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn a_valid_file_round_trips_through_export() {
        let raw = serde_json::json!({
            "id": "l1",
            "title": "Shapes",
            "description": "All about shapes",
            "author": "Ada",
            "level": "beginner",
            "duration": 20,
            "slides": [{
                "id": "s1",
                "title": "Intro",
                "components": [
                    { "id": "c1", "type": "heading", "props": { "content": "Shapes!" } },
                    { "id": "c2", "type": "quiz", "props": { "questions": [], "points": 5 } }
                ]
            }],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        })
        .to_string();

        let lesson = import_lesson(&raw).unwrap();
        assert_eq!(lesson.title, "Shapes");
        assert_eq!(lesson.slides[0].components.len(), 2);

        let exported = export_lesson(&lesson).unwrap();
        let reimported = import_lesson(&exported).unwrap();
        assert_eq!(reimported.slides[0].components, lesson.slides[0].components);
    }

    #[test]
    fn rejection_happens_before_any_parse_of_props() {
        // A second slide missing its title rejects the whole file even
        // though the first slide is fine.
        let raw = serde_json::json!({
            "id": "l1",
            "slides": [
                { "id": "s1", "title": "One", "components": [] },
                { "id": "s2", "components": [] }
            ]
        })
        .to_string();
        let error = import_lesson(&raw).unwrap_err();
        assert!(error.to_string().contains("slide 2"));
    }
}
