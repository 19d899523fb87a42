pub mod rest;
pub mod state;

// Re-export the handlers the binary wires into the router.
pub use rest::{
    get_interaction_handler, get_lesson_handler, list_user_lessons_handler, put_lesson_handler,
    save_interaction_handler,
};
