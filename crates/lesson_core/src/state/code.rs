//! Code-tester machine.
//!
//! The learner edits code, may run it freely for its output, and checks by
//! running the component's test cases. Execution itself lives behind the
//! [`CodeRunner`](crate::ports::CodeRunner) port; the machine only compares
//! trimmed output against each test's expectation. A runner failure fails
//! the test rather than the transition.

use super::{award_up_to, Outcome};
use crate::domain::CodeEditorProps;
use crate::feedback::FeedbackKind;
use crate::ports::CodeRunner;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeState {
    pub code: String,
    /// Output of the latest free run, or the runner's error text.
    pub output: Option<String>,
    /// test case id -> passed, filled in by Check.
    pub test_results: IndexMap<String, bool>,
    pub is_submitted: bool,
    pub is_correct: bool,
    pub awarded_points: u32,
}

#[derive(Debug, Clone)]
pub enum CodeAction {
    Edit(String),
    /// Run the code without scoring, for the learner to see its output.
    Run,
    Check,
    /// Try again after an incorrect check; restores the starter code.
    Reset,
}

impl CodeState {
    pub fn new(props: &CodeEditorProps) -> Self {
        Self {
            code: props.initial_code.clone(),
            output: None,
            test_results: IndexMap::new(),
            is_submitted: false,
            is_correct: false,
            awarded_points: 0,
        }
    }

    pub fn dispatch(
        &mut self,
        props: &CodeEditorProps,
        action: CodeAction,
        runner: &dyn CodeRunner,
    ) -> Outcome {
        match action {
            CodeAction::Edit(code) => self.edit(props, code),
            CodeAction::Run => self.run(props, runner),
            CodeAction::Check => self.check(props, runner),
            CodeAction::Reset => self.reset(props),
        }
    }

    fn edit(&mut self, props: &CodeEditorProps, code: String) -> Outcome {
        if props.read_only || self.is_submitted {
            return Outcome::none();
        }
        self.code = code;
        Outcome::none()
    }

    fn run(&mut self, props: &CodeEditorProps, runner: &dyn CodeRunner) -> Outcome {
        self.output = Some(match runner.run(&props.language, &self.code, "") {
            Ok(output) => output,
            Err(err) => err.to_string(),
        });
        Outcome::feedback(FeedbackKind::Click)
    }

    fn check(&mut self, props: &CodeEditorProps, runner: &dyn CodeRunner) -> Outcome {
        if self.is_submitted {
            return Outcome::none();
        }
        self.test_results = props
            .test_cases
            .iter()
            .map(|test| {
                let passed = runner
                    .run(&props.language, &self.code, &test.input)
                    .map(|output| output.trim() == test.expected_output.trim())
                    .unwrap_or(false);
                (test.id.clone(), passed)
            })
            .collect();
        self.is_correct = !props.test_cases.is_empty()
            && self.test_results.values().all(|&passed| passed);
        self.is_submitted = true;

        if self.is_correct {
            let newly = award_up_to(&mut self.awarded_points, props.points);
            Outcome::awarded(newly, FeedbackKind::Correct)
        } else {
            Outcome::feedback(FeedbackKind::Incorrect)
        }
    }

    fn reset(&mut self, props: &CodeEditorProps) -> Outcome {
        if !self.is_submitted || self.is_correct {
            return Outcome::none();
        }
        self.code = props.initial_code.clone();
        self.output = None;
        self.test_results = IndexMap::new();
        self.is_submitted = false;
        self.is_correct = false;
        Outcome::feedback(FeedbackKind::Click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TestCase;
    use crate::ports::{NoRunner, RunnerError};

    /// Pretends the code itself is its output, whatever the input.
    struct EchoRunner;

    impl CodeRunner for EchoRunner {
        fn run(&self, _language: &str, code: &str, _input: &str) -> Result<String, RunnerError> {
            Ok(code.to_string())
        }
    }

    fn echo_props() -> CodeEditorProps {
        CodeEditorProps {
            title: "Print hello".into(),
            initial_code: "".into(),
            language: "javascript".into(),
            read_only: false,
            test_cases: vec![
                TestCase {
                    id: "t1".into(),
                    input: "".into(),
                    expected_output: "hello".into(),
                },
                TestCase {
                    id: "t2".into(),
                    input: "anything".into(),
                    expected_output: "hello".into(),
                },
            ],
            points: 10,
        }
    }

    #[test]
    fn passing_all_tests_awards_once() {
        let props = echo_props();
        let mut state = CodeState::new(&props);

        state.dispatch(&props, CodeAction::Edit("hello".into()), &EchoRunner);
        let first = state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert!(state.is_correct);
        assert_eq!(first.awarded, 10);
        assert!(state.test_results.values().all(|&p| p));

        let second = state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert_eq!(second, Outcome::none());
        assert_eq!(state.awarded_points, 10);
    }

    #[test]
    fn output_comparison_trims_whitespace() {
        let props = echo_props();
        let mut state = CodeState::new(&props);
        state.dispatch(&props, CodeAction::Edit("  hello\n".into()), &EchoRunner);
        state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert!(state.is_correct);
    }

    #[test]
    fn runner_failure_fails_the_tests_not_the_machine() {
        let props = echo_props();
        let mut state = CodeState::new(&props);
        state.dispatch(&props, CodeAction::Edit("hello".into()), &NoRunner);
        let outcome = state.dispatch(&props, CodeAction::Check, &NoRunner);
        assert!(state.is_submitted);
        assert!(!state.is_correct);
        assert_eq!(outcome.awarded, 0);
        assert!(state.test_results.values().all(|&p| !p));
    }

    #[test]
    fn free_run_records_output_without_scoring() {
        let props = echo_props();
        let mut state = CodeState::new(&props);
        state.dispatch(&props, CodeAction::Edit("hi".into()), &EchoRunner);
        let outcome = state.dispatch(&props, CodeAction::Run, &EchoRunner);
        assert_eq!(state.output.as_deref(), Some("hi"));
        assert_eq!(outcome.awarded, 0);
        assert!(!state.is_submitted);
    }

    #[test]
    fn reset_restores_starter_code_then_success_awards_once() {
        let mut props = echo_props();
        props.initial_code = "// start here".into();
        let mut state = CodeState::new(&props);

        state.dispatch(&props, CodeAction::Edit("nope".into()), &EchoRunner);
        state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert!(!state.is_correct);

        state.dispatch(&props, CodeAction::Reset, &EchoRunner);
        assert_eq!(state.code, "// start here");
        assert!(state.test_results.is_empty());

        state.dispatch(&props, CodeAction::Edit("hello".into()), &EchoRunner);
        let outcome = state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert_eq!(outcome.awarded, 10);
        assert_eq!(state.awarded_points, 10);
    }

    #[test]
    fn no_test_cases_checks_incorrect() {
        let props = CodeEditorProps {
            test_cases: vec![],
            ..echo_props()
        };
        let mut state = CodeState::new(&props);
        let outcome = state.dispatch(&props, CodeAction::Check, &EchoRunner);
        assert!(state.is_submitted);
        assert!(!state.is_correct);
        assert_eq!(outcome.awarded, 0);
    }

    #[test]
    fn read_only_editor_ignores_edits() {
        let mut props = echo_props();
        props.read_only = true;
        props.initial_code = "fixed".into();
        let mut state = CodeState::new(&props);
        state.dispatch(&props, CodeAction::Edit("changed".into()), &EchoRunner);
        assert_eq!(state.code, "fixed");
    }
}
