// vidbatch-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::ffmpeg_executor::{TranscoderProcess, TranscoderSpawner, TranscoderStatus};
use crate::error::{CoreError, CoreResult};

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Mock implementation of TranscoderProcess.
#[derive(Clone, Debug)]
pub struct MockTranscoderProcess {
    /// Lines returned by collect_diagnostics.
    pub diagnostics: Vec<String>,
    /// Status returned by wait.
    pub status: TranscoderStatus,
}

impl TranscoderProcess for MockTranscoderProcess {
    fn collect_diagnostics(&mut self) -> CoreResult<Vec<String>> {
        Ok(self.diagnostics.clone())
    }

    fn wait(&mut self) -> CoreResult<TranscoderStatus> {
        Ok(self.status)
    }
}

/// What the mock does when a call matches.
#[derive(Clone, Debug)]
pub enum MockOutcome {
    /// Exit 0, optionally writing an empty file at the output path.
    Success { create_output: bool },
    /// Exit with `code`, emitting `diagnostics`.
    Failure { code: i32, diagnostics: Vec<String> },
    /// The spawn itself fails with this message.
    SpawnError(String),
}

/// Represents an expected transcoder call and its scripted result.
#[derive(Clone, Debug)]
pub struct MockExpectation {
    pub arg_pattern: String,
    pub outcome: MockOutcome,
}

/// Mock implementation of TranscoderSpawner.
///
/// Expectations are matched against any argument containing the pattern
/// and are consumed on use. Calls that match nothing fall back to the
/// default outcome, or panic if none was set.
#[derive(Clone, Default)]
pub struct MockTranscoderSpawner {
    expectations: Rc<RefCell<Vec<MockExpectation>>>,
    default_outcome: Rc<RefCell<Option<MockOutcome>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockTranscoderSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Mock that succeeds for every call and creates the output file.
    pub fn always_succeeding() -> Self {
        let mock = Self::new();
        mock.set_default(MockOutcome::Success { create_output: true });
        mock
    }

    pub fn set_default(&self, outcome: MockOutcome) {
        *self.default_outcome.borrow_mut() = Some(outcome);
    }

    pub fn add_expectation(&self, arg_pattern: &str, outcome: MockOutcome) {
        self.expectations.borrow_mut().push(MockExpectation {
            arg_pattern: arg_pattern.to_string(),
            outcome,
        });
    }

    pub fn add_success_expectation(&self, arg_pattern: &str, create_output: bool) {
        self.add_expectation(arg_pattern, MockOutcome::Success { create_output });
    }

    pub fn add_exit_error_expectation(&self, arg_pattern: &str, code: i32, diagnostics: &[&str]) {
        self.add_expectation(
            arg_pattern,
            MockOutcome::Failure {
                code,
                diagnostics: diagnostics.iter().map(|s| s.to_string()).collect(),
            },
        );
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received_calls.borrow().len()
    }
}

impl TranscoderSpawner for MockTranscoderSpawner {
    type Process = MockTranscoderProcess;

    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process> {
        self.received_calls.borrow_mut().push(args.to_vec());

        let matched = {
            let mut expectations = self.expectations.borrow_mut();
            expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)))
                .map(|index| expectations.remove(index).outcome)
        };

        let outcome = match matched.or_else(|| self.default_outcome.borrow().clone()) {
            Some(outcome) => outcome,
            None => panic!("MockTranscoderSpawner: No expectation found for args: {args:?}"),
        };

        match outcome {
            MockOutcome::Success { create_output } => {
                if create_output {
                    if let Some(output) = args.last() {
                        let output = PathBuf::from(output);
                        if let Some(parent) = output.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(&output, b"converted")?;
                    }
                }
                Ok(MockTranscoderProcess {
                    diagnostics: vec![],
                    status: TranscoderStatus::from_code(0),
                })
            }
            MockOutcome::Failure { code, diagnostics } => Ok(MockTranscoderProcess {
                diagnostics,
                status: TranscoderStatus::from_code(code),
            }),
            MockOutcome::SpawnError(message) => {
                Err(CoreError::CommandStart(self.program(), message))
            }
        }
    }

    fn program(&self) -> String {
        "mock-ffmpeg".to_string()
    }
}
