//! Progress through the comparison workflow as an immutable value.
//!
//! Step 1 is complete once a non-empty keyword list is loaded; steps 2a and
//! 2b once System A and System B have each answered a test call
//! successfully. Every transition consumes the state and returns the next
//! one, so the caller decides where (and whether) the state is stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SystemId;
use crate::types::CallResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Keywords,
    System(SystemId),
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Keywords, Step::System(SystemId::A), Step::System(SystemId::B)];

    pub fn label(&self) -> &'static str {
        match self {
            Step::Keywords => "search keywords",
            Step::System(SystemId::A) => "System A API",
            Step::System(SystemId::B) => "System B API",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Keywords => f.write_str("1"),
            Step::System(SystemId::A) => f.write_str("2a"),
            Step::System(SystemId::B) => f.write_str("2b"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    keywords: Vec<String>,
    system_a_tested: bool,
    system_b_tested: bool,
}

impl WorkflowState {
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Keyword used for single-call system tests.
    pub fn example_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }

    /// Replace the keyword list. Earlier test outcomes are kept.
    pub fn with_keywords(self, keywords: Vec<String>) -> Self {
        Self { keywords, ..self }
    }

    /// Record a test call. Only a success marks the system as tested; a
    /// failure leaves an earlier success in place.
    pub fn with_test_outcome(self, system: SystemId, result: &CallResult) -> Self {
        if !result.is_success() {
            return self;
        }
        match system {
            SystemId::A => Self {
                system_a_tested: true,
                ..self
            },
            SystemId::B => Self {
                system_b_tested: true,
                ..self
            },
        }
    }

    pub fn is_tested(&self, system: SystemId) -> bool {
        match system {
            SystemId::A => self.system_a_tested,
            SystemId::B => self.system_b_tested,
        }
    }

    pub fn is_step_completed(&self, step: Step) -> bool {
        match step {
            Step::Keywords => !self.keywords.is_empty(),
            Step::System(system) => self.is_tested(system),
        }
    }

    /// Steps still open, in workflow order.
    pub fn pending_steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| !self.is_step_completed(*step))
            .collect()
    }

    /// Whether every configuration step is done.
    pub fn ready_to_run(&self) -> bool {
        self.pending_steps().is_empty()
    }
}
