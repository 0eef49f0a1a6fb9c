// src/simulation/outcome.rs
// Results handed back to the session caller

use serde::Serialize;

use super::student::Student;

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Validated backend output
    Backend,
    /// Backend failed or returned unusable data
    Fallback,
    /// Notes too short; canned sample classroom
    Sample,
}

impl Origin {
    pub fn is_degraded(self) -> bool {
        self != Origin::Backend
    }
}

/// Result of `initialize`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitOutcome {
    pub topic: String,
    pub students: Vec<Student>,
    pub origin: Origin,
}

/// Result of `evaluate_turn`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    /// Short title of a newly introduced concept, if any
    pub taught_concept: Option<String>,
    pub students: Vec<Student>,
    pub origin: Origin,
}

impl TurnOutcome {
    pub fn speakers(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|s| s.should_speak)
    }
}
