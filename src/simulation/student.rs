// src/simulation/student.rs
// Student personas and the roster they live in

use serde::{Deserialize, Serialize};

/// Upper bound of the understanding scale
pub const MAX_UNDERSTANDING: u8 = 100;

/// One simulated student.
///
/// `persona` and `misconception` are fixed at creation. Only the Turn
/// Evaluator (or the fallback policy) changes `understanding`;
/// `should_speak` and `response` are rewritten every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    /// Internal learning-style description, never shown to the end user
    pub persona: String,
    pub misconception: String,
    pub avatar: String,
    pub understanding: u8,
    #[serde(default)]
    pub should_speak: bool,
    #[serde(default)]
    pub response: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        persona: impl Into<String>,
        misconception: impl Into<String>,
        avatar: impl Into<String>,
        understanding: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            persona: persona.into(),
            misconception: misconception.into(),
            avatar: avatar.into(),
            understanding: understanding.min(MAX_UNDERSTANDING),
            should_speak: false,
            response: String::new(),
        }
    }

    /// Copy with the per-turn fields cleared
    pub fn quiet(&self) -> Self {
        Self {
            should_speak: false,
            response: String::new(),
            ..self.clone()
        }
    }
}

/// Clamp an integer score into [0, 100]
pub fn clamp_understanding(value: i64) -> u8 {
    value.clamp(0, MAX_UNDERSTANDING as i64) as u8
}

/// Round and clamp a backend-proposed score; `None` if it is not finite
pub fn clamp_score(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, MAX_UNDERSTANDING as f64) as u8)
}

pub fn count_speakers(students: &[Student]) -> usize {
    students.iter().filter(|s| s.should_speak).count()
}
