// src/simulation/sanitize.rs
// Trust boundary between parsed backend JSON and the roster.
//
// Backend output is treated as adversarial: shapes are checked field by
// field, scores are clamped, unknown ids are dropped and the speaker cap
// is enforced here regardless of what the backend proposed.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::student::{Student, clamp_score};
use crate::error::{ClassroomError, Result};
use crate::llm::JsonObject;

/// Validated Initializer output
#[derive(Debug, Clone, PartialEq)]
pub struct RosterProposal {
    pub topic: String,
    pub students: Vec<Student>,
}

/// One validated per-student entry of a Turn response
#[derive(Debug, Clone, PartialEq)]
pub struct StudentUpdate {
    pub id: String,
    pub understanding: u8,
    pub response: String,
    pub should_speak: bool,
}

/// Validated Turn output, not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct TurnProposal {
    pub taught_concept: Option<String>,
    pub updates: Vec<StudentUpdate>,
}

// ============================================================================
// Field helpers
// ============================================================================

fn field<'a>(object: &'a JsonObject, key: &str, ctx: &str) -> Result<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| ClassroomError::validation(format!("{}: missing field `{}`", ctx, key)))
}

fn required_text(object: &JsonObject, key: &str, ctx: &str) -> Result<String> {
    match field(object, key, ctx)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::String(_) => Err(ClassroomError::validation(format!("{}: `{}` is blank", ctx, key))),
        _ => Err(ClassroomError::validation(format!("{}: `{}` is not a string", ctx, key))),
    }
}

/// Ids may come back as strings or integers; both normalize to a string
fn student_id(object: &JsonObject, ctx: &str) -> Result<String> {
    match field(object, "id", ctx)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        _ => Err(ClassroomError::validation(format!("{}: `id` is not a usable identifier", ctx))),
    }
}

fn score(object: &JsonObject, ctx: &str) -> Result<u8> {
    field(object, "understanding", ctx)?
        .as_f64()
        .and_then(clamp_score)
        .ok_or_else(|| {
            ClassroomError::validation(format!("{}: `understanding` is not a number", ctx))
        })
}

fn student_objects<'a>(root: &'a JsonObject) -> Result<&'a Vec<Value>> {
    match root.get("students") {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ClassroomError::validation("`students` is not an array")),
        None => Err(ClassroomError::validation("missing field `students`")),
    }
}

fn as_object<'a>(value: &'a Value, ctx: &str) -> Result<&'a JsonObject> {
    value
        .as_object()
        .ok_or_else(|| ClassroomError::validation(format!("{} is not an object", ctx)))
}

// ============================================================================
// Initializer shape
// ============================================================================

/// Validate `{ topic, students: [{ id, name, persona, misconception, understanding, avatar }] }`.
///
/// All or nothing: any bad entry rejects the whole roster.
pub fn parse_roster(root: &JsonObject, initial_max: u8) -> Result<RosterProposal> {
    let topic = required_text(root, "topic", "response")?;
    let items = student_objects(root)?;
    if items.is_empty() {
        return Err(ClassroomError::validation("`students` is empty"));
    }

    let mut seen = HashSet::new();
    let mut students = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let ctx = format!("students[{}]", index);
        let object = as_object(item, &ctx)?;

        let id = student_id(object, &ctx)?;
        if !seen.insert(id.clone()) {
            return Err(ClassroomError::validation(format!("{}: duplicate id `{}`", ctx, id)));
        }

        students.push(Student::new(
            id,
            required_text(object, "name", &ctx)?,
            required_text(object, "persona", &ctx)?,
            required_text(object, "misconception", &ctx)?,
            required_text(object, "avatar", &ctx)?,
            score(object, &ctx)?.min(initial_max),
        ));
    }

    Ok(RosterProposal { topic, students })
}

// ============================================================================
// Turn shape
// ============================================================================

/// Validate `{ taught_concept, students: [{ id, understanding, response, shouldSpeak }] }`.
///
/// `response` and `shouldSpeak` default to empty/false when absent, but
/// present values of the wrong type are rejected.
pub fn parse_turn(root: &JsonObject) -> Result<TurnProposal> {
    let taught_concept = match root.get("taught_concept") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(_) => return Err(ClassroomError::validation("`taught_concept` is not a string")),
    };

    let items = student_objects(root)?;
    let mut updates = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let ctx = format!("students[{}]", index);
        let object = as_object(item, &ctx)?;

        let response = match object.get("response") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => {
                return Err(ClassroomError::validation(format!(
                    "{}: `response` is not a string",
                    ctx
                )));
            }
        };
        let should_speak = match object.get("shouldSpeak") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(ClassroomError::validation(format!(
                    "{}: `shouldSpeak` is not a boolean",
                    ctx
                )));
            }
        };

        updates.push(StudentUpdate {
            id: student_id(object, &ctx)?,
            understanding: score(object, &ctx)?,
            response,
            should_speak,
        });
    }

    Ok(TurnProposal {
        taught_concept,
        updates,
    })
}

/// Fold a validated proposal into a roster.
///
/// - roster order and membership never change
/// - updates for unknown ids are ignored; only the first entry per id counts
/// - students missing from the proposal keep their score and stay quiet
/// - at most `speaker_cap` speakers, earliest in roster order win
pub fn apply_turn(roster: &[Student], proposal: &TurnProposal, speaker_cap: usize) -> Vec<Student> {
    let mut by_id: HashMap<&str, &StudentUpdate> = HashMap::new();
    for update in &proposal.updates {
        if !roster.iter().any(|s| s.id == update.id) {
            debug!(id = %update.id, "Ignoring update for unknown student");
            continue;
        }
        if by_id.contains_key(update.id.as_str()) {
            debug!(id = %update.id, "Ignoring duplicate update");
            continue;
        }
        by_id.insert(update.id.as_str(), update);
    }

    let mut students: Vec<Student> = roster
        .iter()
        .map(|student| {
            let mut next = student.quiet();
            if let Some(update) = by_id.get(student.id.as_str()) {
                next.understanding = update.understanding;
                next.response = update.response.clone();
                next.should_speak = update.should_speak;
            }
            next
        })
        .collect();

    enforce_speaker_cap(&mut students, speaker_cap);
    students
}

/// Keep the first `cap` speakers in roster order, silence the rest.
/// Returns how many were demoted.
pub fn enforce_speaker_cap(students: &mut [Student], cap: usize) -> usize {
    let mut kept = 0;
    let mut demoted = 0;
    for student in students.iter_mut().filter(|s| s.should_speak) {
        if kept < cap {
            kept += 1;
        } else {
            student.should_speak = false;
            demoted += 1;
        }
    }
    if demoted > 0 {
        debug!(demoted, cap, "Speaker cap enforced");
    }
    demoted
}
