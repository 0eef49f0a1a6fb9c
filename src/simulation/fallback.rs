// src/simulation/fallback.rs
// Degraded results used whenever the reasoning backend cannot be trusted

use rand::Rng;
use tracing::debug;

use super::outcome::{InitOutcome, Origin, TurnOutcome};
use super::policy::SimulationPolicy;
use super::sanitize::enforce_speaker_cap;
use super::student::{MAX_UNDERSTANDING, Student};

/// Topic label of the canned classroom
pub const SAMPLE_TOPIC: &str = "Sample Topic: Introduction to Computing";

/// Neutral filler every student says on a fallback turn
pub const FILLER_RESPONSE: &str = "I think I get it...";

/// Chance that a given student speaks on a fallback turn
const FALLBACK_SPEAK_PROBABILITY: f64 = 0.5;

/// The fixed roster used when there is no usable material or backend
pub fn sample_students() -> Vec<Student> {
    vec![
        Student::new(
            "s1",
            "Lawrence Page",
            "Reads everything literally and trips over metaphors.",
            "Believes that because arrays start at index 0, the first element does not exist.",
            "🤖",
            10,
        ),
        Student::new(
            "s2",
            "Vera Wang",
            "Needs diagrams and gets lost in long abstract text.",
            "Thinks the cloud is a physical place up in the sky.",
            "🎨",
            20,
        ),
        Student::new(
            "s3",
            "Samuel Cohen",
            "Doubts every claim until it is proven step by step.",
            "Believes open source code is insecure because anyone can read it.",
            "🕵️",
            15,
        ),
    ]
}

/// Canned classroom for notes that are missing or too short
pub fn sample_classroom() -> InitOutcome {
    InitOutcome {
        topic: SAMPLE_TOPIC.to_string(),
        students: sample_students(),
        origin: Origin::Sample,
    }
}

/// Canned roster labelled after the uploaded file
pub fn fallback_classroom(file_name: &str) -> InitOutcome {
    let label = if file_name.trim().is_empty() {
        "your notes"
    } else {
        file_name.trim()
    };
    InitOutcome {
        topic: format!("Topic from {}", label),
        students: sample_students(),
        origin: Origin::Fallback,
    }
}

/// Fallback turn with the thread-local RNG
pub fn fallback_turn(roster: &[Student], policy: &SimulationPolicy) -> TurnOutcome {
    fallback_turn_with_rng(roster, policy, &mut rand::rng())
}

/// Fallback turn: nudge everyone up, filler responses, a random few speak.
///
/// The speaker draw is still capped by the policy so the per-turn speaker
/// limit holds on every path. Never fails.
pub fn fallback_turn_with_rng<R: Rng>(
    roster: &[Student],
    policy: &SimulationPolicy,
    rng: &mut R,
) -> TurnOutcome {
    let mut students: Vec<Student> = roster
        .iter()
        .map(|student| Student {
            understanding: student
                .understanding
                .saturating_add(policy.fallback_increment)
                .min(MAX_UNDERSTANDING),
            response: FILLER_RESPONSE.to_string(),
            should_speak: rng.random_bool(FALLBACK_SPEAK_PROBABILITY),
            ..student.clone()
        })
        .collect();

    enforce_speaker_cap(&mut students, policy.speaker_cap);
    debug!(students = students.len(), "Produced fallback turn");

    TurnOutcome {
        taught_concept: None,
        students,
        origin: Origin::Fallback,
    }
}
