// src/simulation/prompt.rs
// Prompt construction for persona generation and turn evaluation

use serde_json::json;

use super::policy::SimulationPolicy;
use super::student::Student;
use crate::llm::GenerationRequest;

/// Shared framing for every classroom prompt
const SIMULATOR_PREFIX: &str = "You are an educational simulator that role-plays a small class of students.";

const INIT_RULES: &str = r#"Read the teacher's notes and name the core topic in a short title.
Then invent {count} distinct students. For each student provide:
- "name": a realistic full human name (for example "Priya Nair" or "Daniel Okoro"). Never use puns, nicknames or names themed on the topic.
- "persona": a private description of how this student learns. It is never shown to the teacher but drives the student's behaviour.
- "avatar": a single emoji related to the topic or the student's personality.
- "misconception": one specific belief about the material in the notes that sounds plausible but is wrong.
- "understanding": an integer between 0 and {max_initial}.
- "id": a short unique string such as "1", "2", "3".

Respond with a single JSON object and nothing else:
{"topic": "Topic title", "students": [{"id": "1", "name": "...", "persona": "...", "misconception": "...", "understanding": 10, "avatar": "..."}]}"#;

const TURN_RULES: &str = r#"You will receive the teacher's latest explanation and the students (persona, misconception, current understanding).

Evaluate every student independently:
1. Does the explanation address this student's specific misconception?
2. Is it clear for this student's persona?

Then set the student's new understanding (0-100):
- misconception directly and logically debunked: raise by 20 to 40
- vague explanation: raise by 0 to 5
- confusing explanation: lower by 5 or more

Write a short response (1-2 sentences) in the student's voice:
- below 50: ask a question that shows the lingering misconception
- above 80: sound clear and excited"#;

const STRICT_SPEAKING: &str = r#"Exactly one student may speak this turn, the one with the most to say. Set "shouldSpeak": true for that student and false for all others.
The speaking student's response must start by restating what they now understand and then voice what still confuses them, in the form "I understand that ... but ...""#;

const LOOSE_SPEAKING: &str = r#"Only {cap} students at most should speak this turn to avoid noise: set "shouldSpeak": true for them and false for everyone else."#;

const TURN_SHAPE: &str = r#"If the explanation introduces a new concept, give it a 3-5 word title in "taught_concept"; otherwise use null.

Respond with a single JSON object and nothing else:
{"taught_concept": "Title or null", "students": [{"id": "...", "understanding": 55, "response": "...", "shouldSpeak": false}]}"#;

/// Cut `text` to at most `limit` characters (not bytes, not tokens)
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn init_system_prompt(policy: &SimulationPolicy) -> String {
    let rules = INIT_RULES
        .replace("{count}", &policy.roster_size.to_string())
        .replace("{max_initial}", &policy.initial_understanding_max.to_string());
    format!("{}\n\n{}", SIMULATOR_PREFIX, rules)
}

/// Persona generation request. Notes are truncated to the policy limit.
pub fn init_request(notes: &str, file_name: &str, policy: &SimulationPolicy) -> GenerationRequest {
    let payload = json!({
        "fileName": file_name,
        "notes": truncate_chars(notes, policy.notes_char_limit),
    });
    GenerationRequest::json(init_system_prompt(policy), payload.to_string())
}

pub fn turn_system_prompt(topic: &str, policy: &SimulationPolicy) -> String {
    let speaking = if policy.require_preamble && policy.speaker_cap == 1 {
        STRICT_SPEAKING.to_string()
    } else if policy.require_preamble {
        format!(
            "{}\nEvery speaking student's response must use the form \"I understand that ... but ...\".",
            LOOSE_SPEAKING.replace("{cap}", &policy.speaker_cap.to_string())
        )
    } else {
        LOOSE_SPEAKING.replace("{cap}", &policy.speaker_cap.to_string())
    };

    format!(
        "{} The class is learning '{}'.\n\n{}\n\n{}\n\n{}",
        SIMULATOR_PREFIX, topic, TURN_RULES, speaking, TURN_SHAPE
    )
}

/// Turn evaluation request: explanation plus the students' stable fields
pub fn turn_request(
    topic: &str,
    students: &[Student],
    explanation: &str,
    policy: &SimulationPolicy,
) -> GenerationRequest {
    let roster: Vec<_> = students
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "name": s.name,
                "persona": s.persona,
                "misconception": s.misconception,
                "understanding": s.understanding,
            })
        })
        .collect();

    let payload = json!({
        "topic": topic,
        "explanation": explanation,
        "students": roster,
    });
    GenerationRequest::json(turn_system_prompt(topic, policy), payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_truncate_by_characters() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hi", 10), "hi");
        // multi-byte characters count once
        assert_eq!(truncate_chars("ñañaña", 4), "ñaña");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_init_prompt_mentions_roster_size() {
        let policy = SimulationPolicy::default();
        let prompt = init_system_prompt(&policy);
        assert!(prompt.contains("invent 5 distinct students"));
        assert!(prompt.contains("between 0 and 30"));
        assert!(prompt.contains("Never use puns"));
    }

    #[test]
    fn test_init_request_truncates_notes() {
        let policy = SimulationPolicy::default();
        let notes = "x".repeat(5000);
        let req = init_request(&notes, "notes.txt", &policy);
        let payload: Value = serde_json::from_str(req.user_payload().unwrap()).unwrap();
        assert_eq!(payload["notes"].as_str().unwrap().chars().count(), 3000);
        assert_eq!(payload["fileName"], "notes.txt");
        assert!(req.json_object);
    }

    #[test]
    fn test_strict_turn_prompt() {
        let prompt = turn_system_prompt("Recursion", &SimulationPolicy::default());
        assert!(prompt.contains("'Recursion'"));
        assert!(prompt.contains("Exactly one student"));
        assert!(prompt.contains("I understand that ... but ..."));
        assert!(prompt.contains("taught_concept"));
    }

    #[test]
    fn test_loose_turn_prompt() {
        let prompt = turn_system_prompt("Recursion", &SimulationPolicy::loose());
        assert!(prompt.contains("Only 2 students at most"));
        assert!(!prompt.contains("I understand that"));
    }

    #[test]
    fn test_turn_request_hides_transient_fields() {
        let mut s = Student::new(
            "1",
            "Ana Lima",
            "visual",
            "thinks loops are recursion",
            "🔁",
            12,
        );
        s.response = "old".into();
        s.should_speak = true;
        let policy = SimulationPolicy::default();
        let req = turn_request("Recursion", &[s], "A function that calls itself", &policy);
        let payload: Value = serde_json::from_str(req.user_payload().unwrap()).unwrap();
        assert_eq!(payload["explanation"], "A function that calls itself");
        let student = &payload["students"][0];
        assert_eq!(student["misconception"], "thinks loops are recursion");
        assert_eq!(student["understanding"], 12);
        assert!(student.get("response").is_none());
        assert!(student.get("shouldSpeak").is_none());
    }
}
