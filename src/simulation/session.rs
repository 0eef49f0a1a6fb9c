// src/simulation/session.rs
// One simulation session: owns the topic, the roster and what was taught

use std::sync::Arc;
use tracing::info;

use super::evaluator::TurnEvaluator;
use super::initializer::PersonaInitializer;
use super::outcome::{InitOutcome, Origin, TurnOutcome};
use super::policy::SimulationPolicy;
use super::student::Student;
use crate::llm::ReasoningClient;

/// Entry point: build the initial classroom from notes. Total.
pub async fn initialize(
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
    notes: &str,
    file_name: &str,
) -> InitOutcome {
    PersonaInitializer::new(client, policy)
        .initialize(notes, file_name)
        .await
}

/// Entry point: evaluate one explanation against a roster. Total.
pub async fn evaluate_turn(
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
    topic: &str,
    roster: &[Student],
    explanation: &str,
) -> TurnOutcome {
    TurnEvaluator::new(client, policy)
        .evaluate_turn(topic, roster, explanation)
        .await
}

/// In-memory state of a single classroom.
///
/// One session has one writer; nothing here is shared across sessions.
/// Roster size is fixed once the session starts.
pub struct Session {
    topic: String,
    students: Vec<Student>,
    origin: Origin,
    taught_concepts: Vec<String>,
    turns: usize,
    evaluator: TurnEvaluator,
}

impl Session {
    /// Run the Persona Initializer and open a session on its result
    pub async fn start(
        client: Arc<dyn ReasoningClient>,
        policy: SimulationPolicy,
        notes: &str,
        file_name: &str,
    ) -> Self {
        let outcome = PersonaInitializer::new(client.clone(), policy)
            .initialize(notes, file_name)
            .await;
        Self::from_outcome(client, policy, outcome)
    }

    pub fn from_outcome(
        client: Arc<dyn ReasoningClient>,
        policy: SimulationPolicy,
        outcome: InitOutcome,
    ) -> Self {
        info!(topic = %outcome.topic, students = outcome.students.len(), origin = ?outcome.origin, "Session started");
        Self {
            topic: outcome.topic,
            students: outcome.students,
            origin: outcome.origin,
            taught_concepts: Vec::new(),
            turns: 0,
            evaluator: TurnEvaluator::new(client, policy),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// How the roster was produced
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Concepts introduced so far, in the order they were taught
    pub fn taught_concepts(&self) -> &[String] {
        &self.taught_concepts
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Mean understanding across the roster, 0 for an empty roster
    pub fn average_understanding(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let total: u32 = self.students.iter().map(|s| s.understanding as u32).sum();
        total as f64 / self.students.len() as f64
    }

    /// Run one turn and fold its result into the roster
    pub async fn teach(&mut self, explanation: &str) -> TurnOutcome {
        let outcome = self
            .evaluator
            .evaluate_turn(&self.topic, &self.students, explanation)
            .await;

        self.turns += 1;
        self.students = outcome.students.clone();
        if let Some(concept) = &outcome.taught_concept {
            let known = self
                .taught_concepts
                .iter()
                .any(|c| c.eq_ignore_ascii_case(concept));
            if !known {
                self.taught_concepts.push(concept.clone());
            }
        }

        info!(
            turn = self.turns,
            origin = ?outcome.origin,
            average = %format!("{:.1}", self.average_understanding()),
            "Turn folded into session"
        );
        outcome
    }
}
