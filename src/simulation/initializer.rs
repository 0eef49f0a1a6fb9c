// src/simulation/initializer.rs
// Persona Initializer: notes in, topic and seeded roster out

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::fallback::{fallback_classroom, sample_classroom};
use super::outcome::{InitOutcome, Origin};
use super::policy::SimulationPolicy;
use super::prompt::init_request;
use super::sanitize::{RosterProposal, parse_roster};
use crate::error::Result;
use crate::llm::ReasoningClient;

pub struct PersonaInitializer {
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
}

impl PersonaInitializer {
    pub fn new(client: Arc<dyn ReasoningClient>, policy: SimulationPolicy) -> Self {
        Self { client, policy }
    }

    /// True when the notes are too short to be worth a backend call.
    /// Counts characters of the text as extracted, whitespace included.
    pub fn is_insufficient(&self, notes: &str) -> bool {
        notes.chars().count() < self.policy.min_notes_chars
    }

    /// Build the initial classroom. Never fails.
    ///
    /// - notes missing or too short: the fixed sample classroom, no backend call
    /// - backend failure or malformed roster: sample personas labelled after `file_name`
    #[instrument(skip(self, notes), fields(notes_chars = notes.chars().count()))]
    pub async fn initialize(&self, notes: &str, file_name: &str) -> InitOutcome {
        if self.is_insufficient(notes) {
            info!("Notes too short, using sample classroom");
            return sample_classroom();
        }

        match self.generate(notes, file_name).await {
            Ok(proposal) => {
                info!(
                    topic = %proposal.topic,
                    students = proposal.students.len(),
                    "Classroom initialized"
                );
                InitOutcome {
                    topic: proposal.topic,
                    students: proposal.students,
                    origin: Origin::Backend,
                }
            }
            Err(e) => {
                warn!(error = %e, client = self.client.name(), "Persona generation failed, using fallback roster");
                fallback_classroom(file_name)
            }
        }
    }

    /// The fallible path: one backend call, then all-or-nothing validation
    pub async fn generate(&self, notes: &str, file_name: &str) -> Result<RosterProposal> {
        let request = init_request(notes, file_name, &self.policy);
        let object = self.client.generate(request).await?;
        let proposal = parse_roster(&object, self.policy.initial_understanding_max)?;

        if proposal.students.len() != self.policy.roster_size {
            warn!(
                expected = self.policy.roster_size,
                received = proposal.students.len(),
                "Backend returned a different roster size"
            );
        }
        Ok(proposal)
    }
}
