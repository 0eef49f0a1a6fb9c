// src/simulation/evaluator.rs
// Turn Evaluator: explanation in, updated roster and speakers out

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::fallback::fallback_turn;
use super::outcome::{Origin, TurnOutcome};
use super::policy::SimulationPolicy;
use super::prompt::turn_request;
use super::sanitize::{apply_turn, parse_turn};
use super::student::{Student, count_speakers};
use crate::error::Result;
use crate::llm::ReasoningClient;

pub struct TurnEvaluator {
    client: Arc<dyn ReasoningClient>,
    policy: SimulationPolicy,
}

impl TurnEvaluator {
    pub fn new(client: Arc<dyn ReasoningClient>, policy: SimulationPolicy) -> Self {
        Self { client, policy }
    }

    /// Evaluate one teacher explanation against the roster. Never fails:
    /// backend or validation errors produce the fallback turn instead.
    #[instrument(skip(self, roster, explanation), fields(students = roster.len(), explanation_chars = explanation.chars().count()))]
    pub async fn evaluate_turn(
        &self,
        topic: &str,
        roster: &[Student],
        explanation: &str,
    ) -> TurnOutcome {
        match self.try_evaluate(topic, roster, explanation).await {
            Ok(outcome) => {
                info!(
                    speakers = count_speakers(&outcome.students),
                    taught_concept = ?outcome.taught_concept,
                    "Turn evaluated"
                );
                outcome
            }
            Err(e) => {
                warn!(error = %e, client = self.client.name(), "Turn evaluation failed, using fallback");
                fallback_turn(roster, &self.policy)
            }
        }
    }

    /// The fallible path: one backend call, validation, then the sanitized fold
    pub async fn try_evaluate(
        &self,
        topic: &str,
        roster: &[Student],
        explanation: &str,
    ) -> Result<TurnOutcome> {
        let request = turn_request(topic, roster, explanation, &self.policy);
        let object = self.client.generate(request).await?;
        let proposal = parse_turn(&object)?;
        debug!(updates = proposal.updates.len(), "Turn proposal validated");

        Ok(TurnOutcome {
            students: apply_turn(roster, &proposal, self.policy.speaker_cap),
            taught_concept: proposal.taught_concept,
            origin: Origin::Backend,
        })
    }
}
