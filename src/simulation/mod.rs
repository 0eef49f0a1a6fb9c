// src/simulation/mod.rs
// Classroom simulation: persona initialization, turn evaluation, fallback

pub mod evaluator;
pub mod fallback;
pub mod initializer;
pub mod outcome;
pub mod policy;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod student;

pub use evaluator::TurnEvaluator;
pub use fallback::{FILLER_RESPONSE, SAMPLE_TOPIC, fallback_turn, sample_students};
pub use initializer::PersonaInitializer;
pub use outcome::{InitOutcome, Origin, TurnOutcome};
pub use policy::SimulationPolicy;
pub use session::{Session, evaluate_turn, initialize};
pub use student::{Student, clamp_understanding, count_speakers};
