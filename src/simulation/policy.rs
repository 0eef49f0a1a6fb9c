// src/simulation/policy.rs
// Tunable simulation constants

/// Minimum notes length (in characters) worth sending to the backend
pub const MIN_NOTES_CHARS: usize = 10;
/// Notes are cut to this many characters before they are sent
pub const NOTES_CHAR_LIMIT: usize = 3000;
pub const DEFAULT_ROSTER_SIZE: usize = 5;
pub const DEFAULT_SPEAKER_CAP: usize = 1;
pub const FALLBACK_INCREMENT: u8 = 10;
pub const INITIAL_UNDERSTANDING_MAX: u8 = 30;

/// Policy knobs for one simulation.
///
/// The two observed turn-prompt variants differ in speaker cap and
/// response strictness; both are expressible here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationPolicy {
    /// Personas requested from the backend at initialization
    pub roster_size: usize,
    /// Hard cap on `shouldSpeak = true` per turn
    pub speaker_cap: usize,
    /// Speakers must open with "I understand that ... but ..."
    pub require_preamble: bool,
    pub min_notes_chars: usize,
    pub notes_char_limit: usize,
    /// Understanding bump applied by the fallback policy
    pub fallback_increment: u8,
    /// Upper bound of the seeded understanding score
    pub initial_understanding_max: u8,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            roster_size: DEFAULT_ROSTER_SIZE,
            speaker_cap: DEFAULT_SPEAKER_CAP,
            require_preamble: true,
            min_notes_chars: MIN_NOTES_CHARS,
            notes_char_limit: NOTES_CHAR_LIMIT,
            fallback_increment: FALLBACK_INCREMENT,
            initial_understanding_max: INITIAL_UNDERSTANDING_MAX,
        }
    }
}

impl SimulationPolicy {
    /// Looser variant: up to two speakers, no mandatory preamble
    pub fn loose() -> Self {
        Self {
            speaker_cap: 2,
            require_preamble: false,
            ..Self::default()
        }
    }
}
