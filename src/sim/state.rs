//! Flip state types
//!
//! Everything here is plain data: the engine in `engine.rs` owns the
//! transitions between these values.

use serde::{Deserialize, Serialize};

/// Result of a single flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Heads,
    Tails,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Heads => "heads",
            Outcome::Tails => "tails",
        }
    }

    /// Label shown on the result banner
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Heads => "HEADS",
            Outcome::Tails => "TAILS",
        }
    }

    /// Resting angle (mod 360) at which this face is up
    pub fn resting_angle(&self) -> u32 {
        match self {
            Outcome::Heads => 0,
            Outcome::Tails => 180,
        }
    }

    /// Face shown when the coin rests at `rotation` degrees.
    ///
    /// Heads is up for the half-turn centred on 0°, tails for the one
    /// centred on 180°.
    pub fn facing(rotation: u32) -> Self {
        let angle = rotation % 360;
        if (90..270).contains(&angle) {
            Outcome::Tails
        } else {
            Outcome::Heads
        }
    }
}

/// Running count of outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    #[serde(rename = "heads")]
    pub heads_count: u64,
    #[serde(rename = "tails")]
    pub tails_count: u64,
}

impl Tally {
    pub fn new(heads_count: u64, tails_count: u64) -> Self {
        Self {
            heads_count,
            tails_count,
        }
    }

    /// Count one more flip for `outcome`
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Heads => self.heads_count = self.heads_count.saturating_add(1),
            Outcome::Tails => self.tails_count = self.tails_count.saturating_add(1),
        }
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Heads => self.heads_count,
            Outcome::Tails => self.tails_count,
        }
    }

    pub fn total(&self) -> u64 {
        self.heads_count.saturating_add(self.tails_count)
    }

    pub fn is_zero(&self) -> bool {
        self.heads_count == 0 && self.tails_count == 0
    }
}

/// Flip lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlipPhase {
    /// Waiting for user input
    #[default]
    Idle,
    /// Coin is in the air; carries the outcome it will land on
    Flipping { outcome: Outcome },
}

impl FlipPhase {
    pub fn is_flipping(&self) -> bool {
        matches!(self, FlipPhase::Flipping { .. })
    }
}

/// Complete flip state owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipState {
    pub phase: FlipPhase,
    /// Absolute rotation of the coin in degrees
    pub rotation: u32,
    pub tally: Tally,
}

impl FlipState {
    /// Create an idle state from hydrated values
    pub fn new(rotation: u32, tally: Tally) -> Self {
        Self {
            phase: FlipPhase::Idle,
            rotation,
            tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_at_resting_angles() {
        assert_eq!(Outcome::facing(0), Outcome::Heads);
        assert_eq!(Outcome::facing(180), Outcome::Tails);
        assert_eq!(Outcome::facing(3600), Outcome::Heads);
        assert_eq!(Outcome::facing(3780), Outcome::Tails);
        assert_eq!(Outcome::facing(Outcome::Tails.resting_angle()), Outcome::Tails);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = Tally::default();
        assert!(tally.is_zero());

        tally.record(Outcome::Heads);
        tally.record(Outcome::Heads);
        tally.record(Outcome::Tails);

        assert_eq!(tally, Tally::new(2, 1));
        assert_eq!(tally.count(Outcome::Heads), 2);
        assert_eq!(tally.total(), 3);
        assert!(!tally.is_zero());
    }

    #[test]
    fn test_tally_serializes_with_short_keys() {
        let json = serde_json::to_string(&Tally::new(3, 4)).unwrap();
        assert_eq!(json, r#"{"heads":3,"tails":4}"#);
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = FlipState::new(120, Tally::new(1, 1));
        assert_eq!(state.phase, FlipPhase::Idle);
        assert!(!state.phase.is_flipping());
        assert_eq!(state.rotation, 120);
    }
}
