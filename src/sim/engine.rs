//! Flip engine
//!
//! Owns the flip state machine:
//!
//! ```text
//! Idle --begin_flip--> Flipping { outcome } --complete_flip--> Idle
//! ```
//!
//! The engine never schedules anything. The presentation layer animates to
//! the returned target rotation and calls `complete_flip` once the animation
//! duration has elapsed. Until it does, every `begin_flip` is rejected.

use super::input::PositionHint;
use super::random::RandomSource;
use super::rotation::{calculate_target_rotation, spin_base, wrap_rotation};
use super::state::{FlipPhase, FlipState, Outcome, Tally};
use crate::consts::{MAX_SPINS, MIN_SPINS};
use crate::persistence::Store;

/// A flip that has just started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipStart {
    pub outcome: Outcome,
    /// Absolute angle to animate to
    pub target_rotation: u32,
    /// Full turns added before the landing correction
    pub extra_spins: u32,
    /// Set when the stored angle was wrapped before spinning. The coin
    /// should jump here without a transition, then animate to the target.
    pub wrapped_rotation: Option<u32>,
}

/// Result of `complete_flip`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipCompletion {
    /// Landed outcome, `None` if there was no flip in progress
    pub outcome: Option<Outcome>,
    pub tally: Tally,
}

/// Coin flip state machine with injected randomness and storage
pub struct FlipEngine<R, S> {
    state: FlipState,
    rng: R,
    store: S,
}

impl<R: RandomSource, S: Store> FlipEngine<R, S> {
    /// Create an idle engine hydrated from `store`
    pub fn new(rng: R, store: S) -> Self {
        let tally = store.load_tally();
        let rotation = store.load_rotation();
        log::info!(
            "Flip engine ready (heads {}, tails {}, rotation {}°)",
            tally.heads_count,
            tally.tails_count,
            rotation
        );
        Self::with_state(FlipState::new(rotation, tally), rng, store)
    }

    /// Create an engine from an explicit state, skipping hydration
    pub fn with_state(state: FlipState, rng: R, store: S) -> Self {
        Self { state, rng, store }
    }

    pub fn state(&self) -> &FlipState {
        &self.state
    }

    pub fn phase(&self) -> FlipPhase {
        self.state.phase
    }

    pub fn is_flipping(&self) -> bool {
        self.state.phase.is_flipping()
    }

    pub fn rotation(&self) -> u32 {
        self.state.rotation
    }

    pub fn tally(&self) -> Tally {
        self.state.tally
    }

    /// Face currently shown (the landing face while a flip is in the air)
    pub fn facing(&self) -> Outcome {
        Outcome::facing(self.state.rotation)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Pick an outcome, biased by `hint` near the control's edges
    pub fn determine_outcome(&mut self, hint: Option<PositionHint>) -> Outcome {
        if let Some(outcome) = hint.and_then(|h| h.biased_outcome()) {
            return outcome;
        }
        if self.rng.uniform_bool() {
            Outcome::Heads
        } else {
            Outcome::Tails
        }
    }

    /// Start a flip.
    ///
    /// Returns `None` without touching any state if a flip is already in
    /// progress.
    pub fn begin_flip(&mut self, hint: Option<PositionHint>) -> Option<FlipStart> {
        if self.is_flipping() {
            log::debug!("Flip already in progress, ignoring");
            return None;
        }

        let wrapped_rotation = wrap_rotation(self.state.rotation);
        if let Some(wrapped) = wrapped_rotation {
            log::debug!("Wrapping rotation {}° to {}°", self.state.rotation, wrapped);
            self.state.rotation = wrapped;
        }

        let outcome = self.determine_outcome(hint);
        let extra_spins = self
            .rng
            .random_int_in_range(MIN_SPINS, MAX_SPINS)
            .clamp(MIN_SPINS, MAX_SPINS);
        let base = spin_base(self.state.rotation, extra_spins);
        let target_rotation = calculate_target_rotation(base, outcome);

        self.state.rotation = target_rotation;
        self.state.phase = FlipPhase::Flipping { outcome };

        Some(FlipStart {
            outcome,
            target_rotation,
            extra_spins,
            wrapped_rotation,
        })
    }

    /// Land the in-flight flip, record it and persist.
    ///
    /// A stray call while idle changes nothing and returns the current tally.
    pub fn complete_flip(&mut self) -> FlipCompletion {
        let FlipPhase::Flipping { outcome } = self.state.phase else {
            log::debug!("No flip in progress, ignoring completion");
            return FlipCompletion {
                outcome: None,
                tally: self.state.tally,
            };
        };

        self.state.phase = FlipPhase::Idle;
        self.state.tally.record(outcome);
        self.persist_tally();
        if let Err(e) = self.store.save_rotation(self.state.rotation) {
            log::warn!("Failed to save rotation: {e}");
        }

        FlipCompletion {
            outcome: Some(outcome),
            tally: self.state.tally,
        }
    }

    /// Zero the tally. Rotation and phase are left alone.
    pub fn reset_tally(&mut self) -> Tally {
        self.state.tally = Tally::default();
        self.persist_tally();
        log::info!("Tally reset");
        self.state.tally
    }

    /// Whether the reset confirmation may be shown right now
    pub fn can_request_reset(&self) -> bool {
        !self.is_flipping() && !self.state.tally.is_zero()
    }

    fn persist_tally(&mut self) {
        if let Err(e) = self.store.save_tally(&self.state.tally) {
            log::warn!("Failed to save tally: {e}");
        }
    }
}
