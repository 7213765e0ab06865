//! Coin flip core
//!
//! All flip logic lives here. This module must stay pure and synchronous:
//! - Randomness only through `RandomSource`
//! - Storage only through `persistence::Store`
//! - No timers, rendering or platform dependencies

pub mod engine;
pub mod input;
pub mod random;
pub mod rotation;
pub mod state;

pub use engine::{FlipCompletion, FlipEngine, FlipStart};
pub use input::{KeyAction, PositionHint, TapDebounce};
pub use random::{RandomSource, SeededRandom};
pub use rotation::{FULL_TURN, calculate_target_rotation, wrap_rotation};
pub use state::{FlipPhase, FlipState, Outcome, Tally};
