//! Coin rotation arithmetic
//!
//! The coin spins around its X axis. A rotation is an absolute, cumulative
//! angle in degrees; only `rotation % 360` matters for which face is up.

use super::state::Outcome;
use crate::consts::{MAX_ROTATION, MAX_SPINS, MIN_SPINS};

/// Degrees in one full spin
pub const FULL_TURN: u32 = 360;

/// Target angle for a flip that has already spun to `base`.
///
/// Rounds `base` down to a whole turn, then moves forward one more turn
/// (plus a half turn for tails). The result is always strictly greater than
/// `base` and rests on the face for `outcome`.
pub fn calculate_target_rotation(base: u32, outcome: Outcome) -> u32 {
    let whole_turns = base - base % FULL_TURN;
    whole_turns + FULL_TURN + outcome.resting_angle()
}

/// Reduce a rotation that has grown past `MAX_ROTATION`.
///
/// Returns `None` when no wrap was needed. The wrapped angle has the same
/// facing as the input.
pub fn wrap_rotation(rotation: u32) -> Option<u32> {
    (rotation > MAX_ROTATION).then_some(rotation % FULL_TURN)
}

/// Rotation after `extra_spins` full turns, before landing correction.
///
/// The spin count is held to `MIN_SPINS..=MAX_SPINS`.
pub fn spin_base(rotation: u32, extra_spins: u32) -> u32 {
    rotation + extra_spins.clamp(MIN_SPINS, MAX_SPINS) * FULL_TURN
}
