//! Flip input handling
//!
//! Turns raw pointer, touch and keyboard input into the engine's
//! `PositionHint`, and suppresses touch double-taps.

use super::state::Outcome;
use crate::consts::{DOUBLE_TAP_DELAY_MS, KEYBOARD_EDGE_OFFSET_PX, LEFT_ZONE, RIGHT_ZONE};

/// Horizontal position of the activating input along the flip control.
///
/// `0.0` is the control's left edge, `1.0` its right edge. Values outside
/// that range are kept as-is and treated as "no hint" by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionHint {
    pub x_percent: f64,
}

impl PositionHint {
    pub fn new(x_percent: f64) -> Self {
        Self { x_percent }
    }

    /// Hint from a pointer `client_x` and the control's bounding rect.
    ///
    /// Returns `None` for a collapsed or non-finite rect.
    pub fn from_client_x(client_x: f64, rect_left: f64, rect_width: f64) -> Option<Self> {
        if !rect_width.is_finite() || rect_width <= 0.0 {
            return None;
        }
        Some(Self::new((client_x - rect_left) / rect_width))
    }

    /// Whether the hint lies on the control
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x_percent)
    }

    /// Outcome forced by an edge zone, if the hint is in one
    pub fn biased_outcome(&self) -> Option<Outcome> {
        if !self.is_valid() {
            return None;
        }
        if self.x_percent < LEFT_ZONE {
            Some(Outcome::Heads)
        } else if self.x_percent > RIGHT_ZONE {
            Some(Outcome::Tails)
        } else {
            None
        }
    }
}

/// Keyboard commands recognised by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Flip as if pressed near the left edge
    FlipLeft,
    /// Flip as if pressed near the right edge
    FlipRight,
    /// Flip without a positional hint
    Flip,
    /// Close the reset dialog
    Dismiss,
}

impl KeyAction {
    /// Map a `KeyboardEvent.code` to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(KeyAction::FlipLeft),
            "ArrowRight" => Some(KeyAction::FlipRight),
            "Space" | "Enter" | "NumpadEnter" => Some(KeyAction::Flip),
            "Escape" => Some(KeyAction::Dismiss),
            _ => None,
        }
    }

    /// Whether this action starts a flip
    pub fn is_flip(&self) -> bool {
        !matches!(self, KeyAction::Dismiss)
    }

    /// Hint to flip with, given the control's bounding rect
    pub fn position_hint(&self, rect_left: f64, rect_width: f64) -> Option<PositionHint> {
        let client_x = match self {
            KeyAction::FlipLeft => rect_left + KEYBOARD_EDGE_OFFSET_PX,
            KeyAction::FlipRight => rect_left + rect_width - KEYBOARD_EDGE_OFFSET_PX,
            KeyAction::Flip | KeyAction::Dismiss => return None,
        };
        PositionHint::from_client_x(client_x, rect_left, rect_width)
    }
}

/// Drops touch taps that arrive too soon after the previous one
#[derive(Debug, Clone, Default)]
pub struct TapDebounce {
    last_tap_ms: Option<f64>,
}

impl TapDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap at `now_ms`; returns `false` if it should be ignored
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_tap_ms {
            if now_ms - last < DOUBLE_TAP_DELAY_MS {
                return false;
            }
        }
        self.last_tap_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hint_from_client_x() {
        let hint = PositionHint::from_client_x(150.0, 100.0, 200.0).unwrap();
        assert!((hint.x_percent - 0.25).abs() < 1e-9);
        assert!(PositionHint::from_client_x(150.0, 100.0, 0.0).is_none());
        assert!(PositionHint::from_client_x(150.0, 100.0, f64::NAN).is_none());
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(PositionHint::new(0.0).biased_outcome(), Some(Outcome::Heads));
        assert_eq!(PositionHint::new(0.25).biased_outcome(), None);
        assert_eq!(PositionHint::new(0.5).biased_outcome(), None);
        assert_eq!(PositionHint::new(0.75).biased_outcome(), None);
        assert_eq!(PositionHint::new(1.0).biased_outcome(), Some(Outcome::Tails));
    }

    #[test]
    fn test_invalid_hints_are_unbiased() {
        assert!(!PositionHint::new(-0.1).is_valid());
        assert!(!PositionHint::new(1.5).is_valid());
        assert!(!PositionHint::new(f64::NAN).is_valid());
        assert_eq!(PositionHint::new(-0.1).biased_outcome(), None);
        assert_eq!(PositionHint::new(1.5).biased_outcome(), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_code("ArrowLeft"), Some(KeyAction::FlipLeft));
        assert_eq!(KeyAction::from_code("Enter"), Some(KeyAction::Flip));
        assert_eq!(KeyAction::from_code("Escape"), Some(KeyAction::Dismiss));
        assert_eq!(KeyAction::from_code("KeyA"), None);
        assert!(!KeyAction::Dismiss.is_flip());

        let left = KeyAction::FlipLeft.position_hint(0.0, 200.0).unwrap();
        let right = KeyAction::FlipRight.position_hint(0.0, 200.0).unwrap();
        assert_eq!(left.biased_outcome(), Some(Outcome::Heads));
        assert_eq!(right.biased_outcome(), Some(Outcome::Tails));
        assert!(KeyAction::Flip.position_hint(0.0, 200.0).is_none());
    }

    #[test]
    fn test_tap_debounce() {
        let mut taps = TapDebounce::new();
        assert!(taps.accept(1_000.0));
        assert!(!taps.accept(1_100.0));
        assert!(!taps.accept(1_299.0));
        assert!(taps.accept(1_300.0));
    }

    proptest! {
        #[test]
        fn left_zone_always_heads(x in 0.0f64..LEFT_ZONE) {
            prop_assert_eq!(PositionHint::new(x).biased_outcome(), Some(Outcome::Heads));
        }

        #[test]
        fn right_zone_always_tails(x in (RIGHT_ZONE + 1e-9)..=1.0f64) {
            prop_assert_eq!(PositionHint::new(x).biased_outcome(), Some(Outcome::Tails));
        }
    }
}
