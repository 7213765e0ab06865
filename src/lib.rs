//! Flipper - A coin flip widget with a persistent tally
//!
//! Core modules:
//! - `sim`: Flip state machine, outcome selection and rotation arithmetic
//! - `persistence`: Tally/rotation/theme storage with load-time validation
//! - `settings`: Theme and motion preferences
//! - `ui`: Text shown and announced by the presentation layer
//! - `audio`: Flip and landing tones (web only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod ui;

pub use persistence::{MemoryStore, StorageError, Store};
pub use settings::{Settings, Theme, ThemeToggle};
pub use sim::{FlipEngine, Outcome, PositionHint, Tally};

/// Widget configuration constants
pub mod consts {
    /// Flip animation length
    pub const ANIMATION_DURATION_MS: u32 = 3000;
    /// Flip animation length with reduced motion
    pub const ANIMATION_DURATION_REDUCED_MS: u32 = 500;
    /// Landing bounce after the flip animation
    pub const SETTLE_DURATION_MS: u32 = 300;
    /// Highlight on a tally counter after it changes
    pub const STATS_UPDATE_DURATION_MS: u32 = 400;
    /// Shake on the reset dialog icon
    pub const SHAKE_DURATION_MS: u32 = 500;
    /// How long an announcement stays in the live region
    pub const ARIA_TIMEOUT_MS: u32 = 1000;
    /// Theme icon fade before its artwork is swapped
    pub const THEME_ICON_SWAP_MS: u32 = 200;

    /// Minimum time between theme toggles
    pub const THEME_DEBOUNCE_MS: f64 = 500.0;
    /// Touch taps closer together than this are dropped
    pub const DOUBLE_TAP_DELAY_MS: f64 = 300.0;

    /// Stored rotation is wrapped mod 360 once it passes this
    pub const MAX_ROTATION: u32 = 100_000;
    /// Full turns per flip (inclusive range)
    pub const MIN_SPINS: u32 = 5;
    pub const MAX_SPINS: u32 = 9;

    /// Left edge zone of the flip control (always heads)
    pub const LEFT_ZONE: f64 = 0.25;
    /// Right edge zone of the flip control (always tails)
    pub const RIGHT_ZONE: f64 = 0.75;
    /// Where arrow keys "press" the control, measured in from its edge
    pub const KEYBOARD_EDGE_OFFSET_PX: f64 = 10.0;
}
