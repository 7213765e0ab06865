//! Text for the presentation layer
//!
//! Button labels and live-region announcements, kept out of the DOM glue so
//! the native runner and tests can share them.

use crate::settings::Theme;
use crate::sim::{FlipPhase, Outcome, Tally};

pub const FLIP_LABEL: &str = "FLIP COIN";
pub const FLIPPING_LABEL: &str = "FLIPPING...";

pub const FLIPPING_ANNOUNCEMENT: &str = "Flipping coin...";
pub const RESET_ANNOUNCEMENT: &str = "Statistics reset to zero";

/// Flip button text for the current phase
pub fn flip_button_label(phase: FlipPhase) -> &'static str {
    match phase {
        FlipPhase::Idle => FLIP_LABEL,
        FlipPhase::Flipping { .. } => FLIPPING_LABEL,
    }
}

pub fn result_announcement(outcome: Outcome) -> String {
    format!("Result is {}", outcome.as_str())
}

pub fn theme_announcement(theme: Theme) -> String {
    format!("Theme changed to {}", theme.as_str())
}

/// Theme toggle icon: a sun in light mode, a moon in dark mode
pub fn theme_icon_svg(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => SUN_SVG,
        Theme::Dark => MOON_SVG,
    }
}

const SUN_SVG: &str = concat!(
    r#"<circle cx="12" cy="12" r="5"></circle>"#,
    r#"<line x1="12" y1="1" x2="12" y2="3"></line>"#,
    r#"<line x1="12" y1="21" x2="12" y2="23"></line>"#,
    r#"<line x1="4.22" y1="4.22" x2="5.64" y2="5.64"></line>"#,
    r#"<line x1="18.36" y1="18.36" x2="19.78" y2="19.78"></line>"#,
    r#"<line x1="1" y1="12" x2="3" y2="12"></line>"#,
    r#"<line x1="21" y1="12" x2="23" y2="12"></line>"#,
    r#"<line x1="4.22" y1="19.78" x2="5.64" y2="18.36"></line>"#,
    r#"<line x1="18.36" y1="5.64" x2="19.78" y2="4.22"></line>"#,
);

const MOON_SVG: &str = r#"<path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"></path>"#;

/// Selector for elements that take keyboard focus inside a dialog
pub const FOCUSABLE_SELECTOR: &str =
    r#"button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])"#;

/// Where Tab should move focus inside a dialog with `count` focusable
/// elements, given the index of the focused one.
///
/// Returns `None` when the browser's default Tab order already stays inside
/// the dialog. Focus outside the dialog is pulled back to the first (or,
/// with Shift, the last) element.
pub fn focus_trap_target(focused: Option<usize>, count: usize, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (focused, shift) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        (Some(_), _) => None,
        (None, true) => Some(last),
        (None, false) => Some(0),
    }
}

/// One-line summary, e.g. `Heads 3 (60.0%) | Tails 2 (40.0%)`
pub fn tally_summary(tally: &Tally) -> String {
    // u128 so a total of two saturated counts does not overflow
    let total = u128::from(tally.heads_count) + u128::from(tally.tails_count);
    let pct = |n: u64| {
        if total == 0 {
            0.0
        } else {
            n as f64 * 100.0 / total as f64
        }
    };
    format!(
        "Heads {} ({:.1}%) | Tails {} ({:.1}%)",
        tally.heads_count,
        pct(tally.heads_count),
        tally.tails_count,
        pct(tally.tails_count)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(flip_button_label(FlipPhase::Idle), "FLIP COIN");
        assert_eq!(
            flip_button_label(FlipPhase::Flipping { outcome: Outcome::Heads }),
            "FLIPPING..."
        );
        assert_eq!(result_announcement(Outcome::Tails), "Result is tails");
        assert_eq!(theme_announcement(Theme::Light), "Theme changed to light");
    }

    #[test]
    fn test_tally_summary() {
        assert_eq!(
            tally_summary(&Tally::new(3, 2)),
            "Heads 3 (60.0%) | Tails 2 (40.0%)"
        );
        assert_eq!(
            tally_summary(&Tally::default()),
            "Heads 0 (0.0%) | Tails 0 (0.0%)"
        );
    }

    #[test]
    fn test_tally_summary_with_saturated_counts() {
        let max = u64::MAX;
        assert_eq!(
            tally_summary(&Tally::new(max, max)),
            format!("Heads {max} (50.0%) | Tails {max} (50.0%)")
        );
        assert_eq!(
            tally_summary(&Tally::new(max, 0)),
            format!("Heads {max} (100.0%) | Tails 0 (0.0%)")
        );
    }

    #[test]
    fn test_focus_trap_wraps_at_edges() {
        // Cancel, Reset
        assert_eq!(focus_trap_target(Some(1), 2, false), Some(0));
        assert_eq!(focus_trap_target(Some(0), 2, true), Some(1));
        assert_eq!(focus_trap_target(Some(0), 2, false), None);
        assert_eq!(focus_trap_target(Some(1), 2, true), None);
    }

    #[test]
    fn test_focus_trap_recovers_escaped_focus() {
        assert_eq!(focus_trap_target(None, 3, false), Some(0));
        assert_eq!(focus_trap_target(None, 3, true), Some(2));
        assert_eq!(focus_trap_target(Some(0), 1, false), Some(0));
        assert_eq!(focus_trap_target(None, 0, false), None);
    }

    #[test]
    fn test_theme_icon() {
        assert!(theme_icon_svg(Theme::Light).starts_with("<circle"));
        assert!(theme_icon_svg(Theme::Dark).starts_with("<path"));
    }
}
