//! Thinking tips shown while an analysis is outstanding.
//!
//! The backend owns the canonical list so every client rotates the same
//! tips at the same cadence. The rotation timer itself is cosmetic and
//! lives client-side.

use std::time::Duration;

/// Tips rotated while the model is thinking, in display order.
pub const THINKING_TIPS: [&str; 6] = [
    "Considering your future self's perspective",
    "Evaluating long-term consequences",
    "Analyzing potential regrets for each option",
    "Weighing emotional vs rational factors",
    "Thinking 10 years into the future",
    "Considering what you might regret NOT doing",
];

/// How long each tip is displayed before rotating.
pub const TIP_ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

/// Returns the tip for a rotation step, wrapping around the list.
pub fn tip_at(step: usize) -> &'static str {
    THINKING_TIPS[step % THINKING_TIPS.len()]
}
