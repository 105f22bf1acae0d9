//! Breath phase → orbit shell radius.
//!
//! The shell expands on the inhale, rests at `max_radius` through the hold,
//! contracts on the exhale and rests at `min_radius` afterwards. Both moving
//! phases use ease-in-out-cubic so the shell starts and stops gently.

use crate::config::PlacementConfig;
use crate::phase::{BreathPhase, PhaseKind};

/// `4t³` for the first half, `1 - (2 - 2t)³/2` for the second.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Endpoint-exact interpolation: `t = 0` gives `a`, `t = 1` gives `b`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Orbit radius for `phase`.
pub fn radius(phase: &BreathPhase, cfg: &PlacementConfig) -> f64 {
    let (min, max) = (cfg.min_radius(), cfg.max_radius());
    match phase.kind {
        PhaseKind::Inhale => lerp(min, max, ease_in_out_cubic(phase.progress)),
        PhaseKind::HoldIn => max,
        PhaseKind::Exhale => lerp(max, min, ease_in_out_cubic(phase.progress)),
        PhaseKind::HoldOut => min,
    }
}

/// How far the shell is between its floor (0) and ceiling (1).
pub fn expansion(phase: &BreathPhase, cfg: &PlacementConfig) -> f64 {
    let span = cfg.max_radius() - cfg.min_radius();
    if span <= 0.0 {
        return 0.0;
    }
    ((radius(phase, cfg) - cfg.min_radius()) / span).clamp(0.0, 1.0)
}

/// Secondary rotation speed multiplier at `radius`.
///
/// Follows `v = sqrt(GM / r)`, mapped so the shell ceiling turns at
/// `min_velocity_factor` and the floor at `max_velocity_factor`. Only drives
/// drift around the globe, never the radius itself.
pub fn orbital_speed(radius: f64, cfg: &PlacementConfig) -> f64 {
    let p = cfg.params();
    let (lo, hi) = (p.min_velocity_factor, p.max_velocity_factor);
    let gm = p.gravitational_parameter;

    let v_far = (gm / p.max_radius).sqrt();
    let v_near = (gm / p.min_radius).sqrt();
    let spread = v_near - v_far;
    if spread <= 0.0 || !spread.is_finite() {
        return lerp(lo, hi, 0.5);
    }

    let r = radius.max(cfg.min_orbit_radius());
    let v = (gm / r).sqrt();
    lerp(lo, hi, ((v - v_far) / spread).clamp(0.0, 1.0))
}
