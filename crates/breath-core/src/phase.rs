//! Wall-clock time → breath phase.
//!
//! Every client derives its phase from its own clock with no coordination
//! traffic. `evaluate` is a pure function of `(time, config)`, so two
//! processes with the same inputs produce bit-identical phases.

use serde::{Deserialize, Serialize};

use crate::config::PhaseConfig;

/// One of the four segments of a breath cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseKind {
    #[default]
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 4] = [Self::Inhale, Self::HoldIn, Self::Exhale, Self::HoldOut];

    pub fn index(self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::HoldIn => 1,
            Self::Exhale => 2,
            Self::HoldOut => 3,
        }
    }

    /// Wraps modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Text shown to the user while this phase is active.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::HoldIn | Self::HoldOut => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }

    pub fn is_hold(self) -> bool {
        matches!(self, Self::HoldIn | Self::HoldOut)
    }

    pub(crate) fn field_name(self) -> &'static str {
        match self {
            Self::Inhale => "inhale",
            Self::HoldIn => "hold_in",
            Self::Exhale => "exhale",
            Self::HoldOut => "hold_out",
        }
    }
}

/// Snapshot of where the cycle is at one instant. Never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathPhase {
    pub kind: PhaseKind,
    /// Fraction of the current phase elapsed, in [0, 1].
    pub progress: f64,
    /// Fraction of the whole cycle elapsed, in [0, 1].
    pub cycle_progress: f64,
}

impl BreathPhase {
    pub fn index(&self) -> usize {
        self.kind.index()
    }

    /// Seconds until the next phase begins.
    pub fn remaining(&self, config: &PhaseConfig) -> f64 {
        (1.0 - self.progress) * config.duration(self.kind)
    }
}

/// Phase at wall-clock `time` (seconds). Non-finite time yields the default
/// phase (inhale, progress 0).
pub fn evaluate(time: f64, config: &PhaseConfig) -> BreathPhase {
    evaluate_or(time, config, BreathPhase::default())
}

/// Like [`evaluate`], but a non-finite `time` returns `fallback`, normally
/// the caller's last known-good phase.
pub fn evaluate_or(time: f64, config: &PhaseConfig, fallback: BreathPhase) -> BreathPhase {
    if !time.is_finite() {
        tracing::trace!(time, "non-finite time, using fallback phase");
        return fallback;
    }

    let total = config.total_cycle();
    let mut cycle_time = time.rem_euclid(total);
    // rem_euclid of a tiny negative value can round up to exactly `total`,
    // and an exact multiple of a negative time yields -0.0.
    if !(cycle_time > 0.0 && cycle_time < total) {
        cycle_time = 0.0;
    }

    let durations = config.durations();
    let mut accumulated = 0.0;
    let mut last_nonzero = PhaseKind::Inhale;

    for kind in PhaseKind::ALL {
        let duration = durations[kind.index()];
        // Zero-width phases are instantaneous: never landed on, never divided by.
        if duration <= 0.0 {
            continue;
        }
        last_nonzero = kind;
        if cycle_time < accumulated + duration {
            let progress = ((cycle_time - accumulated) / duration).clamp(0.0, 1.0);
            let cycle_progress = ((accumulated + progress * duration) / total).clamp(0.0, 1.0);
            return BreathPhase {
                kind,
                progress,
                cycle_progress,
            };
        }
        accumulated += duration;
    }

    // Accumulated rounding pushed cycle_time past the final boundary.
    BreathPhase {
        kind: last_nonzero,
        progress: 1.0,
        cycle_progress: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn four_seven_eight() -> PhaseConfig {
        PhaseConfig::new([4.0, 7.0, 8.0, 0.0]).unwrap()
    }

    fn assert_phase(phase: BreathPhase, kind: PhaseKind, progress: f64) {
        assert_eq!(phase.kind, kind, "wrong phase: {phase:?}");
        assert_abs_diff_eq!(phase.progress, progress, epsilon = 1e-12);
    }

    #[test]
    fn test_four_seven_eight_boundaries() {
        let config = four_seven_eight();
        assert_phase(evaluate(0.0, &config), PhaseKind::Inhale, 0.0);
        assert_phase(evaluate(2.0, &config), PhaseKind::Inhale, 0.5);
        assert_phase(evaluate(4.0, &config), PhaseKind::HoldIn, 0.0);
        assert_phase(evaluate(11.0, &config), PhaseKind::Exhale, 0.0);
        assert_phase(evaluate(19.0, &config), PhaseKind::Inhale, 0.0);
    }

    #[test]
    fn test_cycle_progress() {
        let config = four_seven_eight();
        assert_abs_diff_eq!(evaluate(0.0, &config).cycle_progress, 0.0);
        assert_abs_diff_eq!(
            evaluate(9.5, &config).cycle_progress,
            0.5,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            evaluate(15.0, &config).cycle_progress,
            15.0 / 19.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_duration_phase_never_selected() {
        let config = four_seven_eight();
        for step in 0..1900 {
            let t = step as f64 * 0.01;
            assert_ne!(evaluate(t, &config).kind, PhaseKind::HoldOut, "t = {t}");
        }
    }

    #[test]
    fn test_leading_zero_phase_skipped() {
        let config = PhaseConfig::new([0.0, 3.0, 3.0, 0.0]).unwrap();
        assert_phase(evaluate(0.0, &config), PhaseKind::HoldIn, 0.0);
        assert_phase(evaluate(4.5, &config), PhaseKind::Exhale, 0.5);
    }

    #[test]
    fn test_negative_time_wraps_forward() {
        let config = four_seven_eight();
        // -1s is 18s into the cycle: 7/8 through the exhale
        assert_phase(evaluate(-1.0, &config), PhaseKind::Exhale, 7.0 / 8.0);
        assert_eq!(evaluate(-19.0, &config), evaluate(0.0, &config));
    }

    #[test]
    fn test_tiny_negative_time_does_not_overflow_cycle() {
        let config = four_seven_eight();
        let phase = evaluate(-1e-300, &config);
        assert!(phase.progress >= 0.0 && phase.progress <= 1.0);
        assert!(phase.cycle_progress >= 0.0 && phase.cycle_progress <= 1.0);
    }

    #[test]
    fn test_non_finite_time_uses_fallback() {
        let config = four_seven_eight();
        let last_good = evaluate(13.0, &config);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(evaluate(bad, &config), BreathPhase::default());
            assert_eq!(evaluate_or(bad, &config, last_good), last_good);
        }
    }

    #[test]
    fn test_wall_clock_scale_time() {
        // Typical Unix epoch seconds; the phase must still be well formed.
        let config = four_seven_eight();
        let phase = evaluate(1_771_632_000.25, &config);
        assert!((0.0..=1.0).contains(&phase.progress));
        assert_eq!(phase, evaluate(1_771_632_000.25, &config));
    }

    #[test]
    fn test_remaining_seconds() {
        let config = four_seven_eight();
        assert_abs_diff_eq!(evaluate(1.0, &config).remaining(&config), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(evaluate(12.0, &config).remaining(&config), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kind_cycles_forever() {
        let mut kind = PhaseKind::Inhale;
        let seen: Vec<usize> = (0..8)
            .map(|_| {
                let i = kind.index();
                kind = kind.next();
                i
            })
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PhaseKind::Inhale.label(), "Breathe In");
        assert_eq!(PhaseKind::HoldIn.label(), "Hold");
        assert_eq!(PhaseKind::Exhale.label(), "Breathe Out");
        assert!(PhaseKind::HoldOut.is_hold());
        assert!(!PhaseKind::Exhale.is_hold());
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = four_seven_eight();
        let json = serde_json::to_value(evaluate(5.0, &config)).unwrap();
        assert_eq!(json["kind"], "holdIn");
        assert!(json.get("cycleProgress").is_some());
    }
}
