//! Crowding control for the orbit shell.
//!
//! A Fibonacci lattice of `n` points on a sphere of radius `R` has neighbor
//! spacing of roughly `R · spacing_factor / sqrt(n)`. When that spacing drops
//! below what two shards plus their wobble need, every shard shrinks by the
//! same ratio instead of overlapping. Shrinking stops at `min_scale`.

use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;

/// Center-to-center distance two shards need to never touch.
pub fn required_spacing(cfg: &PlacementConfig) -> f64 {
    2.0 * cfg.shard_size() + cfg.wobble_margin()
}

/// Shell radius at which `population` shards fit at full size.
pub fn ideal_spacing_radius(population: usize, cfg: &PlacementConfig) -> f64 {
    required_spacing(cfg) * (population as f64).sqrt() / cfg.fibonacci_spacing_factor()
}

/// Per-shard scale in `[min_scale, 1]` for a shell of `current_radius`.
pub fn scale_factor(current_radius: f64, population: usize, cfg: &PlacementConfig) -> f64 {
    let min_scale = cfg.min_scale();
    if population == 0 {
        return 1.0;
    }
    if !current_radius.is_finite() || current_radius <= 0.0 {
        return min_scale;
    }

    let ideal = ideal_spacing_radius(population, cfg);
    if current_radius < ideal {
        (current_radius / ideal).clamp(min_scale, 1.0)
    } else {
        1.0
    }
}

/// Scale plus the numbers behind it, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Density {
    pub scale: f64,
    pub ideal_spacing_radius: f64,
    /// Shards are being shrunk at this radius.
    pub crowded: bool,
}

pub fn assess(current_radius: f64, population: usize, cfg: &PlacementConfig) -> Density {
    let scale = scale_factor(current_radius, population, cfg);
    Density {
        scale,
        ideal_spacing_radius: ideal_spacing_radius(population, cfg),
        crowded: scale < 1.0,
    }
}
