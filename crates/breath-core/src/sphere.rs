//! Fibonacci-lattice placement on the unit sphere.
//!
//! Slot `i` of `n` sits at height `1 - (2i+1)/n` and longitude `i·GOLDEN_ANGLE`.
//! Golden-angle spacing keeps successive slots maximally separated, giving
//! near-uniform coverage for any `n` without iterative relaxation.
//!
//! The height depends on `n`, so every direction shifts slightly whenever the
//! population changes. That shimmer is accepted; callers wanting fixed
//! directions must freeze them at join time themselves.

use crate::constants::GOLDEN_ANGLE;
use crate::vec3::Vec3;

/// Unit direction for lattice slot `i` of `n`.
///
/// Saturates outside `0 <= i < n`: `n = 0` is treated as a single slot and
/// `i >= n` as the last slot.
pub fn direction(i: usize, n: usize) -> Vec3 {
    let n = n.max(1);
    let i = i.min(n - 1);

    let y = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = i as f64 * GOLDEN_ANGLE;

    Vec3 {
        x: theta.cos() * r,
        y,
        z: theta.sin() * r,
    }
}

/// All `n` lattice directions, slot order.
pub fn lattice(n: usize) -> Vec<Vec3> {
    (0..n).map(|i| direction(i, n)).collect()
}
