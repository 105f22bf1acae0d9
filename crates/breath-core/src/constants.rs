/// Golden angle in radians: π(3 - √5), equivalently 2π / φ²
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653_3;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;

/// Tolerance for unit-length checks on lattice directions
pub const UNIT_TOLERANCE: f64 = 1e-5;

/// 4-7-8 breathing: inhale, hold, exhale, no trailing hold.
pub const DEFAULT_DURATIONS: [f64; 4] = [4.0, 7.0, 8.0, 0.0];

/// Breathing floor for the orbit shell.
pub const DEFAULT_MIN_RADIUS: f64 = 2.5;

/// Breathing ceiling for the orbit shell.
pub const DEFAULT_MAX_RADIUS: f64 = 6.0;

/// Radius of the central globe.
pub const DEFAULT_CORE_RADIUS: f64 = 1.5;

/// Half-extent of one rendered shard.
pub const DEFAULT_SHARD_SIZE: f64 = 0.18;

/// Extra clearance for per-shard wobble animation.
pub const DEFAULT_WOBBLE_MARGIN: f64 = 0.22;

/// Empirical packing constant for the Fibonacci lattice.
pub const DEFAULT_FIBONACCI_SPACING_FACTOR: f64 = 1.95;

/// Shards never shrink below this fraction of full size.
pub const DEFAULT_MIN_SCALE: f64 = 0.3;

/// Neighbors per presence in the constellation graph.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 4;

/// Gap kept between the globe surface plus one shard and the orbit floor.
pub const DEFAULT_FLOOR_BUFFER: f64 = 0.1;

/// GM for the orbital speed curve. Only the ratio matters after normalization.
pub const DEFAULT_GRAVITATIONAL_PARAMETER: f64 = 1.0;

pub const DEFAULT_MIN_VELOCITY_FACTOR: f64 = 0.5;

pub const DEFAULT_MAX_VELOCITY_FACTOR: f64 = 1.5;
