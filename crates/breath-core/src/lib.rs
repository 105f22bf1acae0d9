//! Breath synchronization and presence placement engine.
//!
//! Derives a shared breathing phase from wall-clock time alone, so any
//! number of independent clients stay in lock-step without talking to each
//! other, and lays a changing population of presences out on a pulsing
//! Fibonacci-lattice shell whose shards shrink before they would overlap.
//!
//! Zero I/O, pure math. The host owns the render loop, the clock and
//! the presence roster.

pub mod config;
pub mod constants;
pub mod density;
pub mod error;
pub mod frame;
pub mod neighbors;
pub mod phase;
pub mod presence;
pub mod radius;
pub mod sphere;
pub mod vec3;

pub use config::{BreathConfig, PhaseConfig, PhaseDurations, PlacementConfig, PlacementParams};
pub use constants::{EPSILON, GOLDEN_ANGLE};
pub use density::{Density, ideal_spacing_radius, required_spacing, scale_factor};
pub use error::{ConfigError, Result};
pub use frame::{Frame, tick};
pub use neighbors::{NeighborEdge, edges, edges_within, k_nearest};
pub use phase::{BreathPhase, PhaseKind, evaluate, evaluate_or};
pub use presence::{Placement, Presence, assign_slots};
pub use radius::{ease_in_out_cubic, expansion, orbital_speed, radius};
pub use sphere::{direction, lattice};
pub use vec3::Vec3;
