//! One render frame: phase, shell, placements and constellation edges.
//!
//! The host's render loop calls [`tick`] once per frame. Everything is
//! recomputed from scratch; smoothing between frames is the host's job.

use serde::{Deserialize, Serialize};

use crate::config::BreathConfig;
use crate::density::{self, Density};
use crate::neighbors::{self, NeighborEdge};
use crate::phase::{self, BreathPhase};
use crate::presence::{Placement, Presence, assign_slots};
use crate::radius;
use crate::sphere;
use crate::vec3::Vec3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub phase: BreathPhase,
    pub radius: f64,
    /// Normalized shell expansion, 0 fully exhaled, 1 fully inhaled.
    pub expansion: f64,
    pub orbital_speed: f64,
    pub density: Density,
    /// Roster order.
    pub placements: Vec<Placement>,
    /// Indices refer to `placements`.
    pub edges: Vec<NeighborEdge>,
}

impl Frame {
    pub fn population(&self) -> usize {
        self.placements.len()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.placements.iter().map(|p| p.position).collect()
    }
}

/// Compute the frame at wall-clock `time` for `roster`.
///
/// A non-finite `time` reuses `last_good` (or the default phase when the
/// caller has none yet) so no NaN ever reaches a position.
pub fn tick(
    time: f64,
    roster: &[Presence],
    config: &BreathConfig,
    last_good: Option<BreathPhase>,
) -> Frame {
    let placement_cfg = &config.placement;
    let phase = phase::evaluate_or(time, &config.phase, last_good.unwrap_or_default());

    let shell = radius::radius(&phase, placement_cfg);
    let n = roster.len();
    let density = density::assess(shell, n, placement_cfg);

    let placements: Vec<Placement> = roster
        .iter()
        .zip(assign_slots(roster))
        .map(|(presence, slot)| {
            let direction = sphere::direction(slot, n);
            Placement {
                presence_id: presence.id.clone(),
                slot,
                direction,
                radius: shell,
                scale: density.scale,
                position: direction * shell,
            }
        })
        .collect();

    let positions: Vec<Vec3> = placements.iter().map(|p| p.position).collect();
    let lists = neighbors::k_nearest(&positions, placement_cfg.neighbor_count());
    let edges =
        neighbors::edges_from_lists(&positions, &lists, placement_cfg.max_edge_length());

    Frame {
        phase,
        radius: shell,
        expansion: radius::expansion(&phase, placement_cfg),
        orbital_speed: radius::orbital_speed(shell, placement_cfg),
        density,
        placements,
        edges,
    }
}
