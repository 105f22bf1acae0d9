use serde::{Deserialize, Serialize};

use crate::vec3::Vec3;

/// One connected participant, as reported by the presence service.
///
/// `stable_index` orders presences on the lattice; `id` is opaque here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    pub stable_index: u64,
    pub id: String,
}

impl Presence {
    pub fn new(stable_index: u64, id: impl Into<String>) -> Self {
        Self {
            stable_index,
            id: id.into(),
        }
    }
}

/// Where one presence is drawn this frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub presence_id: String,
    /// Lattice slot: rank of the presence's `stable_index` in the roster.
    pub slot: usize,
    pub direction: Vec3,
    pub radius: f64,
    pub scale: f64,
    pub position: Vec3,
}

/// Lattice slot for every roster entry, in roster order.
///
/// Slots are ranks by `stable_index` (ties keep roster order), so they are
/// dense in `0..roster.len()` even when the service hands out sparse indices.
pub fn assign_slots(roster: &[Presence]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..roster.len()).collect();
    order.sort_by_key(|&i| roster[i].stable_index);

    let mut slots = vec![0; roster.len()];
    for (rank, &i) in order.iter().enumerate() {
        slots[i] = rank;
    }
    slots
}
