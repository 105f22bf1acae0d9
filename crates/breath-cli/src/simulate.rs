//! Seeded join/leave churn against the frame engine.
//!
//! Drives `tick` the way a render loop would, with presences arriving and
//! departing at random, and records what the engine did under that load.

use std::time::{Duration, Instant};

use breath_core::{BreathConfig, Presence, tick};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub frames: usize,
    pub fps: f64,
    pub start_time: f64,
    pub population: usize,
    /// Per-frame probability of one join, and independently of one leave.
    pub churn: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub frames: usize,
    pub final_population: usize,
    pub peak_population: usize,
    pub joins: usize,
    pub leaves: usize,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Shortest constellation edge seen; `None` if no frame had edges.
    pub min_edge: Option<f64>,
    pub mean_frame: Duration,
    pub max_frame: Duration,
}

fn random_id(rng: &mut impl Rng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

pub fn run(config: &BreathConfig, opts: &SimulationOptions, rng: &mut impl Rng) -> SimulationReport {
    let mut next_index: u64 = 0;
    let mut roster: Vec<Presence> = Vec::with_capacity(opts.population * 2);
    for _ in 0..opts.population {
        roster.push(Presence::new(next_index, random_id(rng)));
        next_index += 1;
    }

    let mut report = SimulationReport {
        frames: opts.frames,
        final_population: roster.len(),
        peak_population: roster.len(),
        joins: 0,
        leaves: 0,
        min_scale: 1.0,
        max_scale: 0.0,
        min_edge: None,
        mean_frame: Duration::ZERO,
        max_frame: Duration::ZERO,
    };
    let mut total = Duration::ZERO;
    let mut last_good = None;

    for frame_no in 0..opts.frames {
        if rng.random_bool(opts.churn) {
            roster.push(Presence::new(next_index, random_id(rng)));
            next_index += 1;
            report.joins += 1;
        }
        if !roster.is_empty() && rng.random_bool(opts.churn) {
            let idx = rng.random_range(0..roster.len());
            roster.remove(idx);
            report.leaves += 1;
        }

        let t = opts.start_time + frame_no as f64 / opts.fps;
        let started = Instant::now();
        let frame = tick(t, &roster, config, last_good);
        let elapsed = started.elapsed();
        last_good = Some(frame.phase);

        total += elapsed;
        report.max_frame = report.max_frame.max(elapsed);
        report.peak_population = report.peak_population.max(roster.len());
        if !roster.is_empty() {
            report.min_scale = report.min_scale.min(frame.density.scale);
            report.max_scale = report.max_scale.max(frame.density.scale);
        }
        if let Some(shortest) = frame.edges.iter().map(|e| e.distance).reduce(f64::min) {
            report.min_edge = Some(report.min_edge.map_or(shortest, |m| m.min(shortest)));
        }

        tracing::debug!(
            frame = frame_no,
            population = roster.len(),
            phase = frame.phase.kind.label(),
            radius = frame.radius,
            scale = frame.density.scale,
            micros = elapsed.as_micros() as u64,
            "frame"
        );
    }

    report.final_population = roster.len();
    if opts.frames > 0 {
        report.mean_frame = total / opts.frames as u32;
    }
    report
}
