//! Validated engine configuration.
//!
//! Both configs are built once at startup from plain parameter structs and
//! are immutable afterwards. Deserialization goes through the same
//! validation, so a bad config file fails at load time, not mid-frame.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CORE_RADIUS, DEFAULT_DURATIONS, DEFAULT_FIBONACCI_SPACING_FACTOR,
    DEFAULT_FLOOR_BUFFER, DEFAULT_GRAVITATIONAL_PARAMETER, DEFAULT_MAX_RADIUS,
    DEFAULT_MAX_VELOCITY_FACTOR, DEFAULT_MIN_RADIUS, DEFAULT_MIN_SCALE,
    DEFAULT_MIN_VELOCITY_FACTOR, DEFAULT_NEIGHBOR_COUNT, DEFAULT_SHARD_SIZE,
    DEFAULT_WOBBLE_MARGIN,
};
use crate::error::{ConfigError, Result, finite, non_negative};
use crate::phase::PhaseKind;

/// Raw phase durations in seconds, as written in a config file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub inhale: f64,
    pub hold_in: f64,
    pub exhale: f64,
    pub hold_out: f64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        let [inhale, hold_in, exhale, hold_out] = DEFAULT_DURATIONS;
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
        }
    }
}

/// Four-phase breath timing with a strictly positive total cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PhaseDurations", into = "PhaseDurations")]
pub struct PhaseConfig {
    durations: [f64; 4],
    total_cycle: f64,
}

impl PhaseConfig {
    /// Validate `[inhale, hold_in, exhale, hold_out]`. Any single phase may be
    /// zero; the sum may not.
    pub fn new(durations: [f64; 4]) -> Result<Self> {
        for (kind, &d) in PhaseKind::ALL.iter().zip(durations.iter()) {
            non_negative(kind.field_name(), d)?;
        }
        let total_cycle: f64 = durations.iter().sum();
        if !total_cycle.is_finite() {
            return Err(ConfigError::NonFiniteValue {
                field: "total_cycle",
            });
        }
        if total_cycle <= 0.0 {
            return Err(ConfigError::NonPositiveCycle { total: total_cycle });
        }
        tracing::debug!(?durations, total_cycle, "phase config validated");
        Ok(Self {
            durations,
            total_cycle,
        })
    }

    pub fn durations(&self) -> [f64; 4] {
        self.durations
    }

    pub fn total_cycle(&self) -> f64 {
        self.total_cycle
    }

    pub fn duration(&self, kind: PhaseKind) -> f64 {
        self.durations[kind.index()]
    }

    /// Offset of `kind` from the start of the cycle, in seconds.
    pub fn phase_start(&self, kind: PhaseKind) -> f64 {
        self.durations[..kind.index()].iter().sum()
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        let total_cycle = DEFAULT_DURATIONS.iter().sum();
        Self {
            durations: DEFAULT_DURATIONS,
            total_cycle,
        }
    }
}

impl TryFrom<PhaseDurations> for PhaseConfig {
    type Error = ConfigError;

    fn try_from(raw: PhaseDurations) -> Result<Self> {
        Self::new([raw.inhale, raw.hold_in, raw.exhale, raw.hold_out])
    }
}

impl From<PhaseConfig> for PhaseDurations {
    fn from(config: PhaseConfig) -> Self {
        let [inhale, hold_in, exhale, hold_out] = config.durations;
        Self {
            inhale,
            hold_in,
            exhale,
            hold_out,
        }
    }
}

/// Raw placement parameters, as written in a config file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    pub min_radius: f64,
    pub max_radius: f64,
    pub core_radius: f64,
    pub shard_size: f64,
    pub wobble_margin: f64,
    pub fibonacci_spacing_factor: f64,
    pub min_scale: f64,
    pub neighbor_count: usize,
    pub floor_buffer: f64,
    pub gravitational_parameter: f64,
    pub min_velocity_factor: f64,
    pub max_velocity_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_edge_length: Option<f64>,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            core_radius: DEFAULT_CORE_RADIUS,
            shard_size: DEFAULT_SHARD_SIZE,
            wobble_margin: DEFAULT_WOBBLE_MARGIN,
            fibonacci_spacing_factor: DEFAULT_FIBONACCI_SPACING_FACTOR,
            min_scale: DEFAULT_MIN_SCALE,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            floor_buffer: DEFAULT_FLOOR_BUFFER,
            gravitational_parameter: DEFAULT_GRAVITATIONAL_PARAMETER,
            min_velocity_factor: DEFAULT_MIN_VELOCITY_FACTOR,
            max_velocity_factor: DEFAULT_MAX_VELOCITY_FACTOR,
            max_edge_length: None,
        }
    }
}

/// Orbit shell, shard spacing and neighbor graph parameters.
///
/// Invariant: `min_radius > core_radius + shard_size + floor_buffer`, so a
/// fully exhaled shell never clips into the globe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlacementParams", into = "PlacementParams")]
pub struct PlacementConfig {
    params: PlacementParams,
}

impl PlacementConfig {
    pub fn new(params: PlacementParams) -> Result<Self> {
        let p = params;
        non_negative("min_radius", p.min_radius)?;
        non_negative("max_radius", p.max_radius)?;
        non_negative("core_radius", p.core_radius)?;
        non_negative("shard_size", p.shard_size)?;
        non_negative("wobble_margin", p.wobble_margin)?;
        non_negative("floor_buffer", p.floor_buffer)?;
        non_negative("min_velocity_factor", p.min_velocity_factor)?;
        non_negative("max_velocity_factor", p.max_velocity_factor)?;

        if finite("fibonacci_spacing_factor", p.fibonacci_spacing_factor)? <= 0.0 {
            return Err(ConfigError::NonPositiveSpacingFactor {
                value: p.fibonacci_spacing_factor,
            });
        }
        let min_scale = finite("min_scale", p.min_scale)?;
        if min_scale <= 0.0 || min_scale > 1.0 {
            return Err(ConfigError::InvalidMinScale { value: min_scale });
        }
        if p.neighbor_count == 0 {
            return Err(ConfigError::ZeroNeighborCount);
        }
        if finite("gravitational_parameter", p.gravitational_parameter)? <= 0.0 {
            return Err(ConfigError::NonPositiveGravitationalParameter {
                value: p.gravitational_parameter,
            });
        }
        if p.min_radius > p.max_radius {
            return Err(ConfigError::InvertedRadii {
                min: p.min_radius,
                max: p.max_radius,
            });
        }
        let floor = p.core_radius + p.shard_size + p.floor_buffer;
        if p.min_radius <= floor {
            return Err(ConfigError::MinRadiusAtFloor {
                min_radius: p.min_radius,
                floor,
            });
        }
        if p.min_velocity_factor > p.max_velocity_factor {
            return Err(ConfigError::InvertedVelocityFactors {
                min: p.min_velocity_factor,
                max: p.max_velocity_factor,
            });
        }
        if let Some(len) = p.max_edge_length
            && !(len.is_finite() && len > 0.0)
        {
            return Err(ConfigError::InvalidEdgeLength { value: len });
        }

        tracing::debug!(
            min_radius = p.min_radius,
            max_radius = p.max_radius,
            floor,
            k = p.neighbor_count,
            "placement config validated"
        );
        Ok(Self { params })
    }

    pub fn params(&self) -> &PlacementParams {
        &self.params
    }

    pub fn min_radius(&self) -> f64 {
        self.params.min_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.params.max_radius
    }

    pub fn shard_size(&self) -> f64 {
        self.params.shard_size
    }

    pub fn wobble_margin(&self) -> f64 {
        self.params.wobble_margin
    }

    pub fn fibonacci_spacing_factor(&self) -> f64 {
        self.params.fibonacci_spacing_factor
    }

    pub fn min_scale(&self) -> f64 {
        self.params.min_scale
    }

    pub fn neighbor_count(&self) -> usize {
        self.params.neighbor_count
    }

    pub fn max_edge_length(&self) -> Option<f64> {
        self.params.max_edge_length
    }

    /// Hard floor for the orbit shell: globe surface plus one shard plus buffer.
    pub fn min_orbit_radius(&self) -> f64 {
        self.params.core_radius + self.params.shard_size + self.params.floor_buffer
    }
}

impl TryFrom<PlacementParams> for PlacementConfig {
    type Error = ConfigError;

    fn try_from(params: PlacementParams) -> Result<Self> {
        Self::new(params)
    }
}

impl From<PlacementConfig> for PlacementParams {
    fn from(config: PlacementConfig) -> Self {
        config.params
    }
}

/// Everything a frame needs, passed explicitly into every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    pub phase: PhaseConfig,
    pub placement: PlacementConfig,
}

impl BreathConfig {
    pub fn new(phase: PhaseConfig, placement: PlacementConfig) -> Self {
        Self { phase, placement }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let phase = PhaseConfig::new(DEFAULT_DURATIONS).unwrap();
        assert_eq!(phase, PhaseConfig::default());
        assert_eq!(phase.total_cycle(), 19.0);

        let placement = PlacementConfig::new(PlacementParams::default()).unwrap();
        assert_eq!(placement, PlacementConfig::default());
    }

    #[test]
    fn test_zero_duration_phase_allowed() {
        let phase = PhaseConfig::new([4.0, 0.0, 4.0, 0.0]).unwrap();
        assert_eq!(phase.total_cycle(), 8.0);
    }

    #[test]
    fn test_all_zero_cycle_rejected() {
        assert_eq!(
            PhaseConfig::new([0.0; 4]),
            Err(ConfigError::NonPositiveCycle { total: 0.0 })
        );
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = PhaseConfig::new([4.0, -1.0, 8.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeValue {
                field: "hold_in",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_infinite_duration_rejected() {
        let err = PhaseConfig::new([f64::INFINITY, 0.0, 1.0, 0.0]).unwrap_err();
        assert_eq!(err, ConfigError::NonFiniteValue { field: "inhale" });
    }

    #[test]
    fn test_phase_start_offsets() {
        let phase = PhaseConfig::default();
        assert_eq!(phase.phase_start(PhaseKind::Inhale), 0.0);
        assert_eq!(phase.phase_start(PhaseKind::HoldIn), 4.0);
        assert_eq!(phase.phase_start(PhaseKind::Exhale), 11.0);
        assert_eq!(phase.phase_start(PhaseKind::HoldOut), 19.0);
    }

    #[test]
    fn test_min_radius_at_floor_rejected() {
        let params = PlacementParams {
            min_radius: 1.7,
            ..PlacementParams::default()
        };
        match PlacementConfig::new(params) {
            Err(ConfigError::MinRadiusAtFloor { floor, .. }) => {
                assert!((floor - 1.78).abs() < 1e-12);
            }
            other => panic!("expected MinRadiusAtFloor, got {other:?}"),
        }
    }

    #[test]
    fn test_min_orbit_radius_below_min_radius() {
        let placement = PlacementConfig::default();
        assert!(placement.min_orbit_radius() < placement.min_radius());
    }

    #[test]
    fn test_zero_neighbor_count_rejected() {
        let params = PlacementParams {
            neighbor_count: 0,
            ..PlacementParams::default()
        };
        assert_eq!(
            PlacementConfig::new(params),
            Err(ConfigError::ZeroNeighborCount)
        );
    }

    #[test]
    fn test_negative_shard_size_rejected() {
        let params = PlacementParams {
            shard_size: -0.1,
            ..PlacementParams::default()
        };
        assert!(matches!(
            PlacementConfig::new(params),
            Err(ConfigError::NegativeValue {
                field: "shard_size",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_radii_rejected() {
        let params = PlacementParams {
            min_radius: 5.0,
            max_radius: 4.0,
            ..PlacementParams::default()
        };
        assert_eq!(
            PlacementConfig::new(params),
            Err(ConfigError::InvertedRadii { min: 5.0, max: 4.0 })
        );
    }

    #[test]
    fn test_min_scale_bounds() {
        for bad in [0.0, -0.2, 1.5] {
            let params = PlacementParams {
                min_scale: bad,
                ..PlacementParams::default()
            };
            assert_eq!(
                PlacementConfig::new(params),
                Err(ConfigError::InvalidMinScale { value: bad })
            );
        }
        let params = PlacementParams {
            min_scale: 1.0,
            ..PlacementParams::default()
        };
        assert!(PlacementConfig::new(params).is_ok());
    }

    #[test]
    fn test_edge_length_must_be_positive() {
        let params = PlacementParams {
            max_edge_length: Some(0.0),
            ..PlacementParams::default()
        };
        assert_eq!(
            PlacementConfig::new(params),
            Err(ConfigError::InvalidEdgeLength { value: 0.0 })
        );
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: BreathConfig = toml::from_str(
            r#"
            [phase]
            inhale = 4.0
            hold_in = 4.0
            exhale = 4.0
            hold_out = 4.0

            [placement]
            neighbor_count = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.phase.total_cycle(), 16.0);
        assert_eq!(config.placement.neighbor_count(), 6);
        assert_eq!(config.placement.min_radius(), DEFAULT_MIN_RADIUS);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: std::result::Result<BreathConfig, _> = toml::from_str(
            r#"
            [placement]
            min_radius = 1.0
            "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("orbit floor"), "{err}");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = BreathConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: BreathConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
