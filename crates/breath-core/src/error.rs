use std::fmt;

/// Invalid configuration, rejected once at construction.
///
/// There is no degraded startup mode: a host that gets one of these should
/// refuse to start rather than render with guessed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFiniteValue { field: &'static str },
    NegativeValue { field: &'static str, value: f64 },
    NonPositiveCycle { total: f64 },
    InvertedRadii { min: f64, max: f64 },
    MinRadiusAtFloor { min_radius: f64, floor: f64 },
    ZeroNeighborCount,
    InvalidMinScale { value: f64 },
    NonPositiveSpacingFactor { value: f64 },
    NonPositiveGravitationalParameter { value: f64 },
    InvertedVelocityFactors { min: f64, max: f64 },
    InvalidEdgeLength { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFiniteValue { field } => write!(f, "{field} must be finite"),
            ConfigError::NegativeValue { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            ConfigError::NonPositiveCycle { total } => {
                write!(f, "breath cycle must be longer than zero, got {total}s")
            }
            ConfigError::InvertedRadii { min, max } => {
                write!(f, "min_radius {min} exceeds max_radius {max}")
            }
            ConfigError::MinRadiusAtFloor { min_radius, floor } => write!(
                f,
                "min_radius {min_radius} must be greater than the orbit floor {floor} \
                 (core_radius + shard_size + floor_buffer)"
            ),
            ConfigError::ZeroNeighborCount => write!(f, "neighbor_count must be at least 1"),
            ConfigError::InvalidMinScale { value } => {
                write!(f, "min_scale must be in (0, 1], got {value}")
            }
            ConfigError::NonPositiveSpacingFactor { value } => {
                write!(f, "fibonacci_spacing_factor must be positive, got {value}")
            }
            ConfigError::NonPositiveGravitationalParameter { value } => {
                write!(f, "gravitational_parameter must be positive, got {value}")
            }
            ConfigError::InvertedVelocityFactors { min, max } => write!(
                f,
                "min_velocity_factor {min} exceeds max_velocity_factor {max}"
            ),
            ConfigError::InvalidEdgeLength { value } => {
                write!(f, "max_edge_length must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reject NaN and infinities.
pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteValue { field })
    }
}

/// Reject non-finite and negative values.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeValue { field, value });
    }
    Ok(value)
}
