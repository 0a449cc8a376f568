use thiserror::Error;

/// A ring, group or scene description that cannot be animated.
///
/// Raised only while constructing animation state; stepping never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("a ring needs at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("ring radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),
    #[error("rotation speed must be finite, got {0}")]
    InvalidSpeed(f64),
    #[error("starting rotation must be finite, got {0}")]
    InvalidStartingRotation(f64),
    #[error("{feature} are enabled but have no {palette} colours")]
    EmptyPalette {
        feature: &'static str,
        palette: &'static str,
    },
    #[error("{feature} {property} must be a positive finite number, got {value}")]
    InvalidSize {
        feature: &'static str,
        property: &'static str,
        value: f64,
    },
    #[error("position ({x}, {y}) is outside the -100..100 range")]
    PositionOutOfRange { x: f64, y: f64 },
    #[error("surface must be at least 1x1 with positive scale")]
    InvalidSurface,
    #[error("ring {index}: {source}")]
    InvalidRing {
        index: usize,
        #[source]
        source: Box<ConfigurationError>,
    },
    #[error("group {index}: {source}")]
    InvalidGroup {
        index: usize,
        #[source]
        source: Box<ConfigurationError>,
    },
}
