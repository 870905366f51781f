use thiserror::Error;

/// Errors raised by the engine for caller contract violations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("field must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} field")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("density must be within [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("pattern {name} ({pattern_width}x{pattern_height}) does not fit a {width}x{height} field")]
    PatternTooLarge {
        name: &'static str,
        pattern_width: usize,
        pattern_height: usize,
        width: usize,
        height: usize,
    },
}

/// Errors raised while parsing `B.../S...` rule notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("expected `B<digits>/S<digits>`, got {0:?}")]
    Malformed(String),

    #[error("neighbor count {0} is not in 0..=8")]
    InvalidCount(char),

    #[error("B0 rules are not supported by the sparse update")]
    BirthOnZero,
}
