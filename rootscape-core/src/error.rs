//! Error types for configuration loading and user input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("At least one root is required")]
    NoRoots,

    #[error("{count} roots configured, the shader supports at most {max}")]
    TooManyRoots { count: usize, max: usize },

    #[error("{roots} roots but {colors} colors; every root needs exactly one color")]
    ColorCountMismatch { roots: usize, colors: usize },

    #[error("Scale must be positive, got {0}")]
    NonPositiveScale(f64),

    #[error("Pixel ratio must be positive, got {0}")]
    NonPositivePixelRatio(f64),

    #[error("Iteration count {count} exceeds the maximum of {max}")]
    TooManyIterations { count: u32, max: u32 },

    #[error("Handle outline {outline} must be non-negative and smaller than its radius {radius}")]
    InvalidHandleStyle { radius: f64, outline: f64 },

    #[error("Zoom delta divisor must be positive and finite, got {0}")]
    InvalidZoomDivisor(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),
}
