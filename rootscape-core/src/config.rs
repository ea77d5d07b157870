//! Explorer configuration.
//!
//! The defaults are the canonical starting scene: five roots near the unit
//! circle, each with its own colour, seen at scale 0.5. A page may override
//! any subset of fields with a JSON document.

use crate::error::ConfigError;
use crate::handles::HandleStyle;
use crate::interaction::InteractionSettings;
use crate::interface::MAX_ITERATIONS;
use crate::points::{Point, Root, UvPoint};
use crate::view::{Color, ViewInfo, ViewState};
use serde::{Deserialize, Serialize};

/// Size of the root and colour uniform arrays in the fragment shader.
pub const MAX_ROOTS: usize = 8;

pub const DEFAULT_ROOTS: [Root; 5] = [
    Point::new(-1.3247, 0.0),
    Point::new(0.0, 1.0),
    Point::new(0.0, -1.0),
    Point::new(0.66236, 0.56228),
    Point::new(0.66236, -0.56228),
];

pub const DEFAULT_COLORS: [Color; 5] = [
    Color::new(0.337, 0.443, 0.537),
    Color::new(0.482, 0.561, 0.631),
    Color::new(0.812, 0.725, 0.592),
    Color::new(0.980, 0.839, 0.647),
    Color::new(0.259, 0.345, 0.412),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Initial root positions; their count is fixed for the session.
    pub roots: Vec<Root>,
    /// One colour per root, same order.
    pub colors: Vec<Color>,
    pub scale: f64,
    pub offset: UvPoint,
    /// Device pixels per CSS pixel used for the backing canvases.
    pub pixel_ratio: f64,
    pub iterations: u32,
    pub handle: HandleStyle,
    pub interaction: InteractionSettings,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.to_vec(),
            colors: DEFAULT_COLORS.to_vec(),
            scale: 0.5,
            offset: Point::new(0.0, 0.0),
            pixel_ratio: 2.0,
            iterations: 10,
            handle: HandleStyle::default(),
            interaction: InteractionSettings::default(),
        }
    }
}

impl ExplorerConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roots.is_empty() {
            return Err(ConfigError::NoRoots);
        }
        if self.roots.len() > MAX_ROOTS {
            return Err(ConfigError::TooManyRoots {
                count: self.roots.len(),
                max: MAX_ROOTS,
            });
        }
        if self.roots.len() != self.colors.len() {
            return Err(ConfigError::ColorCountMismatch {
                roots: self.roots.len(),
                colors: self.colors.len(),
            });
        }
        if self.scale.is_nan() || self.scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }
        if self.pixel_ratio.is_nan() || self.pixel_ratio <= 0.0 {
            return Err(ConfigError::NonPositivePixelRatio(self.pixel_ratio));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::TooManyIterations {
                count: self.iterations,
                max: MAX_ITERATIONS,
            });
        }
        let HandleStyle { radius, outline } = self.handle;
        if radius.is_nan()
            || radius <= 0.0
            || outline.is_nan()
            || outline < 0.0
            || outline >= radius
        {
            return Err(ConfigError::InvalidHandleStyle { radius, outline });
        }
        // Wheel zoom factors are only positive for a positive, finite divisor
        let divisor = self.interaction.zoom_delta_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ConfigError::InvalidZoomDivisor(divisor));
        }
        Ok(())
    }

    /// Build the initial view for a canvas of `canvas_size` device pixels.
    pub fn initial_view(&self, canvas_size: (u32, u32)) -> ViewInfo {
        ViewInfo::new(
            self.scale,
            self.offset,
            self.pixel_ratio,
            canvas_size,
            self.iterations,
        )
    }

    pub fn initial_state(&self, canvas_size: (u32, u32)) -> ViewState {
        ViewState::new(
            self.initial_view(canvas_size),
            self.roots.clone(),
            self.colors.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExplorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roots.len(), 5);
        assert_eq!(config.colors.len(), 5);
        assert_eq!(config.scale, 0.5);
        assert_eq!(config.pixel_ratio, 2.0);
        assert_eq!(config.iterations, 10);
    }

    #[test]
    fn empty_json_keeps_defaults() {
        let config = ExplorerConfig::from_json("{}").unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = ExplorerConfig::from_json(r#"{"scale": 2.0, "iterations": 64}"#).unwrap();
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.iterations, 64);
        assert_eq!(config.roots, DEFAULT_ROOTS.to_vec());
    }

    #[test]
    fn json_can_replace_roots_and_colors() {
        let json = r#"{
            "roots": [{"x": 1.0, "y": 0.0}, {"x": -1.0, "y": 0.0}],
            "colors": [{"r": 1.0, "g": 0.0, "b": 0.0}, {"r": 0.0, "g": 0.0, "b": 1.0}]
        }"#;
        let config = ExplorerConfig::from_json(json).unwrap();
        assert_eq!(config.roots, vec![Point::new(1.0, 0.0), Point::new(-1.0, 0.0)]);
        assert_eq!(config.colors[1], Color::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ExplorerConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn mismatched_colors_are_rejected() {
        let json = r#"{"roots": [{"x": 1.0, "y": 0.0}]}"#;
        let err = ExplorerConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ColorCountMismatch {
                roots: 1,
                colors: 5
            }
        ));
    }

    #[test]
    fn empty_roots_are_rejected() {
        let json = r#"{"roots": [], "colors": []}"#;
        assert!(matches!(
            ExplorerConfig::from_json(json).unwrap_err(),
            ConfigError::NoRoots
        ));
    }

    #[test]
    fn too_many_roots_are_rejected() {
        let config = ExplorerConfig {
            roots: vec![Point::new(0.0, 0.0); MAX_ROOTS + 1],
            colors: vec![Color::new(0.0, 0.0, 0.0); MAX_ROOTS + 1],
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::TooManyRoots { count: 9, max: 8 }
        ));
    }

    #[test]
    fn non_positive_scale_and_ratio_are_rejected() {
        let zero_scale = ExplorerConfig {
            scale: 0.0,
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            zero_scale.validate().unwrap_err(),
            ConfigError::NonPositiveScale(_)
        ));

        let nan_ratio = ExplorerConfig {
            pixel_ratio: f64::NAN,
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            nan_ratio.validate().unwrap_err(),
            ConfigError::NonPositivePixelRatio(_)
        ));
    }

    #[test]
    fn zoom_divisor_must_be_positive_and_finite() {
        for divisor in [-1000.0, 0.0, f64::NAN, f64::INFINITY] {
            let json = format!(r#"{{"interaction": {{"zoom_delta_divisor": {divisor}}}}}"#);
            let config = ExplorerConfig {
                interaction: InteractionSettings {
                    zoom_delta_divisor: divisor,
                    ..InteractionSettings::default()
                },
                ..ExplorerConfig::default()
            };
            assert!(
                matches!(
                    config.validate().unwrap_err(),
                    ConfigError::InvalidZoomDivisor(_)
                ),
                "divisor {divisor} accepted"
            );
            // Rejected either by validation or, for non-finite values, by the parser
            assert!(ExplorerConfig::from_json(&json).is_err());
        }
    }

    #[test]
    fn iteration_limit_is_enforced() {
        let config = ExplorerConfig {
            iterations: MAX_ITERATIONS + 1,
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::TooManyIterations { .. }
        ));
    }

    #[test]
    fn outline_must_fit_inside_radius() {
        let config = ExplorerConfig {
            handle: HandleStyle::new(6.0, 6.0),
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidHandleStyle { .. }
        ));
    }

    #[test]
    fn outline_must_be_a_non_negative_number() {
        for outline in [-2.0, f64::NAN] {
            let config = ExplorerConfig {
                handle: HandleStyle::new(36.0, outline),
                ..ExplorerConfig::default()
            };
            assert!(
                matches!(
                    config.validate().unwrap_err(),
                    ConfigError::InvalidHandleStyle { .. }
                ),
                "outline {outline} accepted"
            );
        }
    }

    #[test]
    fn initial_state_uses_config_values() {
        let state = ExplorerConfig::default().initial_state((1600, 1200));
        assert_eq!(state.view.canvas_size, (1600, 1200));
        assert_eq!(state.view.scale, 0.5);
        assert_eq!(state.view.offset, Point::new(0.0, 0.0));
        assert_eq!(state.roots[0], Point::new(-1.3247, 0.0));
        assert_eq!(state.colors[4], Color::new(0.259, 0.345, 0.412));
    }
}
