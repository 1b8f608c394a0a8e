//! Configuration types for the magic lamp effect.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape of the deformation curve.
///
/// The curve shapes both the squash timing and the profile of the lamp neck:
/// an input of 0 corresponds to the window edge farthest from the icon, 1 to
/// the closest edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeCurve {
    /// No easing.
    Linear,
    /// Quadratic ease in and out.
    Quad,
    /// Cubic ease in and out.
    Cubic,
    /// Quartic ease in and out.
    Quart,
    /// Quintic ease in and out.
    Quint,
    /// Sinusoidal ease in and out. Default, and the fallback for selectors
    /// this version does not know.
    #[default]
    Sine,
    /// Circular ease in and out.
    Circ,
    /// Bouncing ease in and out. Overshoots slightly by nature.
    Bounce,
    /// Fixed cubic bezier with control points (0.3, 0.0) and (0.7, 1.0).
    Bezier,
}

impl ShapeCurve {
    /// Maps a selector name to its curve, falling back to [`Self::Sine`] for
    /// names this version does not know.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "quad" => Self::Quad,
            "cubic" => Self::Cubic,
            "quart" => Self::Quart,
            "quint" => Self::Quint,
            "circ" => Self::Circ,
            "bounce" => Self::Bounce,
            "bezier" => Self::Bezier,
            _ => Self::Sine,
        }
    }

    /// Returns the selector name as a static kebab-case string.
    ///
    /// This matches the `#[serde(rename_all = "kebab-case")]` format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quad => "quad",
            Self::Cubic => "cubic",
            Self::Quart => "quart",
            Self::Quint => "quint",
            Self::Sine => "sine",
            Self::Circ => "circ",
            Self::Bounce => "bounce",
            Self::Bezier => "bezier",
        }
    }
}

/// Deserializes a shape curve selector, mapping unknown names to Sine
/// instead of rejecting the whole configuration.
fn shape_curve_or_sine<'de, D>(deserializer: D) -> Result<ShapeCurve, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(ShapeCurve::from_name(&name))
}

/// Magic lamp effect configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Shape of the deformation curve.
    /// Default: "sine"
    #[serde(deserialize_with = "shape_curve_or_sine")]
    pub shape_curve: ShapeCurve,

    /// Base animation duration in milliseconds. The squash and bump phases
    /// use this directly; the stretch phase runs at 0.7x.
    /// Default: 300
    pub duration: u32,

    /// Thickness of the squashed window as a fraction of its original extent
    /// toward the icon, clamped to [0, 1].
    /// Default: 0.3
    pub initial_shape_factor: f64,

    /// Maximum sideways overshoot in pixels while the window funnels into
    /// the icon.
    /// Default: 30
    pub max_bump_distance: f64,

    /// Window surface subdivision: the surface is meshed into
    /// `gridResolution x gridResolution` quads before deformation.
    /// Values below 1 are treated as 1 (no subdivision).
    /// Default: 60
    pub grid_resolution: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            shape_curve: ShapeCurve::default(),
            duration: 300,
            initial_shape_factor: 0.3,
            max_bump_distance: 30.0,
            grid_resolution: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_curve_default_is_sine() {
        assert_eq!(ShapeCurve::default(), ShapeCurve::Sine);
    }

    #[test]
    fn test_shape_curve_from_name_known_selectors() {
        assert_eq!(ShapeCurve::from_name("linear"), ShapeCurve::Linear);
        assert_eq!(ShapeCurve::from_name("quint"), ShapeCurve::Quint);
        assert_eq!(ShapeCurve::from_name("bezier"), ShapeCurve::Bezier);
    }

    #[test]
    fn test_shape_curve_from_name_unknown_falls_back() {
        assert_eq!(ShapeCurve::from_name("elastic"), ShapeCurve::Sine);
        assert_eq!(ShapeCurve::from_name(""), ShapeCurve::Sine);
    }

    #[test]
    fn test_shape_curve_as_str_matches_from_name() {
        for curve in [
            ShapeCurve::Linear,
            ShapeCurve::Quad,
            ShapeCurve::Cubic,
            ShapeCurve::Quart,
            ShapeCurve::Quint,
            ShapeCurve::Sine,
            ShapeCurve::Circ,
            ShapeCurve::Bounce,
            ShapeCurve::Bezier,
        ] {
            assert_eq!(ShapeCurve::from_name(curve.as_str()), curve);
        }
    }

    #[test]
    fn test_effect_config_default() {
        let config = EffectConfig::default();
        assert_eq!(config.shape_curve, ShapeCurve::Sine);
        assert_eq!(config.duration, 300);
        assert!((config.initial_shape_factor - 0.3).abs() < f64::EPSILON);
        assert!((config.max_bump_distance - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.grid_resolution, 60);
    }

    #[test]
    fn test_shape_curve_deserializes_kebab_case() {
        let config: EffectConfig =
            serde_json::from_str(r#"{"shapeCurve": "bounce"}"#).expect("valid config");
        assert_eq!(config.shape_curve, ShapeCurve::Bounce);
    }

    #[test]
    fn test_unknown_shape_curve_falls_back_to_sine() {
        let config: EffectConfig =
            serde_json::from_str(r#"{"shapeCurve": "elastic"}"#).expect("valid config");
        assert_eq!(config.shape_curve, ShapeCurve::Sine);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EffectConfig =
            serde_json::from_str(r#"{"duration": 150}"#).expect("valid config");
        assert_eq!(config.duration, 150);
        assert_eq!(config.grid_resolution, 60);
        assert_eq!(config.shape_curve, ShapeCurve::Sine);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = EffectConfig {
            shape_curve: ShapeCurve::Bezier,
            duration: 250,
            initial_shape_factor: 0.5,
            max_bump_distance: 10.0,
            grid_resolution: 8,
        };
        let json = serde_json::to_string(&config).expect("serializable");
        let parsed: EffectConfig = serde_json::from_str(&json).expect("parseable");
        assert_eq!(parsed.shape_curve, ShapeCurve::Bezier);
        assert_eq!(parsed.duration, 250);
        assert_eq!(parsed.grid_resolution, 8);
    }
}
