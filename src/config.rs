//! Gauge attributes, colors and display density
//!
//! Attributes are read once when a gauge is constructed. A TOML file can
//! supply any subset of them; missing or malformed entries keep their
//! built-in default.

use bon::Builder;
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

// ============================================================================
// COLOR
// ============================================================================

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`. Alpha is dropped, the gauge paints opaque.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !matches!(hex.len(), 6 | 8) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::from_rgb(value & 0x00ff_ffff))
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// DISPLAY DENSITY
// ============================================================================

/// Scale factors used to turn dp/sp values into physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub density: f32,
    pub font_scale: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            font_scale: 1.0,
        }
    }
}

impl DisplayMetrics {
    pub fn from_scale_factor(scale_factor: f64) -> Self {
        Self {
            density: scale_factor as f32,
            font_scale: 1.0,
        }
    }

    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.density
    }

    pub fn sp_to_px(&self, sp: f32) -> f32 {
        sp * self.density * self.font_scale
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Construction-time attributes of a step gauge.
///
/// `border_width`, `step_text_size` and `padding` are device-independent
/// (dp, sp, dp); [`crate::StepGauge::new`] converts them with the display
/// metrics of the host.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GaugeAttributes {
    /// Progress arc color
    #[builder(default = Color::RED)]
    pub inner_color: Color,
    /// Track arc color
    #[builder(default = Color::BLUE)]
    pub outer_color: Color,
    #[builder(default = 10.0)]
    pub border_width: f32,
    #[builder(default = 0)]
    pub curr_step: u32,
    #[builder(default = 0)]
    pub max_step: u32,
    #[builder(default = 20.0)]
    pub step_text_size: f32,
    #[builder(default = Color::RED)]
    pub step_text_color: Color,
    #[builder(default = true)]
    pub start_with_anim: bool,
    #[builder(default = 0.0)]
    pub padding: f32,
}

impl Default for GaugeAttributes {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Untyped view of an attribute file, one optional value per known key
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAttributes {
    inner_color: Option<toml::Value>,
    outer_color: Option<toml::Value>,
    border_width: Option<toml::Value>,
    curr_step: Option<toml::Value>,
    max_step: Option<toml::Value>,
    step_text_size: Option<toml::Value>,
    step_text_color: Option<toml::Value>,
    start_with_anim: Option<toml::Value>,
    padding: Option<toml::Value>,
}

impl GaugeAttributes {
    /// Load attributes from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let attrs = Self::from_toml_str(&content)?;
        log::info!("Loaded gauge attributes from {}", path.display());
        Ok(attrs)
    }

    /// Parse attributes from TOML text. Only a syntax error fails; a value
    /// of the wrong kind is replaced by the default for that key.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawAttributes = toml::from_str(content)?;
        Ok(Self::resolve(raw))
    }

    fn resolve(raw: RawAttributes) -> Self {
        let defaults = Self::default();
        Self {
            inner_color: color_or("innerColor", raw.inner_color, defaults.inner_color),
            outer_color: color_or("outerColor", raw.outer_color, defaults.outer_color),
            border_width: dimension_or("borderWidth", raw.border_width, defaults.border_width),
            curr_step: int_or("currStep", raw.curr_step, defaults.curr_step),
            max_step: int_or("maxStep", raw.max_step, defaults.max_step),
            step_text_size: dimension_or(
                "stepTextSize",
                raw.step_text_size,
                defaults.step_text_size,
            ),
            step_text_color: color_or(
                "stepTextColor",
                raw.step_text_color,
                defaults.step_text_color,
            ),
            start_with_anim: bool_or("startWithAnim", raw.start_with_anim, defaults.start_with_anim),
            padding: dimension_or("padding", raw.padding, defaults.padding),
        }
    }
}

fn color_or(key: &str, value: Option<toml::Value>, default: Color) -> Color {
    let parsed = match &value {
        None => return default,
        Some(toml::Value::String(s)) => Color::parse_hex(s),
        Some(toml::Value::Integer(i)) => u32::try_from(*i)
            .ok()
            .map(|rgb| Color::from_rgb(rgb & 0x00ff_ffff)),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| fallback(key, value, default))
}

fn dimension_or(key: &str, value: Option<toml::Value>, default: f32) -> f32 {
    let parsed = match &value {
        None => return default,
        Some(toml::Value::Float(f)) if f.is_finite() => Some(*f as f32),
        Some(toml::Value::Integer(i)) => Some(*i as f32),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| fallback(key, value, default))
}

fn int_or(key: &str, value: Option<toml::Value>, default: u32) -> u32 {
    let parsed = match &value {
        None => return default,
        Some(toml::Value::Integer(i)) => u32::try_from(*i).ok(),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| fallback(key, value, default))
}

fn bool_or(key: &str, value: Option<toml::Value>, default: bool) -> bool {
    match value {
        None => default,
        Some(toml::Value::Boolean(b)) => b,
        other => fallback(key, other, default),
    }
}

fn fallback<T: std::fmt::Debug>(key: &str, value: Option<toml::Value>, default: T) -> T {
    log::warn!(
        "Ignoring malformed attribute {} = {:?}, using {:?}",
        key,
        value,
        default
    );
    default
}
