//! Galaxy generation parameters and strict JSON extraction helpers.
//!
//! A [`ParameterSet`] can only hold values inside its documented ranges:
//! every setter validates and **rejects** out-of-range input, leaving the
//! stored value untouched. Nothing is clamped silently, because a clamped
//! `branches = 0` would hide a caller bug behind a plausible-looking galaxy.

use crate::color::Srgb;
use crate::error::GalaxyError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Largest accepted particle count.
pub const MAX_COUNT: usize = 1_000_000;
/// Largest accepted point size hint.
pub const MAX_SIZE: f64 = 0.5;
/// Largest accepted galaxy radius.
///
/// Together with [`MAX_RANDOMNESS`] this keeps every coordinate well inside
/// `f32` range, so the output buffers never hold an infinity.
pub const MAX_RADIUS: f64 = 1.0e6;
/// Largest accepted jitter magnitude.
pub const MAX_RANDOMNESS: f64 = 1.0e6;
/// Largest accepted spin magnitude, in radians per unit radius.
pub const MAX_SPIN: f64 = 1.0e6;

const DEFAULT_COUNT: usize = 10_000;
const DEFAULT_SIZE: f64 = 0.01;
const DEFAULT_SIZE_ATTENUATION: bool = true;
const DEFAULT_RADIUS: f64 = 5.0;
const DEFAULT_BRANCHES: u32 = 3;
const DEFAULT_SPIN: f64 = 1.0;
const DEFAULT_RANDOMNESS: f64 = 0.2;
const DEFAULT_RANDOMNESS_POWER: f64 = 3.0;
const DEFAULT_INSIDE_COLOR: Srgb = Srgb::RED;
const DEFAULT_OUTSIDE_COLOR: Srgb = Srgb::BLUE;

/// Configuration for one galaxy generation.
///
/// `size` and `size_attenuation` are rendering hints carried for the
/// consumer; generation never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterSetRepr", into = "ParameterSetRepr")]
pub struct ParameterSet {
    count: usize,
    size: f64,
    size_attenuation: bool,
    radius: f64,
    branches: u32,
    spin: f64,
    randomness: f64,
    randomness_power: f64,
    inside_color: Srgb,
    outside_color: Srgb,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            size_attenuation: DEFAULT_SIZE_ATTENUATION,
            radius: DEFAULT_RADIUS,
            branches: DEFAULT_BRANCHES,
            spin: DEFAULT_SPIN,
            randomness: DEFAULT_RANDOMNESS,
            randomness_power: DEFAULT_RANDOMNESS_POWER,
            inside_color: DEFAULT_INSIDE_COLOR,
            outside_color: DEFAULT_OUTSIDE_COLOR,
        }
    }
}

impl ParameterSet {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn size_attenuation(&self) -> bool {
        self.size_attenuation
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn branches(&self) -> u32 {
        self.branches
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn randomness(&self) -> f64 {
        self.randomness
    }

    pub fn randomness_power(&self) -> f64 {
        self.randomness_power
    }

    pub fn inside_color(&self) -> Srgb {
        self.inside_color
    }

    pub fn outside_color(&self) -> Srgb {
        self.outside_color
    }

    /// Sets the particle count. Rejects counts above [`MAX_COUNT`].
    pub fn set_count(&mut self, count: usize) -> Result<(), GalaxyError> {
        self.count = check_count(count)?;
        Ok(())
    }

    /// Sets the point size hint. Rejects values outside (0, [`MAX_SIZE`]].
    pub fn set_size(&mut self, size: f64) -> Result<(), GalaxyError> {
        self.size = check_size(size)?;
        Ok(())
    }

    pub fn set_size_attenuation(&mut self, enabled: bool) {
        self.size_attenuation = enabled;
    }

    /// Sets the galaxy radius. Zero is accepted (every particle collapses
    /// onto the origin); negative radii and radii above [`MAX_RADIUS`] are
    /// rejected.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), GalaxyError> {
        self.radius = check_range("radius", radius, 0.0, MAX_RADIUS)?;
        Ok(())
    }

    /// Sets the number of spiral arms. Rejects zero.
    pub fn set_branches(&mut self, branches: u32) -> Result<(), GalaxyError> {
        self.branches = check_branches(branches)?;
        Ok(())
    }

    /// Sets the twist in radians per unit radius, within ±[`MAX_SPIN`].
    pub fn set_spin(&mut self, spin: f64) -> Result<(), GalaxyError> {
        self.spin = check_range("spin", spin, -MAX_SPIN, MAX_SPIN)?;
        Ok(())
    }

    /// Sets the jitter magnitude, in [0, [`MAX_RANDOMNESS`]].
    pub fn set_randomness(&mut self, randomness: f64) -> Result<(), GalaxyError> {
        self.randomness = check_range("randomness", randomness, 0.0, MAX_RANDOMNESS)?;
        Ok(())
    }

    /// Sets the jitter skew exponent. Rejects negative values.
    pub fn set_randomness_power(&mut self, power: f64) -> Result<(), GalaxyError> {
        self.randomness_power = check_non_negative("randomness_power", power)?;
        Ok(())
    }

    pub fn set_inside_color(&mut self, color: Srgb) -> Result<(), GalaxyError> {
        self.inside_color = check_color("inside_color", color)?;
        Ok(())
    }

    pub fn set_outside_color(&mut self, color: Srgb) -> Result<(), GalaxyError> {
        self.outside_color = check_color("outside_color", color)?;
        Ok(())
    }

    /// Re-checks every field against its range.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        check_count(self.count)?;
        check_size(self.size)?;
        check_range("radius", self.radius, 0.0, MAX_RADIUS)?;
        check_branches(self.branches)?;
        check_range("spin", self.spin, -MAX_SPIN, MAX_SPIN)?;
        check_range("randomness", self.randomness, 0.0, MAX_RANDOMNESS)?;
        check_non_negative("randomness_power", self.randomness_power)?;
        check_color("inside_color", self.inside_color)?;
        check_color("outside_color", self.outside_color)?;
        Ok(())
    }

    /// Builds a parameter set from a JSON object.
    ///
    /// Missing keys (or `null`) take their defaults. Keys holding the wrong
    /// JSON type yield `ParamTypeMismatch`; out-of-range values yield
    /// `InvalidParameter` or `NonFinite`. Unknown keys are ignored.
    pub fn from_json(params: &Value) -> Result<Self, GalaxyError> {
        let d = ParameterSetRepr::from(ParameterSet::default());
        let repr = ParameterSetRepr {
            count: param_i64(params, "count", d.count)?,
            size: param_f64(params, "size", d.size)?,
            size_attenuation: param_bool(params, "size_attenuation", d.size_attenuation)?,
            radius: param_f64(params, "radius", d.radius)?,
            branches: param_i64(params, "branches", d.branches)?,
            spin: param_f64(params, "spin", d.spin)?,
            randomness: param_f64(params, "randomness", d.randomness)?,
            randomness_power: param_f64(params, "randomness_power", d.randomness_power)?,
            inside_color: param_color(params, "inside_color", d.inside_color)?,
            outside_color: param_color(params, "outside_color", d.outside_color)?,
        };
        ParameterSet::try_from(repr)
    }

    /// Current values as a JSON object, colors as `#rrggbb`.
    pub fn to_json(&self) -> Value {
        json!({
            "count": self.count,
            "size": self.size,
            "size_attenuation": self.size_attenuation,
            "radius": self.radius,
            "branches": self.branches,
            "spin": self.spin,
            "randomness": self.randomness,
            "randomness_power": self.randomness_power,
            "inside_color": self.inside_color.to_hex(),
            "outside_color": self.outside_color.to_hex(),
        })
    }

    /// Schema describing every parameter: type, default, UI range and step.
    ///
    /// The `min`/`max` here are slider ranges for editing widgets and are
    /// narrower than what the setters accept.
    pub fn param_schema() -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 100,
                "max": MAX_COUNT,
                "step": 10,
                "description": "Number of particles"
            },
            "size": {
                "type": "number",
                "default": DEFAULT_SIZE,
                "min": 0.01,
                "max": MAX_SIZE,
                "step": 0.0001,
                "description": "Point size hint for the renderer"
            },
            "size_attenuation": {
                "type": "boolean",
                "default": DEFAULT_SIZE_ATTENUATION,
                "description": "Whether the renderer shrinks points with distance"
            },
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "min": 0.01,
                "max": 20.0,
                "step": 0.01,
                "description": "Maximum distance of a particle from the center"
            },
            "branches": {
                "type": "integer",
                "default": DEFAULT_BRANCHES,
                "min": 1,
                "max": 20,
                "step": 1,
                "description": "Number of spiral arms"
            },
            "spin": {
                "type": "number",
                "default": DEFAULT_SPIN,
                "min": -5.0,
                "max": 5.0,
                "step": 0.001,
                "description": "Twist in radians per unit of radius"
            },
            "randomness": {
                "type": "number",
                "default": DEFAULT_RANDOMNESS,
                "min": 0.0,
                "max": 2.0,
                "step": 0.001,
                "description": "Maximum per-axis jitter around the arm"
            },
            "randomness_power": {
                "type": "number",
                "default": DEFAULT_RANDOMNESS_POWER,
                "min": 1.0,
                "max": 10.0,
                "step": 0.001,
                "description": "Exponent pulling jitter toward the arm centerline"
            },
            "inside_color": {
                "type": "color",
                "default": DEFAULT_INSIDE_COLOR.to_hex(),
                "description": "Color at the galaxy center"
            },
            "outside_color": {
                "type": "color",
                "default": DEFAULT_OUTSIDE_COLOR.to_hex(),
                "description": "Color at the galaxy rim"
            }
        })
    }
}

/// Serde shape of a [`ParameterSet`]. Integers are signed so a negative
/// count deserializes far enough to be reported as an invalid parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParameterSetRepr {
    count: i64,
    size: f64,
    size_attenuation: bool,
    radius: f64,
    branches: i64,
    spin: f64,
    randomness: f64,
    randomness_power: f64,
    inside_color: Srgb,
    outside_color: Srgb,
}

impl Default for ParameterSetRepr {
    fn default() -> Self {
        ParameterSet::default().into()
    }
}

impl From<ParameterSet> for ParameterSetRepr {
    fn from(p: ParameterSet) -> Self {
        Self {
            count: p.count as i64,
            size: p.size,
            size_attenuation: p.size_attenuation,
            radius: p.radius,
            branches: i64::from(p.branches),
            spin: p.spin,
            randomness: p.randomness,
            randomness_power: p.randomness_power,
            inside_color: p.inside_color,
            outside_color: p.outside_color,
        }
    }
}

impl TryFrom<ParameterSetRepr> for ParameterSet {
    type Error = GalaxyError;

    fn try_from(r: ParameterSetRepr) -> Result<Self, Self::Error> {
        let count = usize::try_from(r.count)
            .map_err(|_| GalaxyError::invalid("count", format!("must be non-negative, got {}", r.count)))?;
        let branches = u32::try_from(r.branches)
            .map_err(|_| GalaxyError::invalid("branches", format!("must be at least 1, got {}", r.branches)))?;

        let mut p = ParameterSet::default();
        p.set_count(count)?;
        p.set_size(r.size)?;
        p.set_size_attenuation(r.size_attenuation);
        p.set_radius(r.radius)?;
        p.set_branches(branches)?;
        p.set_spin(r.spin)?;
        p.set_randomness(r.randomness)?;
        p.set_randomness_power(r.randomness_power)?;
        p.set_inside_color(r.inside_color)?;
        p.set_outside_color(r.outside_color)?;
        Ok(p)
    }
}

// -- Range checks --

fn check_finite(name: &str, v: f64) -> Result<f64, GalaxyError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GalaxyError::NonFinite(name.to_string()))
    }
}

fn check_non_negative(name: &str, v: f64) -> Result<f64, GalaxyError> {
    let v = check_finite(name, v)?;
    if v < 0.0 {
        return Err(GalaxyError::invalid(name, format!("must be >= 0, got {v}")));
    }
    Ok(v)
}

fn check_range(name: &str, v: f64, min: f64, max: f64) -> Result<f64, GalaxyError> {
    let v = check_finite(name, v)?;
    if v < min || v > max {
        return Err(GalaxyError::invalid(
            name,
            format!("must be in [{min}, {max}], got {v}"),
        ));
    }
    Ok(v)
}

fn check_count(count: usize) -> Result<usize, GalaxyError> {
    if count > MAX_COUNT {
        return Err(GalaxyError::invalid(
            "count",
            format!("must be at most {MAX_COUNT}, got {count}"),
        ));
    }
    Ok(count)
}

fn check_size(size: f64) -> Result<f64, GalaxyError> {
    let size = check_finite("size", size)?;
    if size <= 0.0 || size > MAX_SIZE {
        return Err(GalaxyError::invalid(
            "size",
            format!("must be in (0, {MAX_SIZE}], got {size}"),
        ));
    }
    Ok(size)
}

fn check_branches(branches: u32) -> Result<u32, GalaxyError> {
    if branches == 0 {
        return Err(GalaxyError::invalid("branches", "must be at least 1, got 0"));
    }
    Ok(branches)
}

fn check_color(name: &str, color: Srgb) -> Result<Srgb, GalaxyError> {
    if [color.r, color.g, color.b].iter().any(|c| !c.is_finite()) {
        return Err(GalaxyError::NonFinite(name.to_string()));
    }
    if !color.is_valid() {
        return Err(GalaxyError::invalid(
            name,
            format!("components must be in [0, 1], got {color:?}"),
        ));
    }
    Ok(color)
}

// -- JSON extraction --
//
// Each helper takes a JSON object, a key, and a default. A missing key or
// `null` yields the default; a present value of the wrong type is an error.

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> GalaxyError {
    GalaxyError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: json_type_name(got).to_string(),
    }
}

fn present<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| !v.is_null())
}

/// Extracts an `f64` from `params[name]`. Integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, GalaxyError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Extracts a signed integer from `params[name]`. Fractional numbers are a
/// type mismatch rather than being truncated.
pub fn param_i64(params: &Value, name: &str, default: i64) -> Result<i64, GalaxyError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v.as_i64().ok_or_else(|| mismatch(name, "integer", v)),
    }
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> Result<bool, GalaxyError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| mismatch(name, "boolean", v)),
    }
}

/// Extracts a hex color string from `params[name]`.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, GalaxyError> {
    match present(params, name) {
        None => Ok(default),
        Some(Value::String(s)) => Srgb::from_hex(s),
        Some(v) => Err(mismatch(name, "hex color string", v)),
    }
}
