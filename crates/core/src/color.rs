//! sRGB color type with hex parsing and linear interpolation.
//!
//! Interpolation happens directly in RGB component space: the galaxy
//! gradient runs from the inside color at the core to the outside color at
//! the rim, and consumers upload the interpolated components as-is.

use crate::error::GalaxyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);
    pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
    pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa", "ff00aa" or the shorthand
    /// "#f0a" (case insensitive).
    ///
    /// Returns `GalaxyError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Srgb, GalaxyError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(GalaxyError::InvalidColor(format!(
                "non-ascii hex color '{hex}'"
            )));
        }
        let channel = |digits: &str, label: &str| {
            u8::from_str_radix(digits, 16)
                .map_err(|e| GalaxyError::InvalidColor(format!("invalid {label} component: {e}")))
        };
        let (r, g, b) = match hex.len() {
            6 => (
                channel(&hex[0..2], "red")?,
                channel(&hex[2..4], "green")?,
                channel(&hex[4..6], "blue")?,
            ),
            // "#abc" expands each digit: a -> aa
            3 => (
                channel(&hex[0..1], "red")? * 17,
                channel(&hex[1..2], "green")? * 17,
                channel(&hex[2..3], "blue")? * 17,
            ),
            n => {
                return Err(GalaxyError::InvalidColor(format!(
                    "expected 3 or 6 hex digits, got {n}"
                )))
            }
        };
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0–255) with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Components quantized to 8-bit, clamped to [0, 255].
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// True if every component is finite and within [0, 1].
    pub fn is_valid(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Linear interpolation toward `other` by `t`, per RGB component.
    ///
    /// `t` is clamped to [0, 1] and NaN is treated as 0, so `lerp(a, b, 0.0)`
    /// is exactly `a` and the result of two valid colors is always valid.
    pub fn lerp(self, other: Srgb, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Srgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- Hex parsing --

    #[test]
    fn from_hex_parses_pure_red_with_prefix() {
        let c = Srgb::from_hex("#ff0000").unwrap();
        assert_eq!(c, Srgb::RED);
    }

    #[test]
    fn from_hex_accepts_missing_prefix_and_uppercase() {
        let c = Srgb::from_hex("0000FF").unwrap();
        assert_eq!(c, Srgb::BLUE);
    }

    #[test]
    fn from_hex_expands_shorthand() {
        let c = Srgb::from_hex("#f80").unwrap();
        assert_eq!(c.to_hex(), "#ff8800");
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Srgb::from_hex("#ff00").unwrap_err();
        assert!(matches!(err, GalaxyError::InvalidColor(_)));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
        assert!(Srgb::from_hex("#zzz").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Srgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn to_hex_clamps_out_of_range_components() {
        let c = Srgb::new(1.5, -0.2, 0.5);
        assert_eq!(c.to_hex(), "#ff0080");
    }

    // -- Validity --

    #[test]
    fn is_valid_rejects_nan_and_out_of_range() {
        assert!(Srgb::WHITE.is_valid());
        assert!(!Srgb::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!Srgb::new(0.0, 1.01, 0.0).is_valid());
        assert!(!Srgb::new(0.0, 0.0, -0.01).is_valid());
    }

    // -- Lerp --

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Srgb::from_hex("#ff0000").unwrap();
        let b = Srgb::from_hex("#0000ff").unwrap();
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_averages_components() {
        let mid = Srgb::BLACK.lerp(Srgb::WHITE, 0.5);
        assert!(approx_eq(mid.r, 0.5));
        assert!(approx_eq(mid.g, 0.5));
        assert!(approx_eq(mid.b, 0.5));
    }

    #[test]
    fn lerp_clamps_t_and_treats_nan_as_zero() {
        assert_eq!(Srgb::RED.lerp(Srgb::BLUE, 1.0001), Srgb::BLUE);
        assert_eq!(Srgb::RED.lerp(Srgb::BLUE, -3.0), Srgb::RED);
        assert_eq!(Srgb::RED.lerp(Srgb::BLUE, f64::NAN), Srgb::RED);
    }

    // -- Serde --

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Srgb::RED).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"#nothex\"");
        assert!(result.is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn unit() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn lerp_of_valid_colors_is_valid(
                r0 in unit(), g0 in unit(), b0 in unit(),
                r1 in unit(), g1 in unit(), b1 in unit(),
                t in -0.5_f64..=1.5,
            ) {
                let c = Srgb::new(r0, g0, b0).lerp(Srgb::new(r1, g1, b1), t);
                prop_assert!(c.is_valid(), "lerp produced {c:?} at t={t}");
            }

            #[test]
            fn lerp_is_monotone_per_component(
                a in unit(), b in unit(),
                t0 in 0.0_f64..=1.0, t1 in 0.0_f64..=1.0,
            ) {
                let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
                let from = Srgb::new(a, a, a);
                let to = Srgb::new(b, b, b);
                let c_lo = from.lerp(to, lo).r;
                let c_hi = from.lerp(to, hi).r;
                if b >= a {
                    prop_assert!(c_lo <= c_hi + 1e-12);
                } else {
                    prop_assert!(c_lo + 1e-12 >= c_hi);
                }
            }

            #[test]
            fn hex_round_trip_is_stable(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
                let hex = format!("#{r:02x}{g:02x}{b:02x}");
                let parsed = Srgb::from_hex(&hex).unwrap();
                prop_assert_eq!(parsed.to_hex(), hex);
            }
        }
    }
}
