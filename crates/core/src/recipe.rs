//! Reproducible description of a galaxy.
//!
//! A [`Recipe`] captures everything needed to regenerate a galaxy bit for
//! bit: the parameter set and the PRNG seed. Recipes are stored as JSON.

use crate::buffers::GalaxyBuffers;
use crate::error::GalaxyError;
use crate::generator::GalaxyGenerator;
use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters plus seed. Two identical recipes produce identical buffers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(default)]
    pub params: ParameterSet,
    pub seed: u64,
}

impl Recipe {
    pub fn new(params: ParameterSet, seed: u64) -> Self {
        Self { params, seed }
    }

    /// Builds a recipe from a JSON document `{params, seed}`.
    ///
    /// Unlike deserializing through serde, parameter problems keep their
    /// [`GalaxyError`] kind: an out-of-range value is `InvalidParameter`, a
    /// wrong JSON type is `ParamTypeMismatch`. A missing `params` object
    /// means all defaults; `seed` is required.
    pub fn from_json(doc: &Value) -> Result<Self, GalaxyError> {
        let params = match doc.get("params").filter(|v| !v.is_null()) {
            None => ParameterSet::default(),
            Some(v) if v.is_object() => ParameterSet::from_json(v)?,
            Some(v) => return Err(type_mismatch("params", "object", v)),
        };
        let seed = match doc.get("seed") {
            Some(v) => v
                .as_u64()
                .ok_or_else(|| type_mismatch("seed", "unsigned integer", v))?,
            None => {
                return Err(GalaxyError::ParamTypeMismatch {
                    name: "seed".to_string(),
                    expected: "unsigned integer".to_string(),
                    got: "nothing".to_string(),
                })
            }
        };
        Ok(Self { params, seed })
    }

    /// Re-checks the parameter ranges.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        self.params.validate()
    }

    /// Generates the galaxy this recipe describes.
    pub fn generate(&self) -> Result<GalaxyBuffers, GalaxyError> {
        GalaxyGenerator::new(self.seed).generate(&self.params)
    }
}

fn type_mismatch(name: &str, expected: &str, got: &Value) -> GalaxyError {
    let got = match got {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    GalaxyError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_with_defaults() {
        let original = Recipe::new(ParameterSet::default(), 8675309);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut params = ParameterSet::default();
        params.set_branches(6).unwrap();
        params.set_spin(-0.75).unwrap();
        params.set_count(4096).unwrap();
        let recipe = Recipe::new(params, 99);

        let json = serde_json::to_string_pretty(&recipe).unwrap();
        let restored: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let v = serde_json::to_value(Recipe::new(ParameterSet::default(), 1)).unwrap();
        assert!(v.get("seed").is_some());
        let params = v.get("params").unwrap();
        for key in ["count", "radius", "branches", "spin", "inside_color"] {
            assert!(params.get(key).is_some(), "missing {key}");
        }
        assert_eq!(params["inside_color"], "#ff0000");
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"seed": 5}"#).unwrap();
        assert_eq!(recipe.params, ParameterSet::default());
        assert!(recipe.validate().is_ok());
    }

    #[test]
    fn partial_params_fill_in_defaults() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"seed": 5, "params": {"branches": 8}}"#).unwrap();
        assert_eq!(recipe.params.branches(), 8);
        assert_eq!(recipe.params.count(), ParameterSet::default().count());
    }

    #[test]
    fn invalid_params_fail_to_load() {
        let result: Result<Recipe, _> =
            serde_json::from_str(r#"{"seed": 5, "params": {"branches": 0}}"#);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("branches"), "unexpected error: {msg}");
    }

    #[test]
    fn from_json_matches_serde_for_valid_documents() {
        let doc = serde_json::json!({"seed": 12, "params": {"branches": 5, "spin": -1.0}});
        let via_serde: Recipe = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(Recipe::from_json(&doc).unwrap(), via_serde);
        let bare = Recipe::from_json(&serde_json::json!({"seed": 3})).unwrap();
        assert_eq!(bare.params, ParameterSet::default());
    }

    #[test]
    fn from_json_reports_out_of_range_as_invalid_parameter() {
        let doc = serde_json::json!({"seed": 5, "params": {"branches": 0}});
        let err = Recipe::from_json(&doc).unwrap_err();
        assert!(matches!(err, GalaxyError::InvalidParameter { ref name, .. } if name == "branches"));
    }

    #[test]
    fn from_json_reports_bad_shapes_as_type_mismatch() {
        for doc in [
            serde_json::json!({"params": {}}),
            serde_json::json!({"seed": -4}),
            serde_json::json!({"seed": 1, "params": [1, 2]}),
        ] {
            let err = Recipe::from_json(&doc).unwrap_err();
            assert!(matches!(err, GalaxyError::ParamTypeMismatch { .. }), "{doc}: {err}");
        }
    }

    #[test]
    fn generate_is_reproducible() {
        let mut params = ParameterSet::default();
        params.set_count(500).unwrap();
        let recipe = Recipe::new(params, 2024);
        assert_eq!(recipe.generate().unwrap(), recipe.generate().unwrap());
    }

    #[test]
    fn different_seeds_give_different_galaxies() {
        let mut params = ParameterSet::default();
        params.set_count(500).unwrap();
        let a = Recipe::new(params, 1).generate().unwrap();
        let b = Recipe::new(params, 2).generate().unwrap();
        assert_ne!(a, b);
    }
}
