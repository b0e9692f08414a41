//! JSON encoding of a [`GalaxyBuffers`]: `{count, positions, colors}` with
//! flattened triples, the layout a web renderer feeds straight into typed
//! arrays.

use galaxy_core::GalaxyBuffers;
use serde_json::{json, Value};

pub fn to_json(buffers: &GalaxyBuffers) -> Value {
    json!({
        "count": buffers.len(),
        "positions": buffers.positions(),
        "colors": buffers.colors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::{GalaxyGenerator, ParameterSet};

    #[test]
    fn arrays_are_flat_and_parallel() {
        let mut p = ParameterSet::default();
        p.set_count(12).unwrap();
        let buffers = GalaxyGenerator::new(3).generate(&p).unwrap();
        let v = to_json(&buffers);
        assert_eq!(v["count"], 12);
        assert_eq!(v["positions"].as_array().unwrap().len(), 36);
        assert_eq!(v["colors"].as_array().unwrap().len(), 36);
    }

    #[test]
    fn empty_galaxy_has_empty_arrays() {
        let v = to_json(&GalaxyBuffers::default());
        assert_eq!(v["count"], 0);
        assert!(v["positions"].as_array().unwrap().is_empty());
    }
}
