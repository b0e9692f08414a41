//! The currently displayed galaxy and its regeneration.
//!
//! A [`LiveGalaxy`] owns the one buffer pair that renderers read. Each
//! regeneration builds a complete new pair first and only then swaps it in,
//! so a reader always sees positions and colors from the same generation.
//! The previous pair is dropped when the last reader holding it lets go;
//! nothing else keeps it alive.
//!
//! Regeneration requests are serialized: a second caller blocks until the
//! first has published, then runs with its own parameters (queue, never
//! cancel). This matches "regenerate when an edit finishes" UIs, where
//! requests are rare and each one must win in order.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use serde_json::Value;

use crate::buffers::GalaxyBuffers;
use crate::error::GalaxyError;
use crate::generator::GalaxyGenerator;
use crate::params::ParameterSet;

/// A consistent view of one published generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub params: ParameterSet,
    pub buffers: Arc<GalaxyBuffers>,
}

/// Shared holder of the live buffer pair. One writer at a time, any number
/// of readers; cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct LiveGalaxy {
    current: RwLock<Snapshot>,
    generator: Mutex<GalaxyGenerator>,
}

impl LiveGalaxy {
    /// Generates the first pair from `params` with a generator seeded by
    /// `seed`. Fails if the parameters are invalid.
    pub fn new(params: ParameterSet, seed: u64) -> Result<Self, GalaxyError> {
        let mut generator = GalaxyGenerator::new(seed);
        let buffers = generator.generate(&params)?;
        tracing::info!(generation = 0, particles = buffers.len(), "galaxy published");
        Ok(Self {
            current: RwLock::new(Snapshot {
                generation: 0,
                params,
                buffers: Arc::new(buffers),
            }),
            generator: Mutex::new(generator),
        })
    }

    /// Builds a new pair from `params` and publishes it, returning the new
    /// generation number.
    ///
    /// On error the previous pair stays live and the generation does not
    /// change. The write lock is held only for the swap itself, never while
    /// particles are being placed.
    pub fn regenerate(&self, params: ParameterSet) -> Result<u64, GalaxyError> {
        // Held until publish so queued requests publish in order.
        let mut generator = self.generator.lock();

        let buffers = match generator.generate(&params) {
            Ok(b) => Arc::new(b),
            Err(e) => {
                tracing::warn!(error = %e, "regeneration rejected, keeping current galaxy");
                return Err(e);
            }
        };

        let previous = {
            let mut current = self.current.write();
            let next = Snapshot {
                generation: current.generation + 1,
                params,
                buffers,
            };
            std::mem::replace(&mut *current, next)
        };
        let generation = previous.generation + 1;
        tracing::info!(generation, particles = params.count(), "galaxy published");
        // The old pair is released here unless a reader still holds it.
        drop(previous);
        Ok(generation)
    }

    /// Applies a parameter edit given as a JSON object on top of the live
    /// parameters and regenerates.
    ///
    /// Keys absent from `patch` keep their live values. An invalid patch is
    /// rejected before anything is generated and the current pair stays on
    /// screen.
    pub fn apply_json(&self, patch: &Value) -> Result<u64, GalaxyError> {
        let mut merged = self.params().to_json();
        if let (Some(base), Some(edits)) = (merged.as_object_mut(), patch.as_object()) {
            for (key, value) in edits {
                base.insert(key.clone(), value.clone());
            }
        }
        let params = ParameterSet::from_json(&merged).inspect_err(|e| {
            tracing::warn!(error = %e, "parameter edit rejected, keeping current galaxy");
        })?;
        self.regenerate(params)
    }

    /// The live pair together with its generation and parameters.
    pub fn current(&self) -> Snapshot {
        self.current.read().clone()
    }

    /// Number of successful regenerations since construction.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Parameters the live pair was generated from.
    pub fn params(&self) -> ParameterSet {
        self.current.read().params
    }
}
