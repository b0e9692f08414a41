//! Spiral galaxy placement.
//!
//! Every particle gets a distance `r` drawn uniformly in `[0, radius)`, sits
//! on the arm chosen by its index (`i mod branches`), is twisted by
//! `r * spin`, and is then scattered per axis by a jitter whose magnitude is
//! `u^randomness_power * randomness`. Uniform-in-radius sampling crowds the
//! core, and the power skew keeps most of the scatter close to the arm while
//! still allowing rare outliers.
//!
//! The galaxy is flat: `y` receives jitter only.
//!
//! Draw order per particle is fixed (r, then magnitude and sign for x, y, z),
//! so a seeded [`Xorshift64`] reproduces a galaxy bit for bit.

use std::f64::consts::TAU;
use std::num::NonZeroU32;

use glam::DVec3;

use crate::buffers::GalaxyBuffers;
use crate::color::Srgb;
use crate::error::GalaxyError;
use crate::params::ParameterSet;
use crate::prng::{RandomSource, Xorshift64};

/// Angle of the arm a particle with this index belongs to.
///
/// Depends only on `index mod branches`, never on a random draw, which is
/// what pins particles onto discrete arms instead of a continuous disk.
pub fn branch_angle(index: usize, branches: NonZeroU32) -> f64 {
    let b = branches.get();
    (TAU / b as f64) * (index % b as usize) as f64
}

/// Generates a fresh buffer pair for `params`, drawing from `rng`.
///
/// Parameters are validated before anything is allocated or drawn: on error
/// no buffers are produced and `rng` is left untouched. `radius == 0` is
/// valid and places every particle at the origin (plus jitter) in the
/// inside color.
///
/// A particle that still lands outside `f32` range fails the whole call with
/// `GalaxyError::NonFinite`; a returned buffer never holds NaN or infinity.
pub fn generate<R: RandomSource + ?Sized>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<GalaxyBuffers, GalaxyError> {
    if let Err(e) = params.validate() {
        tracing::debug!(error = %e, "rejected galaxy parameters");
        return Err(e);
    }
    let branches = NonZeroU32::new(params.branches())
        .ok_or_else(|| GalaxyError::invalid("branches", "must be at least 1, got 0"))?;
    let p = *params;

    let _span = tracing::debug_span!("generate", count = p.count(), branches = branches.get())
        .entered();

    let mut buffers = GalaxyBuffers::with_capacity(p.count());
    for i in 0..p.count() {
        let (position, color) = place_particle(&p, branches, i, rng);
        let position = position.as_vec3();
        if !position.is_finite() {
            tracing::warn!(particle = i, "particle position overflowed f32");
            return Err(GalaxyError::NonFinite("position".to_string()));
        }
        buffers.push(position, color);
    }

    tracing::debug!(particles = buffers.len(), "galaxy generated");
    Ok(buffers)
}

/// Position and color of particle `i`.
fn place_particle<R: RandomSource + ?Sized>(
    p: &ParameterSet,
    branches: NonZeroU32,
    i: usize,
    rng: &mut R,
) -> (DVec3, Srgb) {
    let radius = p.radius();
    let r = rng.next_f64() * radius;
    let angle = branch_angle(i, branches) + r * p.spin();

    let jitter = DVec3::new(
        jitter(rng, p.randomness(), p.randomness_power()),
        jitter(rng, p.randomness(), p.randomness_power()),
        jitter(rng, p.randomness(), p.randomness_power()),
    );
    let position = DVec3::new(r * angle.cos(), 0.0, r * angle.sin()) + jitter;

    let t = if radius > 0.0 {
        (r / radius).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let color = p.inside_color().lerp(p.outside_color(), t);

    (position, color)
}

/// One axis of scatter: `u^power * (±1) * randomness`.
fn jitter<R: RandomSource + ?Sized>(rng: &mut R, randomness: f64, power: f64) -> f64 {
    let magnitude = rng.next_f64().powf(power);
    magnitude * rng.next_sign() * randomness
}

/// Generator owning a seeded [`Xorshift64`].
///
/// Successive calls continue the same random stream, so two calls with the
/// same parameters produce different galaxies; two generators built from
/// the same seed produce identical sequences of galaxies.
#[derive(Debug, Clone)]
pub struct GalaxyGenerator {
    seed: u64,
    rng: Xorshift64,
}

impl GalaxyGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xorshift64::new(seed),
        }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a new buffer pair. See [`generate`].
    pub fn generate(&mut self, params: &ParameterSet) -> Result<GalaxyBuffers, GalaxyError> {
        generate(params, &mut self.rng)
    }
}
