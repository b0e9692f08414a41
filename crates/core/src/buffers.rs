//! The output of one generation: parallel position and color arrays.

use crate::color::Srgb;
use glam::Vec3;

/// Two parallel flattened arrays, three `f32` per particle.
///
/// `positions[3i..3i + 3]` is the x, y, z of particle `i` and
/// `colors[3i..3i + 3]` its r, g, b in [0, 1]. Both arrays always have the
/// same length. The pair is immutable once built; a new generation produces
/// a new value instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalaxyBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl GalaxyBuffers {
    /// Empty buffers with room for `count` particles.
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
        }
    }

    /// Appends one particle to both arrays, keeping them the same length.
    pub(crate) fn push(&mut self, position: Vec3, color: Srgb) {
        self.positions.extend_from_slice(&position.to_array());
        self.colors
            .extend_from_slice(&[color.r as f32, color.g as f32, color.b as f32]);
    }

    /// Flattened x, y, z triples.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flattened r, g, b triples.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `i`, or `None` if out of range.
    pub fn position(&self, i: usize) -> Option<Vec3> {
        if i >= self.len() {
            return None;
        }
        Some(Vec3::from_slice(&self.positions[i * 3..i * 3 + 3]))
    }

    /// Color of particle `i`, or `None` if out of range.
    pub fn color(&self, i: usize) -> Option<Srgb> {
        if i >= self.len() {
            return None;
        }
        let c = &self.colors[i * 3..i * 3 + 3];
        Some(Srgb::new(c[0] as f64, c[1] as f64, c[2] as f64))
    }

    /// Iterates `(position, color)` pairs in particle order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, [f32; 3])> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| (Vec3::from_slice(p), [c[0], c[1], c[2]]))
    }

    /// Hands both arrays over at once as `(positions, colors)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.colors)
    }
}
