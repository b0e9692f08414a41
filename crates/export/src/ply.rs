//! ASCII PLY encoding of a [`GalaxyBuffers`].
//!
//! One vertex per particle with float `x y z` and `uchar red green blue`,
//! readable by MeshLab, Blender, CloudCompare and friends.

use std::io::{self, Write};

use galaxy_core::GalaxyBuffers;

/// Quantizes a [0, 1] color component to 8-bit.
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Streams the buffers as ASCII PLY into `out`.
pub fn write_ply<W: Write>(buffers: &GalaxyBuffers, out: &mut W) -> io::Result<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment spiral galaxy point cloud")?;
    writeln!(out, "element vertex {}", buffers.len())?;
    for axis in ["x", "y", "z"] {
        writeln!(out, "property float {axis}")?;
    }
    for channel in ["red", "green", "blue"] {
        writeln!(out, "property uchar {channel}")?;
    }
    writeln!(out, "end_header")?;

    for (p, c) in buffers.iter() {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            p.x,
            p.y,
            p.z,
            to_u8(c[0]),
            to_u8(c[1]),
            to_u8(c[2])
        )?;
    }
    Ok(())
}

/// The buffers as an in-memory ASCII PLY document.
pub fn to_ply(buffers: &GalaxyBuffers) -> io::Result<String> {
    let mut out = Vec::new();
    write_ply(buffers, &mut out)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
