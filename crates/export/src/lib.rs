#![deny(unsafe_code)]
//! Point-cloud export for generated galaxies.
//!
//! Sits between `galaxy-core` (which produces [`GalaxyBuffers`]) and outer
//! surfaces such as the CLI, so format dispatch lives in one place. The
//! encoders ([`ply`], [`json`]) are pure; [`write`] adds file I/O.

pub mod json;
pub mod ply;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use galaxy_core::{GalaxyBuffers, GalaxyError};

/// All available format names.
const FORMAT_NAMES: &[&str] = &["ply", "json"];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// ASCII PLY point cloud.
    Ply,
    /// `{count, positions, colors}` JSON document.
    Json,
}

impl ExportFormat {
    /// Looks a format up by name (case insensitive).
    ///
    /// Returns `GalaxyError::InvalidParameter` for unknown names.
    pub fn from_name(name: &str) -> Result<Self, GalaxyError> {
        match name.to_ascii_lowercase().as_str() {
            "ply" => Ok(ExportFormat::Ply),
            "json" => Ok(ExportFormat::Json),
            _ => Err(GalaxyError::invalid(
                "format",
                format!("unknown format '{name}', expected one of {}", FORMAT_NAMES.join(", ")),
            )),
        }
    }

    /// Picks the format from the file extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, GalaxyError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                GalaxyError::invalid(
                    "format",
                    format!("cannot infer format from '{}'", path.display()),
                )
            })?;
        Self::from_name(ext)
    }

    /// Returns a slice of all recognized format names.
    pub fn list_formats() -> &'static [&'static str] {
        FORMAT_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Ply => "ply",
            ExportFormat::Json => "json",
        }
    }
}

/// Writes `buffers` to `path` in `format`.
///
/// Returns `GalaxyError::Io` if the file cannot be created or written.
pub fn write(buffers: &GalaxyBuffers, format: ExportFormat, path: &Path) -> Result<(), GalaxyError> {
    let io_err = |e: std::io::Error| GalaxyError::Io(format!("{}: {e}", path.display()));

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    match format {
        ExportFormat::Ply => ply::write_ply(buffers, &mut out).map_err(io_err)?,
        ExportFormat::Json => serde_json::to_writer(&mut out, &json::to_json(buffers))
            .map_err(|e| GalaxyError::Io(format!("{}: {e}", path.display())))?,
    }
    out.flush().map_err(io_err)?;

    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        particles = buffers.len(),
        "galaxy exported"
    );
    Ok(())
}
