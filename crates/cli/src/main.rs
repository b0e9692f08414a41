#![deny(unsafe_code)]
//! CLI binary for the spiral galaxy generator.
//!
//! Subcommands:
//! - `generate` — build a galaxy from flags, JSON params or a recipe, export it
//! - `schema` — print the parameter schema as JSON
//! - `defaults` — print the default parameters
//! - `formats` — list export formats
//!
//! Set `RUST_LOG=debug` to trace generation and export on stderr.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use galaxy_core::{ParameterSet, Recipe, Srgb};
use galaxy_export::ExportFormat;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "galaxy", about = "Spiral galaxy point-cloud generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Per-parameter overrides. Unset flags keep the value from the recipe,
/// `--params`, or the defaults, in that order.
#[derive(clap::Args, Default)]
struct ParamFlags {
    /// Number of particles.
    #[arg(short, long)]
    count: Option<usize>,

    /// Point size hint for the renderer.
    #[arg(long)]
    size: Option<f64>,

    /// Disable distance attenuation of point size.
    #[arg(long)]
    no_size_attenuation: bool,

    /// Maximum galaxy radius.
    #[arg(short, long)]
    radius: Option<f64>,

    /// Number of spiral arms.
    #[arg(short, long)]
    branches: Option<u32>,

    /// Twist in radians per unit radius.
    #[arg(long, allow_hyphen_values = true)]
    spin: Option<f64>,

    /// Maximum per-axis jitter.
    #[arg(long)]
    randomness: Option<f64>,

    /// Exponent pulling jitter toward the arm centerline.
    #[arg(long)]
    randomness_power: Option<f64>,

    /// Color at the center, as hex (e.g. "#ff6030").
    #[arg(long)]
    inside_color: Option<String>,

    /// Color at the rim, as hex (e.g. "#1b3984").
    #[arg(long)]
    outside_color: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a galaxy and write it as a point cloud.
    Generate {
        #[command(flatten)]
        flags: ParamFlags,

        /// Parameters as a JSON object, applied on top of the recipe.
        #[arg(long)]
        params: Option<String>,

        /// Recipe file (JSON `{params, seed}`) to start from.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// PRNG seed for deterministic output [default: recipe seed or 42].
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path.
        #[arg(short, long, default_value = "galaxy.ply")]
        output: PathBuf,

        /// Output format (ply, json). Inferred from the extension if omitted.
        #[arg(short, long)]
        format: Option<String>,

        /// Also write the recipe used, for exact reproduction later.
        #[arg(long)]
        save_recipe: Option<PathBuf>,
    },
    /// Print the parameter schema as JSON.
    Schema,
    /// Print the default parameters.
    Defaults,
    /// List available export formats.
    Formats,
}

fn parse_color(flag: &str, hex: &str) -> Result<Srgb, CliError> {
    Srgb::from_hex(hex).map_err(|e| CliError::Input(format!("--{flag}: {e}")))
}

fn read_recipe(path: &Path) -> Result<Recipe, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid recipe {}: {e}", path.display())))?;
    Ok(Recipe::from_json(&doc)?)
}

/// Resolves the final recipe: defaults < recipe file < `--params` < flags.
fn resolve_recipe(
    recipe: Option<&Path>,
    params_json: Option<&str>,
    flags: &ParamFlags,
    seed: Option<u64>,
) -> Result<Recipe, CliError> {
    let base = match recipe {
        Some(path) => read_recipe(path)?,
        None => Recipe::new(ParameterSet::default(), DEFAULT_SEED),
    };

    let mut params = match params_json {
        Some(text) => {
            let patch: serde_json::Value = serde_json::from_str(text)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            if !patch.is_object() {
                return Err(CliError::Input("--params must be a JSON object".into()));
            }
            let mut merged = base.params.to_json();
            if let (Some(m), Some(p)) = (merged.as_object_mut(), patch.as_object()) {
                m.extend(p.clone());
            }
            ParameterSet::from_json(&merged)?
        }
        None => base.params,
    };

    if let Some(v) = flags.count {
        params.set_count(v)?;
    }
    if let Some(v) = flags.size {
        params.set_size(v)?;
    }
    if flags.no_size_attenuation {
        params.set_size_attenuation(false);
    }
    if let Some(v) = flags.radius {
        params.set_radius(v)?;
    }
    if let Some(v) = flags.branches {
        params.set_branches(v)?;
    }
    if let Some(v) = flags.spin {
        params.set_spin(v)?;
    }
    if let Some(v) = flags.randomness {
        params.set_randomness(v)?;
    }
    if let Some(v) = flags.randomness_power {
        params.set_randomness_power(v)?;
    }
    if let Some(hex) = &flags.inside_color {
        params.set_inside_color(parse_color("inside-color", hex)?)?;
    }
    if let Some(hex) = &flags.outside_color {
        params.set_outside_color(parse_color("outside-color", hex)?)?;
    }

    Ok(Recipe::new(params, seed.unwrap_or(base.seed)))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&ParameterSet::param_schema())?);
        }
        Command::Defaults => {
            let defaults = ParameterSet::default().to_json();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&defaults)?);
            } else if let Some(map) = defaults.as_object() {
                for (name, value) in map {
                    println!("{name:>18}  {value}");
                }
            }
        }
        Command::Formats => {
            let formats = ExportFormat::list_formats();
            if cli.json {
                let info = serde_json::json!({ "formats": formats });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Formats:");
                for name in formats {
                    println!("  {name}");
                }
            }
        }
        Command::Generate {
            flags,
            params,
            recipe,
            seed,
            output,
            format,
            save_recipe,
        } => {
            let recipe = resolve_recipe(recipe.as_deref(), params.as_deref(), &flags, seed)?;
            let format = match format {
                Some(name) => ExportFormat::from_name(&name),
                None => ExportFormat::from_path(&output),
            }
            .map_err(|e| CliError::Input(e.to_string()))?;

            tracing::info!(
                seed = recipe.seed,
                count = recipe.params.count(),
                format = format.name(),
                "generating galaxy"
            );
            let buffers = recipe.generate()?;
            galaxy_export::write(&buffers, format, &output)?;

            if let Some(path) = &save_recipe {
                let text = serde_json::to_string_pretty(&recipe)?;
                std::fs::write(path, text)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            }

            if cli.json {
                let info = serde_json::json!({
                    "particles": buffers.len(),
                    "seed": recipe.seed,
                    "params": recipe.params.to_json(),
                    "format": format.name(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "generated {} particles ({} branches, seed {}) -> {}",
                    buffers.len(),
                    recipe.params.branches(),
                    recipe.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
