//! Command-line front end for probing a template.
//!
//! # Usage
//!
//! Full JSON report:
//! ```sh
//! cargo run --example probe_template -- corporate.potx
//! ```
//!
//! Quick human-readable summary of the first five layouts, declared types only:
//! ```sh
//! cargo run --example probe_template -- corporate.potx --format text --shallow --max-layouts 5
//! ```
//!
//! Resolve a placement against the template's slide size:
//! ```sh
//! cargo run --example probe_template -- corporate.potx --place C4 --width 25% --height grid:2
//! ```
//!
//! Set `RUST_LOG=pptx_probe=debug` to see per-layout progress on stderr.

use clap::{Parser, ValueEnum};
use pptx_probe::coords::{CoordinateSpec, Position, SizeSpec, SlideGeometry};
use pptx_probe::{ProbeError, ProbeOptions, Resolver, probe, render_text, to_percentages};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Report what a PowerPoint template offers
#[derive(Parser, Debug)]
#[command(name = "probe_template", version)]
struct Args {
    /// Template or presentation to probe (.pptx, .potx)
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Only list declared placeholder types; do not instantiate layouts
    #[arg(long)]
    shallow: bool,

    /// Analyze at most this many layouts
    #[arg(long, value_name = "N")]
    max_layouts: Option<usize>,

    /// Time budget in seconds
    #[arg(long, value_name = "SECS", default_value = "30", value_parser = parse_timeout)]
    timeout: Duration,

    /// Skip the before/after checksum comparison
    #[arg(long)]
    no_verify: bool,

    /// Position to resolve, e.g. `C4`, `grid:2,3`, `center+0.5in,0` or `10%,20%`
    #[arg(long, value_name = "POSITION", requires = "width", requires = "height")]
    place: Option<String>,

    /// Width for --place (`25%`, `grid:3`, `2in`, `auto`)
    #[arg(long, value_name = "DIMENSION")]
    width: Option<String>,

    /// Height for --place
    #[arg(long, value_name = "DIMENSION")]
    height: Option<String>,

    /// Grid size used by --place
    #[arg(long, default_value_t = 12)]
    grid: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let payload = e.to_payload();
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => println!("{}", json),
                Err(_) => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        },
    }
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

/// Returns whether the report came back with success status.
fn run(args: &Args) -> Result<bool, ProbeError> {
    let options = ProbeOptions::new()
        .with_deep(!args.shallow)
        .with_max_layouts(args.max_layouts)
        .with_timeout(args.timeout)
        .with_verify_integrity(!args.no_verify);

    let report = probe(&args.template, &options)?;

    match args.format {
        OutputFormat::Json => match report.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to serialize report: {}", e),
        },
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    if let (Some(place), Some(width), Some(height)) = (&args.place, &args.width, &args.height) {
        let geometry = SlideGeometry::new(report.slide_geometry.width_emu, report.slide_geometry.height_emu);
        let position: Position = place.parse()?;
        let spec = CoordinateSpec::new(position, SizeSpec::parse(width, height)?);
        let bbox = Resolver::new().with_grid_size(args.grid).resolve(&spec, &geometry, None)?;
        let pct = to_percentages(&bbox, &geometry);
        println!(
            "{} -> left {} top {} width {} height {} EMU ({}% {}% {}% x {}%)",
            place, bbox.left, bbox.top, bbox.width, bbox.height, pct.left, pct.top, pct.width, pct.height
        );
    }

    Ok(report.is_success())
}
