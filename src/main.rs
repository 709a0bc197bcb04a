use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use zonekit::output::{self, OutputFormat};
use zonekit::{Result, ZoneBuilder, ZoneConfig, ZoneRequest, Haversine};

/// Builds sanitize/commit/hostile boxes, caps and red boundaries around a point
#[derive(Parser, Debug)]
#[command(name = "zonekit", version, allow_negative_numbers = true)]
struct Cli {
    /// Center latitude in degrees
    lat: String,
    /// Center longitude in degrees
    lon: String,
    /// Altitude, printed with every point
    alt: String,
    /// Rectangle width in kilometers
    width: String,
    /// Rectangle height in kilometers
    height: String,
    /// Facing edge: north, south, east or west
    orientation: String,

    /// Output encoding: records, geojson or csv
    #[arg(long, default_value_t = OutputFormat::Records)]
    format: OutputFormat,

    /// Write to this file instead of stdout (`.gz` compresses)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding the zone offsets and factors
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn run(cli: &Cli) -> Result<()> {
    let request = ZoneRequest::parse(
        &cli.lat,
        &cli.lon,
        &cli.alt,
        &cli.width,
        &cli.height,
        &cli.orientation,
    )?;

    let config = match &cli.config {
        Some(path) => ZoneConfig::from_json_file(path)?,
        None => ZoneConfig::default(),
    };
    log::debug!("zone config: {:?}", config);

    let builder = ZoneBuilder::new(Haversine::default(), config)?;
    let zones = builder.build_all(&request)?;

    let mut writer = output::open_output(cli.output.as_deref())?;
    {
        let mut sink = output::sink_for(cli.format, &mut writer, request.altitude);
        output::render(&zones, sink.as_mut())?;
    }
    writer.finish()?;

    log::info!("rendered {} points as {}", zones.point_count(), cli.format);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
