//! Command-line host: runs the analysis for one station, prints the trend
//! metrics and horizon predictions, and writes the charts and PDF report.
//!
//! Set `RUST_LOG=info` (or `debug`) to follow the pipeline.

use clap::Parser;
use climtrend::{
    ClimateConfig, ClimateError, ClimateTrends, ErrorKind, HorizonOffsets, HorizonSlot,
    ReportData, Variable, DISPLAY_DECIMALS, EXTRAPOLATION_CAVEAT,
};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Climate trend analysis and linear extrapolation for one station
#[derive(Parser, Debug)]
#[command(name = "climtrend")]
struct Args {
    /// JSON configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Short horizon, in years from now (1-50)
    #[arg(long, default_value_t = HorizonSlot::Short.default_offset())]
    short: u32,

    /// Medium horizon, in years from now (51-500)
    #[arg(long, default_value_t = HorizonSlot::Medium.default_offset())]
    medium: u32,

    /// Long horizon, in years from now (501-2000)
    #[arg(long, default_value_t = HorizonSlot::Long.default_offset())]
    long: u32,

    /// Directory receiving the SVG charts and the PDF report
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Skip the PDF report
    #[arg(long)]
    no_pdf: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ClimateError> {
    let config = match &args.config {
        Some(path) => ClimateConfig::from_json_file(path)?,
        None => ClimateConfig::default(),
    };
    let offsets = HorizonOffsets::new(args.short, args.medium, args.long)?;
    let client = ClimateTrends::new(config);

    let report = client.report().offsets(offsets).call()?;
    print_summary(&report);

    fs::create_dir_all(&args.output).map_err(|e| output_error(&args.output, e))?;

    // Fonts are optional for the charts, so their absence is only reported
    // once the PDF is actually requested.
    let fonts_found = client.fonts().is_ok();
    if !fonts_found {
        warn!("Report fonts not found, charts are drawn without text");
    }
    for (variable, svg) in client.charts(&report) {
        match svg {
            Ok(svg) => {
                let path = args.output.join(format!("{}_trend.svg", variable.key()));
                fs::write(&path, svg).map_err(|e| output_error(&path, e))?;
                println!("Chart written to {}", path.display());
            }
            Err(e) => eprintln!("{}", user_message(&e)),
        }
    }

    if args.no_pdf {
        return Ok(());
    }
    match client.pdf(&report) {
        Ok(bytes) => {
            let path = args.output.join(client.pdf_file_name(&report));
            fs::write(&path, bytes).map_err(|e| output_error(&path, e))?;
            println!("PDF report written to {}", path.display());
        }
        Err(e) if !e.is_terminal() => {
            eprintln!("{}", user_message(&e));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn print_summary(report: &ReportData) {
    println!(
        "Station {} ({}): data covers {} to {}",
        report.station().name,
        report.station().id,
        report.first_year(),
        report.last_year()
    );
    println!();
    for metric in report.trend_metrics() {
        println!(
            "{:<28} {:>16}  {}",
            metric.variable.label(),
            metric.slope_label(),
            metric.direction_label()
        );
    }

    println!();
    print!("{:>8}", "Year");
    for variable in Variable::ALL {
        print!("{:>24}", format!("{} [{}]", variable, variable.unit()));
    }
    println!();
    for row in report.prediction_rows(|_| DISPLAY_DECIMALS) {
        print!("{:>8}", row.year);
        for value in &row.values {
            print!("{:>24}", value);
        }
        println!();
    }
    println!();
    println!("Warning: {}", EXTRAPOLATION_CAVEAT);
    println!();
    info!("Summary printed for {} horizons", report.predictions().len());
}

fn output_error(path: &Path, e: std::io::Error) -> ClimateError {
    ClimateError::OutputWrite(path.to_path_buf(), e)
}

/// Human readable message per error kind; never a backtrace.
fn user_message(e: &ClimateError) -> String {
    match e.kind() {
        ErrorKind::SourceUnavailable => format!("Input data is unavailable: {}", e),
        ErrorKind::SourceMalformed => format!("Input data is malformed: {}", e),
        ErrorKind::NoCompleteYears => format!("No usable data: {}", e),
        ErrorKind::InsufficientData => format!("Not enough data for a trend: {}", e),
        ErrorKind::ReportAssetMissing => format!("PDF report not produced: {}", e),
        ErrorKind::InvalidConfig => format!("Invalid configuration: {}", e),
        ErrorKind::Processing => format!("Processing failed: {}", e),
    }
}
