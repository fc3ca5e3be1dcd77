use std::process::ExitCode;

use clap::Parser;
use gpx2csv::config::{AppConfig, Cli};
use gpx2csv::parsers::InputFormat;
use gpx2csv::{processor, ConvertError};
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gpx2csv: error: {}", err);
            let code = err
                .downcast_ref::<ConvertError>()
                .map(ConvertError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load(cli)?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Converting {}", config.input_path.display());

    // Resolve both formats before reading anything
    let input_format = InputFormat::from_path(&config.input_path)?;
    let output_path = config.output_file();

    let points = input_format.parse_file(&config.input_path)?;
    let result = processor::convert(points, config.stopping.as_ref(), config.empty_filter)?;

    config.output_format.save(&result, &output_path)?;
    Ok(())
}
