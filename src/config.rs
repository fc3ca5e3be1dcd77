use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use dotenvy::dotenv;

use crate::error::{ConvertError, Result};
use crate::outputs::OutputFormat;

/// Command-line surface of the converter.
#[derive(Parser, Debug)]
#[command(
    name = "gpx2csv",
    version,
    about = "Parse file and save the result in csv file with same name",
    long_about = None
)]
pub struct Cli {
    /// If no path is specified the file will be searched in the current directory
    pub filetoparse: PathBuf,

    /// How long (in seconds) a stopover must last for the vehicle or the user to
    /// be considered unmoving. Must be used together with --speed-range,
    /// eg. --stopping-time 600 --speed-range 0 5
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub stopping_time: Option<u64>,

    /// Min and max speed (as recorded, usually km/h) at which the vehicle or the
    /// user is considered unmoving. Must be used together with --stopping-time
    #[arg(
        long,
        num_args = 2,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true
    )]
    pub speed_range: Option<Vec<i64>>,

    /// Min and max distance (in km). Accepted but not applied yet
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    pub distance_range: Option<Vec<f64>>,

    /// Output directory, must exist. If no path is specified the file will be
    /// saved in the current directory
    #[arg(long, value_name = "DIR")]
    pub output_path: Option<PathBuf>,

    /// Output format (csv or json). Defaults to GPX2CSV_OUTPUT_FORMAT, then csv
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Write an empty filtered table instead of falling back to all trackpoints
    /// when no stopover qualifies
    #[arg(long)]
    pub keep_empty_filter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    pub min: i64,
    pub max: i64,
}

impl SpeedRange {
    pub fn contains(&self, speed: i64) -> bool {
        self.min <= speed && speed <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoppingConfig {
    pub min_stop_duration_seconds: u64,
    pub speed_range: SpeedRange,
    /// Reserved; has no effect on detection.
    pub distance_range: Option<DistanceRange>,
}

impl StoppingConfig {
    pub fn new(min_stop_duration_seconds: u64, speed_range: SpeedRange) -> Self {
        Self {
            min_stop_duration_seconds,
            speed_range,
            distance_range: None,
        }
    }

    /// Builds the configuration from optional parts, rejecting a stopping
    /// time without a speed range and vice versa.
    pub fn from_parts(
        stopping_time: Option<u64>,
        speed_range: Option<(i64, i64)>,
        distance_range: Option<(f64, f64)>,
    ) -> Result<Option<Self>> {
        match (stopping_time, speed_range) {
            (None, None) => Ok(None),
            (Some(seconds), Some((min, max))) => {
                if seconds == 0 {
                    return Err(ConvertError::usage(
                        "argument --stopping-time: must be a positive number of seconds",
                    ));
                }
                if min > max {
                    return Err(ConvertError::usage(format!(
                        "argument --speed-range: min ({}) is greater than max ({})",
                        min, max
                    )));
                }
                Ok(Some(Self {
                    min_stop_duration_seconds: seconds,
                    speed_range: SpeedRange { min, max },
                    distance_range: distance_range.map(|(min, max)| DistanceRange { min, max }),
                }))
            }
            _ => Err(ConvertError::usage(
                "You must use --stopping-time and --speed-range together",
            )),
        }
    }
}

/// What to emit when filtering was requested but nothing qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFilterPolicy {
    #[default]
    FallBack,
    KeepEmpty,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub stopping: Option<StoppingConfig>,
    pub empty_filter: EmptyFilterPolicy,
    pub log_level: String,
}

impl AppConfig {
    /// Merges parsed arguments with the environment (and `.env`, if present).
    pub fn load(cli: Cli) -> Result<Self> {
        dotenv().ok();
        Self::from_sources(cli, |key| env::var(key).ok())
    }

    fn from_sources<F>(cli: Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !cli.filetoparse.is_file() {
            return Err(ConvertError::usage(format!(
                "argument filetoparse: file not exist: '{}'",
                cli.filetoparse.display()
            )));
        }

        let stopping = StoppingConfig::from_parts(
            cli.stopping_time,
            cli.speed_range.as_deref().and_then(pair),
            cli.distance_range.as_deref().and_then(pair),
        )?;

        if let Some(dir) = &cli.output_path {
            if !dir.is_dir() {
                return Err(ConvertError::usage(format!(
                    "argument output-path: path not exist: '{}'",
                    dir.display()
                )));
            }
        }

        let format_name = cli
            .output_format
            .or_else(|| lookup("GPX2CSV_OUTPUT_FORMAT"))
            .unwrap_or_else(|| "csv".to_string());
        let output_format = OutputFormat::from_name(&format_name)?;

        let keep_empty = cli.keep_empty_filter
            || lookup("GPX2CSV_KEEP_EMPTY_FILTER")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false);
        let empty_filter = if keep_empty {
            EmptyFilterPolicy::KeepEmpty
        } else {
            EmptyFilterPolicy::FallBack
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            input_path: cli.filetoparse,
            output_dir: cli.output_path,
            output_format,
            stopping,
            empty_filter,
            log_level,
        })
    }

    /// `<output dir>/<input stem>.<format extension>`, relative to the current
    /// directory when no output directory was given.
    pub fn output_file(&self) -> PathBuf {
        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        let mut file = PathBuf::from(stem);
        file.set_extension(self.output_format.extension());
        match &self.output_dir {
            Some(dir) => dir.join(file),
            None => Path::new(".").join(file),
        }
    }
}

fn pair<T: Copy>(values: &[T]) -> Option<(T, T)> {
    match values {
        [a, b] => Some((*a, *b)),
        _ => None,
    }
}
