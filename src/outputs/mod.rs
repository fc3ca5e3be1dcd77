pub mod csv_writer;
pub mod json_writer;
pub mod projection;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{ConvertError, Result};
use crate::models::ConversionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConvertError::UnsupportedFormat {
                kind: "output",
                name: name.to_string(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn write_to<W: Write>(self, result: &ConversionResult, out: W) -> Result<()> {
        match self {
            OutputFormat::Csv => csv_writer::write(result, out),
            OutputFormat::Json => json_writer::write(result, out),
        }
    }

    /// Writes `result` to `path`, removing the file again if writing fails
    /// part way.
    pub fn save(self, result: &ConversionResult, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
        let mut out = BufWriter::new(file);

        let written = self
            .write_to(result, &mut out)
            .and_then(|_| out.flush().map_err(|e| ConvertError::io(path, e)));
        if let Err(err) = written {
            drop(out);
            if let Err(e) = fs::remove_file(path) {
                warn!("Could not remove partial output {}: {}", path.display(), e);
            }
            return Err(err);
        }

        info!(
            "Wrote {} {:?} rows to {}",
            result.len(),
            result.mode(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointRecord, TrackTime};

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_name(" JSON ").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::from_name("xlsx"),
            Err(ConvertError::UnsupportedFormat { kind: "output", .. })
        ));
    }

    #[test]
    fn test_save_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ride.csv");
        let result = ConversionResult::Default(vec![PointRecord {
            latitude: "1".to_string(),
            longitude: "2".to_string(),
            time: TrackTime::parse("2021-01-04T10:00:00Z").unwrap(),
            speed: 0,
            elevation: None,
            satellites: None,
            hdop: None,
        }]);

        OutputFormat::Csv.save(&result, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("1,2,2021-01-04T10:00:00Z,"));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let result = ConversionResult::Filtered(Vec::new());
        let err = OutputFormat::Json
            .save(&result, Path::new("/no/such/dir/ride.json"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
