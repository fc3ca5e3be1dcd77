pub mod gpx;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ConvertError, Result};
use crate::models::PointRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Gpx,
}

impl InputFormat {
    /// Picks the parser from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "gpx" => Ok(InputFormat::Gpx),
            _ => Err(ConvertError::UnsupportedFormat {
                kind: "parse",
                name: if extension.is_empty() {
                    path.display().to_string()
                } else {
                    extension
                },
            }),
        }
    }

    pub fn parse_str(self, text: &str) -> Result<Vec<PointRecord>> {
        match self {
            InputFormat::Gpx => gpx::parse_str(text),
        }
    }

    pub fn parse_file(self, path: &Path) -> Result<Vec<PointRecord>> {
        let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        let points = self.parse_str(&text)?;
        info!("Parsed {} trackpoints from {}", points.len(), path.display());
        Ok(points)
    }
}
