use serde::Serialize;

use super::point::PointRecord;
use super::stopover::StopoverRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Default,
    Filtered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    Default(Vec<PointRecord>),
    Filtered(Vec<StopoverRecord>),
}

impl ConversionResult {
    pub fn mode(&self) -> Mode {
        match self {
            ConversionResult::Default(_) => Mode::Default,
            ConversionResult::Filtered(_) => Mode::Filtered,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConversionResult::Default(points) => points.len(),
            ConversionResult::Filtered(stopovers) => stopovers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
