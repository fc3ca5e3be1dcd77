pub mod stopover;

use tracing::info;

use crate::config::{EmptyFilterPolicy, StoppingConfig};
use crate::error::Result;
use crate::models::{ConversionResult, PointRecord};

pub use stopover::{segment, StopoverDetector};

/// Turns parsed trackpoints into output rows.
///
/// Without a stopping configuration the points pass through unchanged. With
/// one, the stopovers replace them, unless none qualified and `policy` asks
/// to fall back to the raw points.
pub fn convert(
    points: Vec<PointRecord>,
    stopping: Option<&StoppingConfig>,
    policy: EmptyFilterPolicy,
) -> Result<ConversionResult> {
    let Some(config) = stopping else {
        return Ok(ConversionResult::Default(points));
    };
    if points.is_empty() {
        return Ok(ConversionResult::Default(points));
    }

    let stopovers = segment(&points, config)?;
    info!(
        "Found {} stopovers in {} trackpoints (>= {}s at speed {}..={})",
        stopovers.len(),
        points.len(),
        config.min_stop_duration_seconds,
        config.speed_range.min,
        config.speed_range.max
    );

    if stopovers.is_empty() && policy == EmptyFilterPolicy::FallBack {
        info!("No stopover qualified, writing all trackpoints instead");
        return Ok(ConversionResult::Default(points));
    }
    Ok(ConversionResult::Filtered(stopovers))
}
