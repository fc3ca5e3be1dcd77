use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use crate::config::{SpeedRange, StoppingConfig};
use crate::error::{ConvertError, Result};
use crate::models::{Endpoint, PointRecord, StopoverRecord};

const SECONDS_IN_MINUTE: f64 = 60.0;

#[derive(Debug)]
struct OpenRun {
    start: Endpoint,
    /// Set once the run has lasted at least the stopping time; overwritten on
    /// every later point of the run.
    qualified: Option<(Endpoint, i64)>,
}

impl OpenRun {
    fn into_stopover(self) -> Option<StopoverRecord> {
        let (end, minutes) = self.qualified?;
        Some(StopoverRecord {
            start: self.start,
            end,
            stopping_duration_minutes: minutes,
        })
    }
}

/// Single-pass stopover detector. Feed trackpoints in chronological order
/// with [`push`](Self::push), then call [`finish`](Self::finish).
#[derive(Debug)]
pub struct StopoverDetector {
    min_seconds: f64,
    speed_range: SpeedRange,
    run: Option<OpenRun>,
    previous: Option<DateTime<FixedOffset>>,
    seen: usize,
}

impl StopoverDetector {
    pub fn new(config: &StoppingConfig) -> Self {
        if let Some(distance) = config.distance_range {
            warn!(
                "Distance range {}..{} km is not implemented yet, ignoring it",
                distance.min, distance.max
            );
        }
        Self {
            min_seconds: config.min_stop_duration_seconds as f64,
            speed_range: config.speed_range,
            run: None,
            previous: None,
            seen: 0,
        }
    }

    /// Returns a stopover when this point ends a qualifying run.
    pub fn push(&mut self, point: &PointRecord) -> Result<Option<StopoverRecord>> {
        self.seen += 1;
        let instant = point.time.instant;
        if let Some(previous) = self.previous {
            if instant < previous {
                return Err(ConvertError::malformed_at(
                    self.seen,
                    format!(
                        "timestamps out of order ({} is earlier than {})",
                        point.time.original, previous
                    ),
                ));
            }
        }
        self.previous = Some(instant);

        if !self.speed_range.contains(point.speed) {
            return Ok(self.close());
        }

        let run = self.run.get_or_insert_with(|| {
            debug!("Stop run opened at point {} ({})", self.seen, point.time.original);
            OpenRun {
                start: Endpoint::from(point),
                qualified: None,
            }
        });

        let elapsed = elapsed_seconds(run.start.instant, instant);
        if elapsed >= self.min_seconds {
            let minutes = (elapsed / SECONDS_IN_MINUTE).round_ties_even() as i64;
            run.qualified = Some((Endpoint::from(point), minutes));
        }
        Ok(None)
    }

    pub fn finish(mut self) -> Option<StopoverRecord> {
        self.close()
    }

    fn close(&mut self) -> Option<StopoverRecord> {
        let run = self.run.take()?;
        let stopover = run.into_stopover();
        match &stopover {
            Some(s) => debug!(
                "Stopover closed: {} {} -> {} {} ({} min)",
                s.start.date, s.start.hour, s.end.date, s.end.hour, s.stopping_duration_minutes
            ),
            None => debug!("Stop run at point {} too short, discarded", self.seen),
        }
        stopover
    }
}

fn elapsed_seconds(start: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> f64 {
    let delta = now - start;
    delta.num_milliseconds() as f64 / 1000.0
}

pub fn segment(points: &[PointRecord], config: &StoppingConfig) -> Result<Vec<StopoverRecord>> {
    let mut detector = StopoverDetector::new(config);
    let mut stopovers = Vec::new();
    for point in points {
        if let Some(stopover) = detector.push(point)? {
            stopovers.push(stopover);
        }
    }
    stopovers.extend(detector.finish());
    Ok(stopovers)
}
