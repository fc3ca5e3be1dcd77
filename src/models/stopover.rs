use chrono::{DateTime, FixedOffset};

use super::point::PointRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub latitude: String,
    pub longitude: String,
    pub date: String,
    pub hour: String,
    pub instant: DateTime<FixedOffset>,
}

impl From<&PointRecord> for Endpoint {
    fn from(point: &PointRecord) -> Self {
        Self {
            latitude: point.latitude.clone(),
            longitude: point.longitude.clone(),
            date: point.time.date.clone(),
            hour: point.time.hour.clone(),
            instant: point.time.instant,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopoverRecord {
    pub start: Endpoint,
    pub end: Endpoint,
    pub stopping_duration_minutes: i64,
}
