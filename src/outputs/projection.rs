use crate::models::{ConversionResult, Mode, PointRecord, StopoverRecord};

const DEFAULT_HEADER: [&str; 10] = [
    "latitude",
    "longitude",
    "time (original)",
    "date",
    "hour",
    "time_zone",
    "speed",
    "ele",
    "sat",
    "hdop",
];

//   start of stopover                 | end of stopover
//   lat, lon, date, hour              | lat, lon, date, hour, duration
const FILTERED_HEADER: [&str; 9] = [
    "start_latitude",
    "start_longitude",
    "start_date",
    "start_hour",
    "end_latitude",
    "end_longitude",
    "end_date",
    "end_hour",
    "stopping_duration (integer rounded minutes)",
];

impl Mode {
    pub fn header(self) -> &'static [&'static str] {
        match self {
            Mode::Default => &DEFAULT_HEADER,
            Mode::Filtered => &FILTERED_HEADER,
        }
    }
}

impl PointRecord {
    pub fn fields(&self) -> Vec<String> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        vec![
            self.latitude.clone(),
            self.longitude.clone(),
            self.time.original.clone(),
            self.time.date.clone(),
            self.time.hour.clone(),
            self.time.time_zone.clone(),
            self.speed.to_string(),
            optional(&self.elevation),
            optional(&self.satellites),
            optional(&self.hdop),
        ]
    }
}

impl StopoverRecord {
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.start.latitude.clone(),
            self.start.longitude.clone(),
            self.start.date.clone(),
            self.start.hour.clone(),
            self.end.latitude.clone(),
            self.end.longitude.clone(),
            self.end.date.clone(),
            self.end.hour.clone(),
            self.stopping_duration_minutes.to_string(),
        ]
    }
}

impl ConversionResult {
    pub fn header(&self) -> &'static [&'static str] {
        self.mode().header()
    }

    /// Flat rows in header order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            ConversionResult::Default(points) => points.iter().map(PointRecord::fields).collect(),
            ConversionResult::Filtered(stopovers) => {
                stopovers.iter().map(StopoverRecord::fields).collect()
            }
        }
    }
}
