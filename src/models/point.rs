use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, PartialEq)]
pub struct TrackTime {
    pub original: String,
    pub date: String,
    pub hour: String,
    pub time_zone: String,
    pub instant: DateTime<FixedOffset>,
}

impl TrackTime {
    /// Parses `YYYY-MM-DDTHH:MM:SS[.fraction](Z|+HH:MM|-HH:MM)`.
    ///
    /// `hour` drops the fractional seconds; `time_zone` is the offset exactly
    /// as written.
    pub fn parse(text: &str) -> Result<Self, String> {
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|e| format!("invalid timestamp '{}': {}", text, e))?;

        let (date, clock) = text
            .split_once(|c: char| c == 'T' || c == 't')
            .ok_or_else(|| format!("invalid timestamp '{}': missing 'T' separator", text))?;

        // rfc3339 already guarantees the offset is the trailing Z or sign
        let offset_at = clock
            .find(|c: char| matches!(c, 'Z' | 'z' | '+' | '-'))
            .ok_or_else(|| format!("invalid timestamp '{}': missing UTC offset", text))?;
        let (seconds, time_zone) = clock.split_at(offset_at);
        let hour = seconds.split('.').next().unwrap_or(seconds);

        Ok(Self {
            original: text.to_string(),
            date: date.to_string(),
            hour: hour.to_string(),
            time_zone: time_zone.to_string(),
            instant,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub latitude: String,
    pub longitude: String,
    pub time: TrackTime,
    pub speed: i64,
    pub elevation: Option<String>,
    pub satellites: Option<String>,
    pub hdop: Option<String>,
}
