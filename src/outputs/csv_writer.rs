use std::io::Write;

use crate::error::Result;
use crate::models::ConversionResult;

/// Header row followed by one record per row, standard CSV quoting.
pub fn write<W: Write>(result: &ConversionResult, out: W) -> Result<()> {
    let mut writer = ::csv::Writer::from_writer(out);
    writer.write_record(result.header())?;
    for row in result.rows() {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(::csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointRecord, TrackTime};

    fn points() -> Vec<PointRecord> {
        ["2021-01-04T10:00:00.000+01:00", "2021-01-04T10:00:05.000+01:00"]
            .iter()
            .enumerate()
            .map(|(i, time)| PointRecord {
                latitude: format!("45.46{}", i),
                longitude: "9.19".to_string(),
                time: TrackTime::parse(time).unwrap(),
                speed: i as i64 * 7,
                elevation: Some("120".to_string()),
                satellites: Some("10".to_string()),
                // forces quoting
                hdop: Some("0,9".to_string()),
            })
            .collect()
    }

    #[test]
    fn test_writes_header_then_rows() {
        let mut buf = Vec::new();
        write(&ConversionResult::Default(points()), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "latitude,longitude,time (original),date,hour,time_zone,speed,ele,sat,hdop"
        );
        assert_eq!(
            lines[1],
            "45.460,9.19,2021-01-04T10:00:00.000+01:00,2021-01-04,10:00:00,+01:00,0,120,10,\"0,9\""
        );
    }

    #[test]
    fn test_default_rows_survive_reading_back() {
        let result = ConversionResult::Default(points());
        let mut buf = Vec::new();
        write(&result, &mut buf).unwrap();

        let mut reader = ::csv::Reader::from_reader(buf.as_slice());
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(header, result.header());

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(rows, result.rows());
    }

    #[test]
    fn test_empty_filtered_writes_header_only() {
        let mut buf = Vec::new();
        write(&ConversionResult::Filtered(Vec::new()), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("start_latitude,"));
    }
}
