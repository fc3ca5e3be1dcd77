//! Streaming `<trkpt>` extraction from GPX documents.
//!
//! Only track points are read; waypoints and route points are skipped. Tag
//! and attribute names are compared by local name, so `gpxtpx:speed` inside
//! `<extensions>` is picked up like a plain `<speed>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, Result};
use crate::models::{PointRecord, TrackTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Time,
    Speed,
    Elevation,
    Satellites,
    Hdop,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"time" => Some(Field::Time),
            b"speed" => Some(Field::Speed),
            b"ele" => Some(Field::Elevation),
            b"sat" => Some(Field::Satellites),
            b"hdop" => Some(Field::Hdop),
            _ => None,
        }
    }
}

/// A `<trkpt>` whose closing tag has not been reached yet.
#[derive(Debug, Default)]
struct PendingPoint {
    index: usize,
    latitude: Option<String>,
    longitude: Option<String>,
    time: Option<String>,
    speed: Option<String>,
    elevation: Option<String>,
    satellites: Option<String>,
    hdop: Option<String>,
}

impl PendingPoint {
    fn from_start(start: &BytesStart<'_>, index: usize) -> Result<Self> {
        let mut point = PendingPoint {
            index,
            ..Default::default()
        };
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConvertError::malformed_at(index, e.to_string()))?;
            let slot = match attr.key.local_name().as_ref() {
                b"lat" => &mut point.latitude,
                b"lon" => &mut point.longitude,
                _ => continue,
            };
            let value = attr
                .unescape_value()
                .map_err(|e| ConvertError::malformed_at(index, e.to_string()))?;
            *slot = Some(value.trim().to_string());
        }
        Ok(point)
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Time => &mut self.time,
            Field::Speed => &mut self.speed,
            Field::Elevation => &mut self.elevation,
            Field::Satellites => &mut self.satellites,
            Field::Hdop => &mut self.hdop,
        }
    }

    fn finish(self) -> Result<PointRecord> {
        let index = self.index;
        let missing = |what: &str| ConvertError::malformed_at(index, format!("missing {}", what));

        let latitude = self.latitude.ok_or_else(|| missing("'lat' attribute"))?;
        let longitude = self.longitude.ok_or_else(|| missing("'lon' attribute"))?;
        let time_text = self.time.ok_or_else(|| missing("<time>"))?;
        let speed_text = self.speed.ok_or_else(|| missing("<speed>"))?;

        let time = TrackTime::parse(&time_text).map_err(|e| ConvertError::malformed_at(index, e))?;
        let speed = speed_text.parse::<i64>().map_err(|_| {
            ConvertError::malformed_at(index, format!("speed '{}' is not an integer", speed_text))
        })?;

        Ok(PointRecord {
            latitude,
            longitude,
            time,
            speed,
            elevation: self.elevation,
            satellites: self.satellites,
            hdop: self.hdop,
        })
    }
}

/// Extracts every track point of a GPX document, in document order.
pub fn parse_str(text: &str) -> Result<Vec<PointRecord>> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut points = Vec::new();
    let mut current: Option<PendingPoint> = None;
    // child element being read and the text gathered so far
    let mut capture: Option<(Field, String)> = None;

    loop {
        let event = reader.read_event().map_err(|e| ConvertError::MalformedInput {
            point: current.as_ref().map(|p| p.index),
            reason: format!("XML error at byte {}: {}", reader.buffer_position(), e),
        })?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"trkpt" {
                    current = Some(PendingPoint::from_start(&e, points.len() + 1)?);
                } else if let (Some(point), Some(field)) =
                    (current.as_mut(), Field::from_local_name(name.as_ref()))
                {
                    // the first occurrence wins
                    if capture.is_none() && point.slot(field).is_none() {
                        capture = Some((field, String::new()));
                    }
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    let point = PendingPoint::from_start(&e, points.len() + 1)?;
                    points.push(point.finish()?);
                }
            }
            Event::Text(t) => {
                if let Some((_, buf)) = capture.as_mut() {
                    let index = current.as_ref().map(|p| p.index).unwrap_or_default();
                    let text = t
                        .unescape()
                        .map_err(|e| ConvertError::malformed_at(index, e.to_string()))?;
                    buf.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some((_, buf)) = capture.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == b"trkpt" {
                    capture = None;
                    if let Some(point) = current.take() {
                        points.push(point.finish()?);
                    }
                } else if let Some((field, text)) = capture.take() {
                    if Field::from_local_name(name.as_ref()) == Some(field) {
                        if let Some(point) = current.as_mut() {
                            *point.slot(field) = Some(text.trim().to_string());
                        }
                    } else {
                        capture = Some((field, text));
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(point) = current {
        return Err(ConvertError::malformed_at(point.index, "unterminated <trkpt>"));
    }
    Ok(points)
}
