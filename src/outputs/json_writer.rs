use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::{ConversionResult, Mode};

#[derive(Serialize)]
struct Document<'a> {
    mode: Mode,
    header: &'a [&'a str],
    rows: Vec<Map<String, Value>>,
}

/// Writes `{"mode", "header", "rows"}` with each row keyed by header name.
pub fn write<W: Write>(result: &ConversionResult, mut out: W) -> Result<()> {
    let header = result.header();
    let rows = result
        .rows()
        .into_iter()
        .map(|row| {
            header
                .iter()
                .map(|name| name.to_string())
                .zip(row.into_iter().map(Value::String))
                .collect::<Map<String, Value>>()
        })
        .collect();

    let document = Document {
        mode: result.mode(),
        header,
        rows,
    };
    serde_json::to_writer_pretty(&mut out, &document)?;
    out.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}
