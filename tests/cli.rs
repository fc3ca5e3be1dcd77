use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn gpx2csv(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gpx2csv"))
        .args(args)
        .current_dir(dir)
        .env_remove("GPX2CSV_OUTPUT_FORMAT")
        .env_remove("GPX2CSV_KEEP_EMPTY_FILTER")
        .env_remove("LOG_LEVEL")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_track(dir: &Path, name: &str, points: &str) {
    let body = format!(
        r#"<?xml version="1.0"?><gpx version="1.0"><trk><trkseg>{}</trkseg></trk></gpx>"#,
        points
    );
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn test_stopping_time_alone_exits_with_usage_code() {
    let dir = tempfile::tempdir().unwrap();
    write_track(dir.path(), "ride.gpx", "");

    let output = gpx2csv(dir.path(), &["ride.gpx", "--stopping-time", "600"]);

    assert_eq!(output.status.code(), Some(2));
    let message = stderr(&output);
    assert!(message.contains("gpx2csv: error:"), "{}", message);
    assert!(message.contains("together"), "{}", message);
    assert!(!dir.path().join("ride.csv").exists());
}

#[test]
fn test_point_without_time_exits_malformed_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_track(
        dir.path(),
        "bad.gpx",
        r#"<trkpt lat="45.1" lon="9.1"><speed>3</speed></trkpt>"#,
    );
    let out = dir.path().to_string_lossy().into_owned();

    let output = gpx2csv(dir.path(), &["bad.gpx", "--output-path", &out]);

    assert_eq!(output.status.code(), Some(4));
    let message = stderr(&output);
    assert!(message.contains("missing <time>"), "{}", message);
    assert!(!dir.path().join("bad.csv").exists());
}

#[test]
fn test_non_gpx_input_exits_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("track.kml"), "<kml></kml>").unwrap();

    let output = gpx2csv(dir.path(), &["track.kml"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("has not yet been developed"));
    assert!(!dir.path().join("track.csv").exists());
}

#[test]
fn test_short_stop_written_as_filtered_csv() {
    let dir = tempfile::tempdir().unwrap();
    let points: String = [(0, 10), (1, 2), (2, 2)]
        .iter()
        .map(|(second, speed)| {
            format!(
                r#"<trkpt lat="45.{second}" lon="9.{second}"><time>2021-01-04T10:00:0{second}.000Z</time><speed>{speed}</speed></trkpt>"#
            )
        })
        .collect();
    write_track(dir.path(), "ride.gpx", &points);
    let out = dir.path().to_string_lossy().into_owned();

    let output = gpx2csv(
        dir.path(),
        &[
            "ride.gpx",
            "--stopping-time",
            "1",
            "--speed-range",
            "0",
            "5",
            "--output-path",
            &out,
        ],
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let mut reader = csv::Reader::from_path(dir.path().join("ride.csv")).unwrap();
    assert_eq!(reader.headers().unwrap().get(0), Some("start_latitude"));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some("45.1"));
    assert_eq!(rows[0].get(4), Some("45.2"));
    assert_eq!(rows[0].get(8), Some("0"));
}
