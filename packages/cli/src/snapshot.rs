//! Incident snapshot loading and date-range pre-filtering.
//!
//! Snapshots are either a JSON array of incident objects or a CSV file with
//! a header row using the same camelCase field names.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::ValueEnum;
use crime_hotspot_incident_models::IncidentRecord;

use crate::CliError;

/// On-disk snapshot encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Guesses the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Loads a snapshot from `path`, using `format` or the file extension.
///
/// # Errors
///
/// Returns [`CliError`] if the file cannot be opened, its format cannot be
/// determined, or its contents do not parse.
pub fn load_snapshot(
    path: &Path,
    format: Option<SnapshotFormat>,
) -> Result<Vec<IncidentRecord>, CliError> {
    let format = format
        .or_else(|| SnapshotFormat::from_path(path))
        .ok_or_else(|| CliError::UnknownFormat {
            path: path.display().to_string(),
        })?;

    let file = std::fs::File::open(path)?;
    let incidents = read_snapshot(std::io::BufReader::new(file), format)?;

    log::info!(
        "Loaded {} incidents from {}",
        incidents.len(),
        path.display()
    );

    Ok(incidents)
}

/// Parses a snapshot from any reader.
///
/// # Errors
///
/// Returns [`CliError::Json`] or [`CliError::Csv`] if the contents do not
/// parse.
pub fn read_snapshot<R: Read>(
    reader: R,
    format: SnapshotFormat,
) -> Result<Vec<IncidentRecord>, CliError> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::from_reader(reader)?),
        SnapshotFormat::Csv => {
            let mut csv_reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader);
            let mut incidents = Vec::new();
            for row in csv_reader.deserialize() {
                incidents.push(row?);
            }
            Ok(incidents)
        }
    }
}

/// Parses a date bound like `"2024-01-01"` or `"2024-01-01T08:30:00"`
/// (interpreted as UTC).
///
/// A date-only end bound covers the whole day, down to its last
/// nanosecond.
///
/// # Errors
///
/// Returns [`CliError::InvalidDate`] if `s` matches neither format.
pub fn parse_date_bound(s: &str, end_of_range: bool) -> Result<DateTime<Utc>, CliError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| CliError::InvalidDate {
        value: s.to_string(),
        message: e.to_string(),
    })?;

    let time = if end_of_range {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
    } else {
        NaiveTime::MIN
    };

    Ok(date.and_time(time).and_utc())
}

/// Keeps incidents filed within `[start, end]`. A missing bound is open.
///
/// # Errors
///
/// Returns [`CliError::InvalidDateRange`] if `start` is after `end`.
pub fn filter_by_filed_date(
    incidents: Vec<IncidentRecord>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<IncidentRecord>, CliError> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(CliError::InvalidDateRange { start, end });
    }

    let before = incidents.len();
    let kept: Vec<IncidentRecord> = incidents
        .into_iter()
        .filter(|i| start.is_none_or(|s| i.filed_at >= s))
        .filter(|i| end.is_none_or(|e| i.filed_at <= e))
        .collect();

    if kept.len() != before {
        log::debug!("Date filter kept {} of {before} incidents", kept.len());
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use crime_hotspot_crime_models::CrimeType;
    use crime_hotspot_incident_models::Coordinates;

    use super::*;

    const JSON_SNAPSHOT: &str = r#"[
        {
            "id": "1",
            "category": "BURGLARY",
            "description": "Rear window forced",
            "latitude": 41.88,
            "longitude": -87.63,
            "filedAt": "2024-02-01T10:00:00Z"
        },
        {
            "id": "2",
            "category": "littering",
            "filedAt": "2024-02-03T10:00:00Z",
            "urgencyScore": 12
        }
    ]"#;

    const CSV_SNAPSHOT: &str = "\
id,category,description,latitude,longitude,filedAt,urgencyScore
1,ROBBERY,Phone taken,41.88,-87.63,2024-02-01T10:00:00Z,
2,theft,,,,2024-02-02T10:00:00Z,40
3,ASSAULT,Fight outside bar,41.89,,2024-02-03T10:00:00Z,
";

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("data/incidents.JSON")),
            Some(SnapshotFormat::Json)
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("incidents.csv")),
            Some(SnapshotFormat::Csv)
        );
        assert_eq!(SnapshotFormat::from_path(Path::new("incidents.xml")), None);
        assert_eq!(SnapshotFormat::from_path(Path::new("incidents")), None);
    }

    #[test]
    fn reads_json_snapshot() {
        let incidents = read_snapshot(JSON_SNAPSHOT.as_bytes(), SnapshotFormat::Json).unwrap();

        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].category, CrimeType::Burglary);
        assert_eq!(
            incidents[0].location,
            Some(Coordinates::new(41.88, -87.63))
        );
        assert_eq!(incidents[1].category, CrimeType::Other);
        assert_eq!(incidents[1].location, None);
        assert_eq!(incidents[1].urgency_score.value(), 12);
    }

    #[test]
    fn reads_csv_snapshot() {
        let incidents = read_snapshot(CSV_SNAPSHOT.as_bytes(), SnapshotFormat::Csv).unwrap();

        assert_eq!(incidents.len(), 3);
        assert_eq!(incidents[0].category, CrimeType::Robbery);
        assert!(incidents[0].has_location());
        assert_eq!(incidents[0].urgency_score.value(), 0);
        assert_eq!(incidents[1].category, CrimeType::Theft);
        assert_eq!(incidents[1].description, None);
        assert!(!incidents[1].has_location());
        assert_eq!(incidents[1].urgency_score.value(), 40);
        // Only a latitude: treated as unlocated.
        assert!(!incidents[2].has_location());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = read_snapshot("[{\"id\": 1}".as_bytes(), SnapshotFormat::Json);
        assert!(matches!(result, Err(CliError::Json(_))));
    }

    #[test]
    fn parses_date_bounds() {
        assert_eq!(
            parse_date_bound("2024-03-05", false).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date_bound("2024-03-05", true).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()
                - chrono::Duration::nanoseconds(1)
        );
        assert_eq!(
            parse_date_bound("2024-03-05T08:30:00", true).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_date_bound("03/05/2024", false),
            Err(CliError::InvalidDate { .. })
        ));
    }

    #[test]
    fn filters_inclusive_range() {
        let incidents = read_snapshot(CSV_SNAPSHOT.as_bytes(), SnapshotFormat::Csv).unwrap();

        let kept = filter_by_filed_date(
            incidents,
            Some(parse_date_bound("2024-02-02", false).unwrap()),
            Some(parse_date_bound("2024-02-03", true).unwrap()),
        )
        .unwrap();

        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn date_only_end_bound_keeps_last_fraction_of_day() {
        let json = r#"[
            {"id": "late", "category": "THEFT", "filedAt": "2024-01-31T23:59:59.500Z"},
            {"id": "next", "category": "THEFT", "filedAt": "2024-02-01T00:00:00Z"}
        ]"#;
        let incidents = read_snapshot(json.as_bytes(), SnapshotFormat::Json).unwrap();

        let kept = filter_by_filed_date(
            incidents,
            Some(parse_date_bound("2024-01-31", false).unwrap()),
            Some(parse_date_bound("2024-01-31", true).unwrap()),
        )
        .unwrap();

        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["late"]);
    }

    #[test]
    fn open_bounds_keep_everything() {
        let incidents = read_snapshot(CSV_SNAPSHOT.as_bytes(), SnapshotFormat::Csv).unwrap();
        assert_eq!(filter_by_filed_date(incidents, None, None).unwrap().len(), 3);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = filter_by_filed_date(
            Vec::new(),
            Some(parse_date_bound("2024-02-05", false).unwrap()),
            Some(parse_date_bound("2024-02-01", true).unwrap()),
        );
        assert!(matches!(result, Err(CliError::InvalidDateRange { .. })));
    }
}
