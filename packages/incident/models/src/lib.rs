#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident snapshot types.
//!
//! An [`IncidentRecord`] is a read-only copy of a complaint as loaded by the
//! persistence layer. Hotspot analysis and priority scoring both operate on
//! slices of these records and never write them back to storage themselves.

use chrono::{DateTime, Utc};
use crime_hotspot_crime_models::CrimeType;
use serde::{Deserialize, Serialize};

/// A WGS84 point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Pairs up optional latitude and longitude.
    ///
    /// Returns `None` unless both halves are present.
    #[must_use]
    pub const fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Urgency of an incident, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct UrgencyScore(u8);

impl UrgencyScore {
    /// Upper bound of the score range.
    pub const MAX: Self = Self(100);

    /// Lower bound of the score range.
    pub const MIN: Self = Self(0);

    /// Creates a score, clamping `value` into `0..=100`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(Self::MAX.0)) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for UrgencyScore {
    fn from(value: u8) -> Self {
        Self::clamped(i64::from(value))
    }
}

impl From<UrgencyScore> for u8 {
    fn from(value: UrgencyScore) -> Self {
        value.0
    }
}

impl std::fmt::Display for UrgencyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complaint snapshot as handed over by the persistence layer.
///
/// Coordinates are optional. Incidents without a location are still scored
/// but never take part in clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IncidentRow", into = "IncidentRow")]
pub struct IncidentRecord {
    /// Identifier assigned by the persistence layer.
    pub id: String,
    /// Crime type the complaint was filed under.
    pub category: CrimeType,
    /// Free-text description supplied by the complainant.
    pub description: Option<String>,
    /// Where the incident happened, if known.
    pub location: Option<Coordinates>,
    /// When the complaint was filed.
    pub filed_at: DateTime<Utc>,
    /// Current urgency score. Zero until the priority scorer has run.
    pub urgency_score: UrgencyScore,
}

impl IncidentRecord {
    /// Creates an unscored incident.
    #[must_use]
    pub fn new(id: impl Into<String>, category: CrimeType, filed_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            category,
            description: None,
            location: None,
            filed_at,
            urgency_score: UrgencyScore::default(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Coordinates::new(latitude, longitude));
        self
    }

    #[must_use]
    pub const fn with_urgency_score(mut self, score: UrgencyScore) -> Self {
        self.urgency_score = score;
        self
    }

    /// Returns `true` if both latitude and longitude are known.
    #[must_use]
    pub const fn has_location(&self) -> bool {
        self.location.is_some()
    }
}

/// Flat wire representation of an [`IncidentRecord`].
///
/// Used for JSON and CSV snapshots where latitude and longitude are separate
/// nullable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRow {
    /// Identifier assigned by the persistence layer.
    pub id: String,
    /// Raw category label, mapped onto [`CrimeType`].
    pub category: CrimeType,
    /// Free-text description. Empty strings are treated as absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Latitude (WGS84).
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    #[serde(default)]
    pub longitude: Option<f64>,
    /// When the complaint was filed.
    pub filed_at: DateTime<Utc>,
    /// Previously stored urgency score, if any. Out-of-range values are
    /// clamped on conversion.
    #[serde(default)]
    pub urgency_score: Option<i64>,
}

impl From<IncidentRow> for IncidentRecord {
    fn from(row: IncidentRow) -> Self {
        let location = Coordinates::from_parts(row.latitude, row.longitude);
        if location.is_none() && (row.latitude.is_some() || row.longitude.is_some()) {
            log::debug!(
                "Incident {} has only one coordinate, treating it as unlocated",
                row.id
            );
        }

        Self {
            id: row.id,
            category: row.category,
            description: row.description.filter(|d| !d.is_empty()),
            location,
            filed_at: row.filed_at,
            urgency_score: row
                .urgency_score
                .map(UrgencyScore::clamped)
                .unwrap_or_default(),
        }
    }
}

impl From<IncidentRecord> for IncidentRow {
    fn from(record: IncidentRecord) -> Self {
        Self {
            id: record.id,
            category: record.category,
            description: record.description,
            latitude: record.location.map(|c| c.latitude),
            longitude: record.location.map(|c| c.longitude),
            filed_at: record.filed_at,
            urgency_score: Some(i64::from(record.urgency_score.value())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn urgency_score_clamps() {
        assert_eq!(UrgencyScore::clamped(-12).value(), 0);
        assert_eq!(UrgencyScore::clamped(55).value(), 55);
        assert_eq!(UrgencyScore::clamped(250).value(), 100);
        assert_eq!(UrgencyScore::from(200u8), UrgencyScore::MAX);
    }

    #[test]
    fn coordinates_need_both_halves() {
        assert_eq!(Coordinates::from_parts(Some(1.0), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(1.0)), None);
        assert_eq!(
            Coordinates::from_parts(Some(1.0), Some(2.0)),
            Some(Coordinates::new(1.0, 2.0))
        );
    }

    #[test]
    fn deserializes_flat_row() {
        let json = r#"{
            "id": "c-17",
            "category": "robbery",
            "description": "Phone taken at knifepoint",
            "latitude": 38.9,
            "longitude": -77.03,
            "filedAt": "2024-03-01T12:00:00Z",
            "urgencyScore": 140
        }"#;

        let record: IncidentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "c-17");
        assert_eq!(record.category, CrimeType::Robbery);
        assert_eq!(record.location, Some(Coordinates::new(38.9, -77.03)));
        assert_eq!(record.urgency_score, UrgencyScore::MAX);
        assert_eq!(
            record.filed_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn half_present_coordinates_become_unlocated() {
        let json = r#"{
            "id": "c-18",
            "category": "THEFT",
            "latitude": 38.9,
            "filedAt": "2024-03-01T12:00:00Z"
        }"#;

        let record: IncidentRecord = serde_json::from_str(json).unwrap();
        assert!(!record.has_location());
        assert_eq!(record.urgency_score.value(), 0);
        assert_eq!(record.description, None);
    }

    #[test]
    fn out_of_range_stored_scores_are_clamped() {
        let json = r#"[
            {"id": "hi", "category": "THEFT", "filedAt": "2024-03-01T12:00:00Z", "urgencyScore": 300},
            {"id": "lo", "category": "THEFT", "filedAt": "2024-03-01T12:00:00Z", "urgencyScore": -5}
        ]"#;

        let records: Vec<IncidentRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].urgency_score, UrgencyScore::MAX);
        assert_eq!(records[1].urgency_score, UrgencyScore::MIN);
    }

    #[test]
    fn serializes_back_to_flat_row() {
        let record = IncidentRecord::new(
            "c-19",
            CrimeType::Vandalism,
            Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap(),
        )
        .with_location(1.5, -2.5)
        .with_urgency_score(UrgencyScore::clamped(33));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["category"], "VANDALISM");
        assert_eq!(value["latitude"], 1.5);
        assert_eq!(value["longitude"], -2.5);
        assert_eq!(value["urgencyScore"], 33);
    }
}
