#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rule-based urgency scoring.
//!
//! Each newly filed incident gets a score in `0..=100` built from four
//! parts:
//!
//! | Part | Points |
//! |---|---|
//! | Crime type | `round(severity * 0.7)`, at most 70 |
//! | Description keywords | sum of matched [`keywords::KEYWORD_GROUPS`], capped at [`DESCRIPTION_CAP`] |
//! | Location known | [`GEO_BONUS`] |
//! | Newly filed | [`RECENCY_BONUS`] |
//!
//! Scoring is a pure function of the incident. The caller persists the
//! result on the record.

pub mod keywords;

use crime_hotspot_crime_models::CrimeType;
use crime_hotspot_incident_models::{IncidentRecord, UrgencyScore};
use serde::Serialize;

use crate::keywords::KEYWORD_GROUPS;

/// Weight applied to a crime type's severity, in tenths.
pub const SEVERITY_WEIGHT_TENTHS: u32 = 7;

/// Maximum points the description can contribute.
pub const DESCRIPTION_CAP: u8 = 15;

/// Points for an incident with both coordinates present.
pub const GEO_BONUS: u8 = 5;

/// Flat bonus for every newly scored incident.
pub const RECENCY_BONUS: u8 = 5;

/// The individual contributions that make up an urgency score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Points from the crime type's severity.
    pub base: u8,
    /// Points from description keywords, after the cap.
    pub description: u8,
    /// Points for a known location.
    pub geo: u8,
    /// Flat recency points.
    pub recency: u8,
    /// Names of the keyword groups that matched.
    pub matched_groups: Vec<&'static str>,
}

impl ScoreBreakdown {
    /// Sum of all parts, clamped into `0..=100`.
    #[must_use]
    pub fn total(&self) -> UrgencyScore {
        let sum = i64::from(self.base)
            + i64::from(self.description)
            + i64::from(self.geo)
            + i64::from(self.recency);
        UrgencyScore::clamped(sum)
    }
}

/// Severity contribution for a crime type: `severity * 0.7`, rounded half
/// up.
#[must_use]
pub fn base_points(category: CrimeType) -> u8 {
    let weighted = (u32::from(category.severity()) * SEVERITY_WEIGHT_TENTHS + 5) / 10;
    u8::try_from(weighted).unwrap_or(u8::MAX)
}

/// Description contribution and the names of the groups that matched.
///
/// Matching is case-insensitive. An absent or empty description is worth
/// nothing.
#[must_use]
pub fn description_points(description: Option<&str>) -> (u8, Vec<&'static str>) {
    let Some(text) = description.filter(|d| !d.trim().is_empty()) else {
        return (0, Vec::new());
    };

    let lower = text.to_lowercase();
    let mut points: u8 = 0;
    let mut matched = Vec::new();

    for group in KEYWORD_GROUPS {
        if group.matches(&lower) {
            points = points.saturating_add(group.points);
            matched.push(group.name);
        }
    }

    (points.min(DESCRIPTION_CAP), matched)
}

/// Computes every contribution to `incident`'s urgency score.
#[must_use]
pub fn score_breakdown(incident: &IncidentRecord) -> ScoreBreakdown {
    let (description, matched_groups) = description_points(incident.description.as_deref());

    ScoreBreakdown {
        base: base_points(incident.category),
        description,
        geo: if incident.has_location() { GEO_BONUS } else { 0 },
        recency: RECENCY_BONUS,
        matched_groups,
    }
}

/// Computes the urgency score for `incident`.
#[must_use]
pub fn score(incident: &IncidentRecord) -> UrgencyScore {
    score_breakdown(incident).total()
}

/// Scores `incident` and stores the result on it.
pub fn apply_score(incident: &mut IncidentRecord) -> UrgencyScore {
    apply_score_explained(incident).total()
}

/// Scores `incident`, stores the result on it and returns the breakdown.
pub fn apply_score_explained(incident: &mut IncidentRecord) -> ScoreBreakdown {
    let breakdown = score_breakdown(incident);
    let total = breakdown.total();

    log::trace!(
        "Scored incident {}: base={} description={} geo={} recency={} matched={:?} -> {total}",
        incident.id,
        breakdown.base,
        breakdown.description,
        breakdown.geo,
        breakdown.recency,
        breakdown.matched_groups,
    );

    incident.urgency_score = total;
    breakdown
}

/// Scores every incident in `incidents` in place.
pub fn apply_scores(incidents: &mut [IncidentRecord]) {
    for incident in incidents.iter_mut() {
        apply_score(incident);
    }
    log::debug!("Scored {} incidents", incidents.len());
}
