#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Caller-side plumbing for the `crime_hotspot` tool.
//!
//! The analysis and scoring crates assume a validated, already-filtered
//! in-memory snapshot. This crate is the caller that produces one: it loads
//! incidents from disk, applies the filed-date window, merges configuration
//! and rejects invalid parameters before handing off.

pub mod config;
pub mod snapshot;

use std::path::Path;

use chrono::{DateTime, Utc};
use crime_hotspot_analytics::AnalyticsError;
use crime_hotspot_analytics_models::{HotspotDescriptor, HotspotParams};
use crime_hotspot_incident_models::IncidentRecord;
use crime_hotspot_priority::ScoreBreakdown;
use serde::Serialize;
use thiserror::Error;

use crate::snapshot::SnapshotFormat;

/// Errors surfaced by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON snapshot did not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV snapshot did not parse.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file did not parse.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The snapshot format could not be inferred.
    #[error("Unknown snapshot format for {path}: expected a .json or .csv file")]
    UnknownFormat {
        /// Offending path.
        path: String,
    },

    /// A date bound did not parse.
    #[error("Invalid date '{value}': {message}. Expected format: YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Parser message.
        message: String,
    },

    /// The start of the date window is after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start bound.
        start: DateTime<Utc>,
        /// End bound.
        end: DateTime<Utc>,
    },

    /// Parameter validation or the analysis itself failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// Inputs for a hotspot run.
#[derive(Debug, Clone)]
pub struct HotspotRequest<'a> {
    pub input: &'a Path,
    pub format: Option<SnapshotFormat>,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub params: HotspotParams,
}

/// Loads, filters and analyzes a snapshot.
///
/// # Errors
///
/// Returns [`CliError`] if parameters are invalid, the date window is
/// malformed, the snapshot cannot be loaded, or the analysis fails.
pub fn run_hotspots(request: &HotspotRequest<'_>) -> Result<Vec<HotspotDescriptor>, CliError> {
    request
        .params
        .validate()
        .map_err(AnalyticsError::from)?;

    let start = request
        .start_date
        .map(|s| snapshot::parse_date_bound(s, false))
        .transpose()?;
    let end = request
        .end_date
        .map(|s| snapshot::parse_date_bound(s, true))
        .transpose()?;

    let incidents = snapshot::load_snapshot(request.input, request.format)?;

    analyze(incidents, start, end, &request.params)
}

/// Filters an in-memory snapshot to the date window and analyzes it.
///
/// `params` must already be validated.
///
/// # Errors
///
/// Returns [`CliError`] if the date window is inverted or the analysis
/// fails.
pub fn analyze(
    incidents: Vec<IncidentRecord>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    params: &HotspotParams,
) -> Result<Vec<HotspotDescriptor>, CliError> {
    let incidents = snapshot::filter_by_filed_date(incidents, start, end)?;
    let hotspots = crime_hotspot_analytics::identify_hotspots_with(&incidents, params)?;

    log::info!(
        "Found {} hotspots among {} incidents (min size {}, radius {} km, {} clustering)",
        hotspots.len(),
        incidents.len(),
        params.min_cluster_size,
        params.radius_km,
        params.mode,
    );

    Ok(hotspots)
}

/// An incident with its freshly computed score and how it was reached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedScore {
    pub incident: IncidentRecord,
    pub breakdown: ScoreBreakdown,
}

/// Scores every incident in the snapshot at `input`.
///
/// # Errors
///
/// Returns [`CliError`] if the snapshot cannot be loaded.
pub fn run_score(
    input: &Path,
    format: Option<SnapshotFormat>,
) -> Result<Vec<IncidentRecord>, CliError> {
    let mut incidents = snapshot::load_snapshot(input, format)?;
    crime_hotspot_priority::apply_scores(&mut incidents);
    Ok(incidents)
}

/// Scores every incident and keeps the per-part breakdown.
#[must_use]
pub fn explain_scores(incidents: Vec<IncidentRecord>) -> Vec<ExplainedScore> {
    incidents
        .into_iter()
        .map(|mut incident| {
            let breakdown = crime_hotspot_priority::apply_score_explained(&mut incident);
            ExplainedScore {
                incident,
                breakdown,
            }
        })
        .collect()
}
