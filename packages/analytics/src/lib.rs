#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime hotspot analysis.
//!
//! Turns a snapshot of [`IncidentRecord`]s into a ranked list of
//! [`HotspotDescriptor`]s. The pipeline is:
//!
//! 1. [`cluster::build_clusters`] partitions the incidents that have
//!    coordinates into proximity clusters.
//! 2. [`summary::summarize`] drops clusters below the minimum size and
//!    reduces the rest to descriptors, ordered largest first.
//!
//! Everything here is synchronous and works on the caller's in-memory
//! snapshot. Date-range filtering and parameter validation happen before the
//! snapshot reaches this crate.

pub mod cluster;
pub mod summary;

use crime_hotspot_analytics_models::{
    HotspotDescriptor, HotspotParams, InvalidParamsError, MIN_CLUSTER_SIZE_FLOOR,
};
use crime_hotspot_incident_models::IncidentRecord;
use crime_hotspot_spatial::DistanceError;
use thiserror::Error;

/// Errors that can occur during hotspot analysis.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Analysis parameters failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] InvalidParamsError),

    /// A distance was requested for an incident without coordinates. This
    /// is a bug in the clustering pass, not bad input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(#[from] DistanceError),
}

/// Identifies hotspots using the default radius and anchor clustering.
///
/// `min_cluster_size` must already be validated by the caller (at least
/// [`MIN_CLUSTER_SIZE_FLOOR`]).
///
/// # Errors
///
/// Returns [`AnalyticsError::InvariantViolation`] if the clustering pass
/// ever measures a distance to an incident without coordinates.
pub fn identify_hotspots(
    incidents: &[IncidentRecord],
    min_cluster_size: usize,
) -> Result<Vec<HotspotDescriptor>, AnalyticsError> {
    identify_hotspots_with(
        incidents,
        &HotspotParams::with_min_cluster_size(min_cluster_size),
    )
}

/// Identifies hotspots with explicit parameters.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvariantViolation`] if the clustering pass
/// ever measures a distance to an incident without coordinates.
pub fn identify_hotspots_with(
    incidents: &[IncidentRecord],
    params: &HotspotParams,
) -> Result<Vec<HotspotDescriptor>, AnalyticsError> {
    debug_assert!(
        params.min_cluster_size >= MIN_CLUSTER_SIZE_FLOOR,
        "min_cluster_size must be validated by the caller"
    );

    let clusters = cluster::build_clusters(incidents, params.radius_km, params.mode)?;
    let hotspots = summary::summarize(&clusters, params);

    log::debug!(
        "Identified {} hotspots from {} clusters ({} incidents, mode={}, radius={} km)",
        hotspots.len(),
        clusters.len(),
        incidents.len(),
        params.mode,
        params.radius_km,
    );

    Ok(hotspots)
}
