#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hotspot analysis parameter and result types.

use crime_hotspot_crime_models::CrimeType;
use crime_hotspot_incident_models::Coordinates;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default cluster radius, in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Smallest cluster size that may be reported as a hotspot.
pub const MIN_CLUSTER_SIZE_FLOOR: usize = 2;

/// How incidents are grouped around a cluster seed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClusteringMode {
    /// Members must lie within the radius of the seed itself. Two members
    /// may be up to twice the radius apart.
    #[default]
    Anchor,
    /// Every admitted member becomes an anchor in turn, so a cluster is a
    /// connected component of the "within radius" graph.
    ///
    /// Alternate mode; [`Self::Anchor`] is the production behavior.
    Transitive,
}

impl TryFrom<String> for ClusteringMode {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parameters for a hotspot analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotParams {
    /// Clusters with fewer members than this are dropped. Must be at least
    /// [`MIN_CLUSTER_SIZE_FLOOR`].
    pub min_cluster_size: usize,
    /// Cluster membership radius in kilometers.
    pub radius_km: f64,
    /// Grouping strategy.
    pub mode: ClusteringMode,
}

impl Default for HotspotParams {
    fn default() -> Self {
        Self {
            min_cluster_size: MIN_CLUSTER_SIZE_FLOOR,
            radius_km: DEFAULT_RADIUS_KM,
            mode: ClusteringMode::Anchor,
        }
    }
}

impl HotspotParams {
    /// Default parameters with the given minimum cluster size.
    #[must_use]
    pub fn with_min_cluster_size(min_cluster_size: usize) -> Self {
        Self {
            min_cluster_size,
            ..Self::default()
        }
    }

    /// Checks the preconditions callers must enforce before running an
    /// analysis.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParamsError`] if `min_cluster_size` is below
    /// [`MIN_CLUSTER_SIZE_FLOOR`] or the radius is not a positive finite
    /// number.
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if self.min_cluster_size < MIN_CLUSTER_SIZE_FLOOR {
            return Err(InvalidParamsError::MinClusterSize {
                value: self.min_cluster_size,
            });
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(InvalidParamsError::Radius {
                value: self.radius_km,
            });
        }
        Ok(())
    }
}

/// Error returned by [`HotspotParams::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidParamsError {
    /// `min_cluster_size` below [`MIN_CLUSTER_SIZE_FLOOR`].
    MinClusterSize {
        /// The rejected value.
        value: usize,
    },
    /// Radius not a positive finite number.
    Radius {
        /// The rejected value.
        value: f64,
    },
}

impl std::fmt::Display for InvalidParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinClusterSize { value } => write!(
                f,
                "invalid minimum cluster size {value}: expected at least {MIN_CLUSTER_SIZE_FLOOR}"
            ),
            Self::Radius { value } => {
                write!(f, "invalid radius {value} km: expected a positive number")
            }
        }
    }
}

impl std::error::Error for InvalidParamsError {}

/// Number of hotspot members filed under one crime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Crime type.
    pub category: CrimeType,
    /// Number of members.
    pub count: usize,
}

/// A reportable geographic cluster of incidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotDescriptor {
    /// Planar mean of member coordinates.
    pub centroid: Coordinates,
    /// Number of member incidents.
    pub crime_count: usize,
    /// Member counts per crime type, in canonical order, zero counts omitted.
    pub category_counts: Vec<CategoryCount>,
    /// Crime type with the highest count. Ties go to the type that comes
    /// first in canonical order.
    pub dominant_category: CrimeType,
    /// Mean urgency score of the members.
    pub average_severity: f64,
    /// Radius the cluster was built with, in kilometers.
    pub radius_km: f64,
    /// Member incident identifiers in the order they joined the cluster.
    pub incident_ids: Vec<String>,
}
