//! Optional TOML configuration for analysis runs.
//!
//! ```toml
//! [hotspots]
//! radius_km = 1.0
//! min_cluster_size = 2
//! mode = "anchor"
//! ```
//!
//! Values given on the command line take precedence over the file, and the
//! file takes precedence over the built-in defaults.

use std::path::Path;

use crime_hotspot_analytics_models::{ClusteringMode, HotspotParams};
use serde::Deserialize;

use crate::CliError;

/// Top-level layout of the configuration file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// `[hotspots]` table.
    #[serde(default)]
    pub hotspots: HotspotsSection,
}

/// `[hotspots]` table. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HotspotsSection {
    pub radius_km: Option<f64>,
    pub min_cluster_size: Option<usize>,
    pub mode: Option<ClusteringMode>,
}

/// Hotspot settings supplied on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HotspotOverrides {
    pub radius_km: Option<f64>,
    pub min_cluster_size: Option<usize>,
    pub mode: Option<ClusteringMode>,
}

impl FileConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the text is not valid TOML or has
    /// keys this tool does not know.
    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Merges this file's values with command-line overrides on top of the
    /// defaults. The result is not validated.
    #[must_use]
    pub fn resolve(&self, overrides: &HotspotOverrides) -> HotspotParams {
        let defaults = HotspotParams::default();
        let file = &self.hotspots;

        HotspotParams {
            min_cluster_size: overrides
                .min_cluster_size
                .or(file.min_cluster_size)
                .unwrap_or(defaults.min_cluster_size),
            radius_km: overrides
                .radius_km
                .or(file.radius_km)
                .unwrap_or(defaults.radius_km),
            mode: overrides.mode.or(file.mode).unwrap_or(defaults.mode),
        }
    }
}
