//! Reduction of clusters into ranked hotspot descriptors.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crime_hotspot_analytics_models::{CategoryCount, HotspotDescriptor, HotspotParams};
use crime_hotspot_crime_models::CrimeType;
use crime_hotspot_spatial::planar_centroid;

use crate::cluster::Cluster;

/// Turns clusters into hotspots.
///
/// Clusters smaller than `params.min_cluster_size` are dropped. The result
/// is ordered by member count (largest first), then centroid latitude and
/// longitude (ascending).
#[must_use]
pub fn summarize(clusters: &[Cluster<'_>], params: &HotspotParams) -> Vec<HotspotDescriptor> {
    let mut hotspots: Vec<HotspotDescriptor> = clusters
        .iter()
        .filter(|cluster| cluster.len() >= params.min_cluster_size)
        .filter_map(|cluster| describe(cluster, params.radius_km))
        .collect();

    hotspots.sort_by(rank);

    hotspots
}

/// Builds the descriptor for one cluster. `None` only for a cluster with no
/// located members.
fn describe(cluster: &Cluster<'_>, radius_km: f64) -> Option<HotspotDescriptor> {
    let members = cluster.members();
    let centroid = planar_centroid(members.iter().filter_map(|m| m.location.as_ref()))?;

    let mut counts: BTreeMap<CrimeType, usize> = BTreeMap::new();
    for member in members {
        *counts.entry(member.category).or_default() += 1;
    }

    let dominant_category = dominant(&counts)?;

    let score_total: u64 = members
        .iter()
        .map(|m| u64::from(m.urgency_score.value()))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let average_severity = if members.is_empty() {
        0.0
    } else {
        score_total as f64 / members.len() as f64
    };

    Some(HotspotDescriptor {
        centroid,
        crime_count: members.len(),
        category_counts: counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        dominant_category,
        average_severity,
        radius_km,
        incident_ids: cluster.ids().map(str::to_string).collect(),
    })
}

/// Highest count wins; on a tie the earliest type in canonical order wins.
fn dominant(counts: &BTreeMap<CrimeType, usize>) -> Option<CrimeType> {
    let mut best: Option<(CrimeType, usize)> = None;

    for (&category, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((category, count)),
        }
    }

    best.map(|(category, _)| category)
}

fn rank(a: &HotspotDescriptor, b: &HotspotDescriptor) -> Ordering {
    b.crime_count
        .cmp(&a.crime_count)
        .then_with(|| a.centroid.latitude.total_cmp(&b.centroid.latitude))
        .then_with(|| a.centroid.longitude.total_cmp(&b.centroid.longitude))
}
