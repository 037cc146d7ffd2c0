//! Proximity clustering of located incidents.
//!
//! Incidents without coordinates are skipped entirely. The rest are visited
//! in input order; the first unassigned incident seeds a new cluster and
//! every unassigned incident within the radius of an anchor joins it. In
//! [`ClusteringMode::Anchor`] the seed is the only anchor. In
//! [`ClusteringMode::Transitive`] each admitted member becomes an anchor
//! too, in admission order.
//!
//! Either way the result is a partition of the located incidents, and input
//! order alone decides which incidents become seeds. Cost is quadratic in
//! the number of located incidents.

use crime_hotspot_analytics_models::ClusteringMode;
use crime_hotspot_incident_models::IncidentRecord;
use crime_hotspot_spatial::distance_km;

use crate::AnalyticsError;

/// A group of incidents built during one analysis call.
///
/// Borrows from the caller's snapshot, so it cannot outlive it.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    members: Vec<&'a IncidentRecord>,
}

impl<'a> Cluster<'a> {
    /// Members in the order they joined. The seed is always first.
    #[must_use]
    pub fn members(&self) -> &[&'a IncidentRecord] {
        &self.members
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The incident that started this cluster.
    #[must_use]
    pub fn seed(&self) -> Option<&'a IncidentRecord> {
        self.members.first().copied()
    }

    /// Member identifiers in admission order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().map(|m| m.id.as_str())
    }
}

/// Partitions the located incidents of `incidents` into proximity clusters.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvariantViolation`] if a distance is ever
/// measured against an incident without coordinates.
pub fn build_clusters(
    incidents: &[IncidentRecord],
    radius_km: f64,
    mode: ClusteringMode,
) -> Result<Vec<Cluster<'_>>, AnalyticsError> {
    let located: Vec<&IncidentRecord> = incidents.iter().filter(|i| i.has_location()).collect();

    let skipped = incidents.len() - located.len();
    if skipped > 0 {
        log::debug!("Skipping {skipped} incidents without coordinates");
    }

    let mut assigned = vec![false; located.len()];
    let mut clusters = Vec::new();

    while let Some(seed) = assigned.iter().position(|done| !done) {
        assigned[seed] = true;

        let mut members = vec![seed];
        let mut cursor = 0;

        while cursor < members.len() {
            let anchor = members[cursor];
            absorb_neighbors(&located, &mut assigned, anchor, radius_km, &mut members)?;

            if mode == ClusteringMode::Anchor {
                break;
            }
            cursor += 1;
        }

        clusters.push(Cluster {
            members: members.into_iter().map(|idx| located[idx]).collect(),
        });
    }

    log::debug!(
        "Built {} clusters from {} located incidents",
        clusters.len(),
        located.len()
    );

    Ok(clusters)
}

/// Moves every unassigned incident within `radius_km` of `anchor` into
/// `members`, preserving input order.
fn absorb_neighbors(
    located: &[&IncidentRecord],
    assigned: &mut [bool],
    anchor: usize,
    radius_km: f64,
    members: &mut Vec<usize>,
) -> Result<(), AnalyticsError> {
    let origin = located[anchor].location.as_ref();

    for (idx, candidate) in located.iter().enumerate() {
        if assigned[idx] {
            continue;
        }

        let distance = distance_km(origin, candidate.location.as_ref())?;
        if distance <= radius_km {
            assigned[idx] = true;
            members.push(idx);
        }
    }

    Ok(())
}
