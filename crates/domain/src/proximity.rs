//! Geofence proximity evaluation.
//!
//! [`evaluate`] is pure: the caller owns the [`ProximityState`] and threads
//! the returned state into the next call. An id stays in
//! `currently_near` while samples keep landing inside its radius, and it is
//! only reported in `new_entries` again after some sample has left it.

use crate::geo::{distance_meters, Coordinates};
use crate::geofence::GeofenceRecord;
use rustc_hash::FxHashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProximityState {
    pub currently_near: FxHashSet<Arc<str>>,
}

impl ProximityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_near(&self, geofence_id: &str) -> bool {
        self.currently_near.contains(geofence_id)
    }

    pub fn len(&self) -> usize {
        self.currently_near.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currently_near.is_empty()
    }
}

/// A geofence the sample fell inside, with the live distance to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityHit {
    pub geofence: GeofenceRecord,
    pub distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProximityEvaluation {
    /// Every geofence within its own radius, nearest first.
    pub hits: Vec<ProximityHit>,
    /// Hits that were not near on the previous evaluation, nearest first.
    pub new_entries: Vec<ProximityHit>,
    /// Ids near on the previous evaluation but not anymore.
    pub exits: Vec<Arc<str>>,
    pub updated_state: ProximityState,
}

pub fn evaluate(
    location: Coordinates,
    geofences: &[GeofenceRecord],
    previous: &ProximityState,
) -> ProximityEvaluation {
    let mut hits: Vec<ProximityHit> = geofences
        .iter()
        .filter_map(|geofence| {
            let distance = distance_meters(location, geofence.coordinates);
            (distance <= f64::from(geofence.notification_radius_meters)).then(|| ProximityHit {
                geofence: geofence.clone(),
                distance_meters: distance,
            })
        })
        .collect();

    // stable sort keeps input order for equal distances
    hits.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

    let updated_state = ProximityState {
        currently_near: hits.iter().map(|h| h.geofence.id.clone()).collect(),
    };

    let mut announced: FxHashSet<Arc<str>> = FxHashSet::default();
    let new_entries = hits
        .iter()
        .filter(|h| !previous.currently_near.contains(&h.geofence.id))
        .filter(|h| announced.insert(h.geofence.id.clone()))
        .cloned()
        .collect();

    let mut exits: Vec<Arc<str>> = previous
        .currently_near
        .iter()
        .filter(|id| !updated_state.currently_near.contains(*id))
        .cloned()
        .collect();
    exits.sort();

    ProximityEvaluation {
        hits,
        new_entries,
        exits,
        updated_state,
    }
}
