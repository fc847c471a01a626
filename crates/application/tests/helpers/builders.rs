use chrono::{TimeZone, Utc};
use picketline_domain::{
    ActionType, BlocklistRecord, CachedRegion, ContentHash, Coordinates, GeofenceDetails,
    GeofenceRecord, Snapshot,
};
use std::sync::Arc;

pub fn record(host: &str, employer: &str) -> BlocklistRecord {
    BlocklistRecord::new(
        Arc::from(host),
        Arc::from(format!("emp-{}", employer.to_lowercase()).as_str()),
        Arc::from(employer),
        ActionType::Strike,
        Arc::from("act-1"),
    )
}

pub fn geofence(id: &str, lat: f64, lng: f64, radius: u32) -> GeofenceRecord {
    GeofenceRecord::new(
        Arc::from(id),
        Arc::from("act-1"),
        Arc::from("emp-exco"),
        Arc::from("ExCo"),
        ActionType::Picket,
        Coordinates { lat, lng },
        radius,
        0,
    )
    .with_details(GeofenceDetails {
        location: Some(Arc::from("Main St warehouse")),
        ..Default::default()
    })
}

/// Snapshot centered on (0, 0) with an 80 km refresh threshold.
pub fn snapshot(hash: &str) -> Snapshot {
    snapshot_with(hash, vec![record("example.com", "ExCo")], vec![])
}

pub fn snapshot_with(
    hash: &str,
    blocklist: Vec<BlocklistRecord>,
    geofences: Vec<GeofenceRecord>,
) -> Snapshot {
    Snapshot::new(
        "1.0",
        CachedRegion {
            center: Coordinates { lat: 0.0, lng: 0.0 },
            radius_meters: 160_934,
            refresh_threshold_meters: 80_000,
        },
        3_600_000,
        blocklist,
        geofences,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ContentHash::new(hash),
    )
}

pub fn origin() -> Coordinates {
    Coordinates { lat: 0.0, lng: 0.0 }
}

/// ~111 km north of the origin, outside the default refresh threshold.
pub fn far_away() -> Coordinates {
    Coordinates { lat: 1.0, lng: 0.0 }
}
