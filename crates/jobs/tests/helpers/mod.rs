#![allow(dead_code)]
mod mock_ports;

pub use mock_ports::*;

use chrono::{TimeZone, Utc};
use picketline_application::services::SnapshotCache;
use picketline_application::use_cases::{
    HandleLocationUpdateUseCase, RefreshSnapshotUseCase, TrackProximityUseCase,
};
use picketline_domain::{
    ActionType, CachedRegion, ContentHash, Coordinates, GeofenceRecord, LocationSample, Snapshot,
};
use std::sync::Arc;
use std::time::Duration;

pub fn sample(lat: f64, lng: f64) -> LocationSample {
    LocationSample::new(Coordinates { lat, lng })
}

pub fn geofence(id: &str, lat: f64, lng: f64, radius: u32) -> GeofenceRecord {
    GeofenceRecord::new(
        Arc::from(id),
        Arc::from("act-1"),
        Arc::from("emp-exco"),
        Arc::from("ExCo"),
        ActionType::Strike,
        Coordinates { lat, lng },
        radius,
        0,
    )
}

/// Snapshot centered on (0, 0) with a 50 km refresh threshold.
pub fn snapshot(hash: &str, suggested_ms: u64, geofences: Vec<GeofenceRecord>) -> Snapshot {
    Snapshot::new(
        "1.0",
        CachedRegion {
            center: Coordinates { lat: 0.0, lng: 0.0 },
            radius_meters: 100_000,
            refresh_threshold_meters: 50_000,
        },
        suggested_ms,
        vec![],
        geofences,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ContentHash::new(hash),
    )
}

pub struct Harness {
    pub provider: MockDataProvider,
    pub sink: MockNotificationSink,
    pub location: Arc<MockLocationSource>,
    pub cache: Arc<SnapshotCache>,
    pub refresh: Arc<RefreshSnapshotUseCase>,
    pub handler: Arc<HandleLocationUpdateUseCase>,
}

pub fn harness() -> Harness {
    let provider = MockDataProvider::new();
    let sink = MockNotificationSink::new();
    let location = Arc::new(MockLocationSource::new());
    let cache = Arc::new(SnapshotCache::new(Arc::new(MockKeyValueStore::new())));
    let refresh = Arc::new(RefreshSnapshotUseCase::new(
        Arc::new(provider.clone()),
        cache.clone(),
        Duration::from_secs(5),
    ));
    let tracker = Arc::new(TrackProximityUseCase::new(cache.clone(), Arc::new(sink.clone())));
    let handler = Arc::new(HandleLocationUpdateUseCase::new(refresh.clone(), tracker));

    Harness {
        provider,
        sink,
        location,
        cache,
        refresh,
        handler,
    }
}
