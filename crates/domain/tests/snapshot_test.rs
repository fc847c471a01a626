use picketline_domain::{Coordinates, Snapshot};

mod helpers;
use helpers::{GeofenceBuilder, SnapshotBuilder};

#[test]
fn test_snapshot_matches_through_compiled_index() {
    let snapshot = SnapshotBuilder::new().record("example.com", "ExCo").build();

    assert!(snapshot.is_blocked("sub.example.com"));
    assert!(!snapshot.is_blocked("otherexample.com"));
    assert_eq!(snapshot.blocklist().len(), 1);
}

#[test]
fn test_needs_refresh_only_beyond_threshold() {
    let snapshot = SnapshotBuilder::new().center(0.0, 0.0).threshold(80_000).build();

    // ~55 km
    assert!(!snapshot.needs_refresh_at(Coordinates { lat: 0.5, lng: 0.0 }));
    // ~89 km
    assert!(snapshot.needs_refresh_at(Coordinates { lat: 0.8, lng: 0.0 }));
    assert!(!snapshot.needs_refresh_at(Coordinates { lat: 0.0, lng: 0.0 }));
}

#[test]
fn test_json_round_trip_preserves_contents() {
    let original = SnapshotBuilder::new()
        .record("example.com", "ExCo")
        .record("acme.org", "Acme")
        .geofence(GeofenceBuilder::new("g1").at(1.0, 2.0).radius(250).build())
        .hash("abc123")
        .build();

    let json = serde_json::to_string(&original).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, original);
    assert_eq!(restored.content_hash().as_str(), "abc123");
    assert!(restored.is_blocked("www.acme.org"));
    assert_eq!(restored.geofences()[0].notification_radius_meters, 250);
}

#[test]
fn test_restore_rejects_truncated_payload() {
    let json = serde_json::to_string(&SnapshotBuilder::new().build()).unwrap();
    let truncated = &json[..json.len() / 2];

    assert!(serde_json::from_str::<Snapshot>(truncated).is_err());
}
