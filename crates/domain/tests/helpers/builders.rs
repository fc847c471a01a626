#![allow(dead_code)]
use chrono::{TimeZone, Utc};
use picketline_domain::{
    ActionType, BlocklistRecord, CachedRegion, ContentHash, Coordinates, GeofenceRecord, Snapshot,
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

pub struct GeofenceBuilder {
    id: Arc<str>,
    employer_name: Arc<str>,
    action_type: ActionType,
    coordinates: Coordinates,
    radius: u32,
}

impl GeofenceBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: Arc::from(id),
            employer_name: Arc::from("ExCo"),
            action_type: ActionType::Picket,
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            radius: 500,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Coordinates { lat, lng };
        self
    }

    pub fn radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn employer(mut self, name: &str) -> Self {
        self.employer_name = Arc::from(name);
        self
    }

    pub fn build(self) -> GeofenceRecord {
        GeofenceRecord::new(
            self.id.clone(),
            Arc::from("act-1"),
            Arc::from("emp-1"),
            self.employer_name,
            self.action_type,
            self.coordinates,
            self.radius,
            0,
        )
    }
}

pub struct SnapshotBuilder {
    center: Coordinates,
    radius: u32,
    threshold: u32,
    blocklist: Vec<BlocklistRecord>,
    geofences: Vec<GeofenceRecord>,
    hash: &'static str,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            center: Coordinates { lat: 0.0, lng: 0.0 },
            radius: 160_934,
            threshold: 80_000,
            blocklist: Vec::new(),
            geofences: Vec::new(),
            hash: "hash-1",
        }
    }

    pub fn center(mut self, lat: f64, lng: f64) -> Self {
        self.center = Coordinates { lat, lng };
        self
    }

    pub fn threshold(mut self, meters: u32) -> Self {
        self.threshold = meters;
        self
    }

    pub fn record(mut self, host: &str, employer: &str) -> Self {
        self.blocklist.push(record(host, employer));
        self
    }

    pub fn geofence(mut self, geofence: GeofenceRecord) -> Self {
        self.geofences.push(geofence);
        self
    }

    pub fn hash(mut self, hash: &'static str) -> Self {
        self.hash = hash;
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(
            "1.0",
            CachedRegion {
                center: self.center,
                radius_meters: self.radius,
                refresh_threshold_meters: self.threshold,
            },
            3_600_000,
            self.blocklist,
            self.geofences,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ContentHash::new(self.hash),
        )
    }
}
