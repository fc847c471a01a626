use crate::blocklist::{BlocklistIndex, BlocklistRecord};
use crate::geo::{distance_meters, Coordinates};
use crate::geofence::GeofenceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0";

/// Opaque fingerprint of a snapshot payload, echoed back to the provider so
/// it can answer "not modified".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(Arc<str>);

impl ContentHash {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The area a snapshot was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedRegion {
    pub center: Coordinates,
    pub radius_meters: u32,
    pub refresh_threshold_meters: u32,
}

impl CachedRegion {
    /// True once `location` has moved strictly farther than the refresh
    /// threshold from the region center.
    pub fn is_outside_threshold(&self, location: Coordinates) -> bool {
        distance_meters(location, self.center) > f64::from(self.refresh_threshold_meters)
    }
}

/// One immutable, internally consistent bundle of blocklist, geofence and
/// region data. The blocklist index is compiled at construction, so records
/// and index can never be observed out of step.
pub struct Snapshot {
    schema_version: Arc<str>,
    region: CachedRegion,
    suggested_refresh_interval_ms: u64,
    index: BlocklistIndex,
    geofences: Vec<GeofenceRecord>,
    generated_at: DateTime<Utc>,
    content_hash: ContentHash,
}

impl Snapshot {
    pub fn new(
        schema_version: impl Into<Arc<str>>,
        region: CachedRegion,
        suggested_refresh_interval_ms: u64,
        blocklist: Vec<BlocklistRecord>,
        geofences: Vec<GeofenceRecord>,
        generated_at: DateTime<Utc>,
        content_hash: ContentHash,
    ) -> Self {
        Self {
            schema_version: schema_version.into(),
            region,
            suggested_refresh_interval_ms,
            index: BlocklistIndex::new(blocklist),
            geofences,
            generated_at,
            content_hash,
        }
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn region(&self) -> &CachedRegion {
        &self.region
    }

    pub fn suggested_refresh_interval_ms(&self) -> u64 {
        self.suggested_refresh_interval_ms
    }

    pub fn blocklist(&self) -> &[BlocklistRecord] {
        self.index.records()
    }

    pub fn index(&self) -> &BlocklistIndex {
        &self.index
    }

    pub fn geofences(&self) -> &[GeofenceRecord] {
        &self.geofences
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn find_match(&self, raw_host_or_url: &str) -> Option<&BlocklistRecord> {
        self.index.find_match(raw_host_or_url)
    }

    pub fn is_blocked(&self, raw_host_or_url: &str) -> bool {
        self.index.is_blocked(raw_host_or_url)
    }

    pub fn needs_refresh_at(&self, location: Coordinates) -> bool {
        self.region.is_outside_threshold(location)
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("schema_version", &self.schema_version)
            .field("region", &self.region)
            .field("blocklist", &self.index)
            .field("geofences", &self.geofences.len())
            .field("generated_at", &self.generated_at)
            .field("content_hash", &self.content_hash)
            .finish()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.schema_version == other.schema_version
            && self.region == other.region
            && self.suggested_refresh_interval_ms == other.suggested_refresh_interval_ms
            && self.index.records() == other.index.records()
            && self.geofences == other.geofences
            && self.generated_at == other.generated_at
            && self.content_hash == other.content_hash
    }
}

// ── Persistence form ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SnapshotRef<'a> {
    schema_version: &'a str,
    region: &'a CachedRegion,
    suggested_refresh_interval_ms: u64,
    blocklist: &'a [BlocklistRecord],
    geofences: &'a [GeofenceRecord],
    generated_at: DateTime<Utc>,
    content_hash: &'a ContentHash,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    schema_version: Arc<str>,
    region: CachedRegion,
    suggested_refresh_interval_ms: u64,
    blocklist: Vec<BlocklistRecord>,
    geofences: Vec<GeofenceRecord>,
    generated_at: DateTime<Utc>,
    content_hash: ContentHash,
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SnapshotRef {
            schema_version: &self.schema_version,
            region: &self.region,
            suggested_refresh_interval_ms: self.suggested_refresh_interval_ms,
            blocklist: self.index.records(),
            geofences: &self.geofences,
            generated_at: self.generated_at,
            content_hash: &self.content_hash,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let owned = SnapshotOwned::deserialize(deserializer)?;
        Ok(Snapshot::new(
            owned.schema_version,
            owned.region,
            owned.suggested_refresh_interval_ms,
            owned.blocklist,
            owned.geofences,
            owned.generated_at,
            owned.content_hash,
        ))
    }
}
