use crate::ports::KeyValueStorePort;
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use picketline_domain::{ContentHash, Coordinates, DomainError, Snapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub const PAYLOAD_KEY: &str = "snapshot.payload";
pub const CONTENT_HASH_KEY: &str = "snapshot.content_hash";

/// Sole owner of the current [`Snapshot`].
///
/// Readers take an `Arc` handle via [`SnapshotCache::current`] and keep a
/// consistent view for as long as they hold it; [`SnapshotCache::replace`]
/// swaps the pointer without waiting for them.
///
/// Every [`SnapshotCache::clear`] bumps a generation counter. Writers that
/// captured an older generation are refused, so a fetch started before a
/// clear cannot bring the snapshot back.
pub struct SnapshotCache {
    current: ArcSwapOption<Snapshot>,
    last_checked: ArcSwapOption<DateTime<Utc>>,
    store: Arc<dyn KeyValueStorePort>,
    generation: AtomicU64,
    // Serializes generation checks against in-memory writes.
    write_lock: Mutex<()>,
    // Serializes durable writes against the durable half of clear.
    durable_lock: tokio::sync::Mutex<()>,
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            last_checked: ArcSwapOption::empty(),
            store,
            generation: AtomicU64::new(0),
            write_lock: Mutex::new(()),
            durable_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    pub fn content_hash(&self) -> Option<ContentHash> {
        let guard = self.current.load();
        (*guard)
            .as_ref()
            .map(|snapshot| snapshot.content_hash().clone())
    }

    /// True when nothing is cached or `location` has left the region by more
    /// than its refresh threshold.
    pub fn should_refresh(&self, location: Coordinates) -> bool {
        match &*self.current.load() {
            None => true,
            Some(snapshot) => snapshot.needs_refresh_at(location),
        }
    }

    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let _writes = self.lock_writes();
        self.store_snapshot(snapshot)
    }

    /// Installs `snapshot` only if no clear happened since `generation` was
    /// read. Returns `None` when the snapshot was discarded.
    pub fn replace_if_generation(
        &self,
        generation: u64,
        snapshot: Snapshot,
    ) -> Option<Arc<Snapshot>> {
        let _writes = self.lock_writes();
        if self.generation() != generation {
            debug!(
                content_hash = %snapshot.content_hash(),
                "Cache cleared since fetch started, snapshot discarded"
            );
            return None;
        }
        Some(self.store_snapshot(snapshot))
    }

    fn store_snapshot(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.current.store(Some(Arc::clone(&snapshot)));
        info!(
            content_hash = %snapshot.content_hash(),
            blocklist_records = snapshot.blocklist().len(),
            geofences = snapshot.geofences().len(),
            "Snapshot replaced"
        );
        snapshot
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked.load_full().map(|at| *at)
    }

    pub fn mark_checked(&self) {
        self.last_checked.store(Some(Arc::new(Utc::now())));
    }

    pub fn mark_checked_if_generation(&self, generation: u64) -> bool {
        let _writes = self.lock_writes();
        if self.generation() != generation {
            return false;
        }
        self.mark_checked();
        true
    }

    /// Writes the current snapshot to durable storage. The payload goes first
    /// so an interrupted write leaves the two keys disagreeing, which
    /// [`SnapshotCache::restore`] rejects.
    pub async fn persist(&self) -> Result<(), DomainError> {
        self.persist_if_generation(self.generation()).await.map(|_| ())
    }

    /// Like [`SnapshotCache::persist`], but writes nothing when a clear
    /// happened since `generation` was read. `Ok(false)` means skipped.
    pub async fn persist_if_generation(&self, generation: u64) -> Result<bool, DomainError> {
        let _durable = self.durable_lock.lock().await;
        if self.generation() != generation {
            debug!("Cache cleared since snapshot was installed, persist skipped");
            return Ok(false);
        }
        let Some(snapshot) = self.current() else {
            debug!("Nothing to persist");
            return Ok(false);
        };

        let payload = serde_json::to_vec(snapshot.as_ref())
            .map_err(|e| DomainError::StorageError(format!("encode snapshot: {}", e)))?;

        self.store.put(PAYLOAD_KEY, &payload).await?;
        self.store
            .put(CONTENT_HASH_KEY, snapshot.content_hash().as_str().as_bytes())
            .await?;

        debug!(
            content_hash = %snapshot.content_hash(),
            bytes = payload.len(),
            "Snapshot persisted"
        );
        Ok(true)
    }

    /// Loads the persisted snapshot into memory. Any failure leaves the cache
    /// empty; the return value says whether a snapshot was restored.
    pub async fn restore(&self) -> bool {
        match self.load_persisted().await {
            Ok(Some(snapshot)) => {
                info!(
                    content_hash = %snapshot.content_hash(),
                    generated_at = %snapshot.generated_at(),
                    "Snapshot restored from storage"
                );
                let _writes = self.lock_writes();
                self.current.store(Some(Arc::new(snapshot)));
                true
            }
            Ok(None) => {
                debug!("No persisted snapshot");
                false
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted snapshot");
                false
            }
        }
    }

    async fn load_persisted(&self) -> Result<Option<Snapshot>, DomainError> {
        let Some(payload) = self.store.get(PAYLOAD_KEY).await? else {
            return Ok(None);
        };

        let snapshot: Snapshot = serde_json::from_slice(&payload)
            .map_err(|e| DomainError::StorageError(format!("decode snapshot: {}", e)))?;

        let stored_hash = self
            .store
            .get(CONTENT_HASH_KEY)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        match stored_hash {
            Some(hash) if hash == snapshot.content_hash().as_str() => Ok(Some(snapshot)),
            Some(hash) => Err(DomainError::StorageError(format!(
                "content hash mismatch: stored '{}', payload '{}'",
                hash,
                snapshot.content_hash()
            ))),
            None => Err(DomainError::StorageError(
                "content hash key missing".to_string(),
            )),
        }
    }

    /// Drops the in-memory and durable copies. Storage errors are logged.
    pub async fn clear(&self) {
        {
            let _writes = self.lock_writes();
            self.generation.fetch_add(1, Ordering::AcqRel);
            self.current.store(None);
            self.last_checked.store(None);
        }

        let _durable = self.durable_lock.lock().await;
        for key in [PAYLOAD_KEY, CONTENT_HASH_KEY] {
            if let Err(e) = self.store.delete(key).await {
                warn!(key = key, error = %e, "Failed to delete persisted snapshot key");
            }
        }
        info!("Snapshot cache cleared");
    }
}
