use async_trait::async_trait;
use picketline_application::ports::{
    DataProviderPort, FetchRequest, FetchResult, KeyValueStorePort, LocationSourcePort,
    Notification, NotificationSinkPort,
};
use picketline_domain::{
    ActiveAction, DomainError, FieldReport, LocationAuthorization, LocationSample, ReportReceipt,
    Snapshot,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Hands out queued snapshots, then answers `NotModified`.
#[derive(Clone)]
pub struct MockDataProvider {
    queue: Arc<RwLock<VecDeque<Snapshot>>>,
    fetch_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(RwLock::new(VecDeque::new())),
            fetch_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn push_snapshot(&self, snapshot: Snapshot) {
        self.queue.write().await.push_back(snapshot);
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProviderPort for MockDataProvider {
    async fn fetch_snapshot(&self, _request: &FetchRequest) -> Result<FetchResult, DomainError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(DomainError::TransportError("offline".to_string()));
        }
        match self.queue.write().await.pop_front() {
            Some(snapshot) => Ok(FetchResult::Modified(snapshot)),
            None => Ok(FetchResult::NotModified),
        }
    }

    async fn submit_report(&self, _report: &FieldReport) -> Result<ReportReceipt, DomainError> {
        Err(DomainError::ServerError("not scripted".to_string()))
    }

    async fn list_active_actions(&self) -> Result<Vec<ActiveAction>, DomainError> {
        Ok(vec![])
    }
}

#[derive(Clone, Default)]
pub struct MockKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorePort for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockNotificationSink {
    delivered: Arc<RwLock<Vec<Notification>>>,
    post_count: Arc<AtomicU64>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_count(&self) -> u64 {
        self.post_count.load(Ordering::SeqCst)
    }

    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.read().await.clone()
    }
}

#[async_trait]
impl NotificationSinkPort for MockNotificationSink {
    async fn post(&self, notification: Notification) -> Result<bool, DomainError> {
        self.post_count.fetch_add(1, Ordering::SeqCst);
        self.delivered.write().await.push(notification);
        Ok(true)
    }

    async fn withdraw(&self, _dedupe_key: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct MockLocationSource {
    samples: watch::Sender<Option<LocationSample>>,
}

impl MockLocationSource {
    pub fn new() -> Self {
        let (samples, _) = watch::channel(None);
        Self { samples }
    }

    pub fn push(&self, sample: LocationSample) {
        self.samples.send_replace(Some(sample));
    }
}

impl LocationSourcePort for MockLocationSource {
    fn authorization(&self) -> LocationAuthorization {
        LocationAuthorization::Authorized
    }

    fn latest(&self) -> Option<LocationSample> {
        *self.samples.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<LocationSample>> {
        self.samples.subscribe()
    }
}
