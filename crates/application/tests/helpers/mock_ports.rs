use async_trait::async_trait;
use picketline_application::ports::{
    CredentialStorePort, DataProviderPort, FetchRequest, FetchResult, KeyValueStorePort,
    Notification, NotificationSinkPort,
};
use picketline_domain::{
    AccessToken, ActionType, ActiveAction, DomainError, FieldReport, ReportReceipt, Snapshot,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub enum ScriptedFetch {
    Modified(Snapshot),
    NotModified,
    Fail(DomainError),
}

/// Provider that replays scripted fetch results in order and answers
/// `NotModified` once the script runs out.
#[derive(Clone)]
pub struct MockDataProvider {
    script: Arc<RwLock<VecDeque<ScriptedFetch>>>,
    requests: Arc<RwLock<Vec<FetchRequest>>>,
    submitted: Arc<RwLock<Vec<FieldReport>>>,
    fetch_count: Arc<AtomicUsize>,
    delay: Arc<RwLock<Option<Duration>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(VecDeque::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            submitted: Arc::new(RwLock::new(Vec::new())),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            delay: Arc::new(RwLock::new(None)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn push(&self, fetch: ScriptedFetch) {
        self.script.write().await.push_back(fetch);
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<FetchRequest> {
        self.requests.read().await.clone()
    }

    pub async fn submitted(&self) -> Vec<FieldReport> {
        self.submitted.read().await.clone()
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataProviderPort for MockDataProvider {
    async fn fetch_snapshot(&self, request: &FetchRequest) -> Result<FetchResult, DomainError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(request.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.script.write().await.pop_front() {
            Some(ScriptedFetch::Modified(snapshot)) => Ok(FetchResult::Modified(snapshot)),
            Some(ScriptedFetch::NotModified) | None => Ok(FetchResult::NotModified),
            Some(ScriptedFetch::Fail(e)) => Err(e),
        }
    }

    async fn submit_report(&self, report: &FieldReport) -> Result<ReportReceipt, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::ServerError("mock submit failure".to_string()));
        }
        let mut submitted = self.submitted.write().await;
        submitted.push(report.clone());
        Ok(ReportReceipt {
            id: format!("report-{}", submitted.len()),
            message: "Thank you".to_string(),
        })
    }

    async fn list_active_actions(&self) -> Result<Vec<ActiveAction>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Unauthorized("mock".to_string()));
        }
        Ok(vec![ActiveAction {
            id: Arc::from("act-1"),
            employer_id: Arc::from("emp-exco"),
            employer_name: Arc::from("ExCo"),
            action_type: ActionType::Strike,
            organization: Some(Arc::from("Warehouse Workers United")),
            location: None,
            start_date: None,
            end_date: None,
            description: None,
        }])
    }
}

#[derive(Clone, Default)]
pub struct MockKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<RwLock<bool>>,
    fail_deletes: Arc<RwLock<bool>>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    pub async fn set_fail_deletes(&self, fail: bool) {
        *self.fail_deletes.write().await = fail;
    }

    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert_raw(&self, key: &str, value: &[u8]) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
    }
}

#[async_trait]
impl KeyValueStorePort for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        if *self.fail_writes.read().await {
            return Err(DomainError::StorageError("disk full".to_string()));
        }
        self.insert_raw(key, value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        if *self.fail_deletes.read().await {
            return Err(DomainError::StorageError("read-only".to_string()));
        }
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockCredentialStore {
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStorePort for MockCredentialStore {
    async fn get(&self) -> Result<Option<AccessToken>, DomainError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &AccessToken) -> Result<(), DomainError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Records deliveries and suppresses keys that are still outstanding.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    delivered: Arc<RwLock<Vec<Notification>>>,
    outstanding: Arc<RwLock<HashSet<String>>>,
    withdrawn: Arc<RwLock<Vec<String>>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.read().await.clone()
    }

    pub async fn withdrawn(&self) -> Vec<String> {
        self.withdrawn.read().await.clone()
    }
}

#[async_trait]
impl NotificationSinkPort for MockNotificationSink {
    async fn post(&self, notification: Notification) -> Result<bool, DomainError> {
        if !self
            .outstanding
            .write()
            .await
            .insert(notification.dedupe_key.to_string())
        {
            return Ok(false);
        }
        self.delivered.write().await.push(notification);
        Ok(true)
    }

    async fn withdraw(&self, dedupe_key: &str) -> Result<(), DomainError> {
        self.outstanding.write().await.remove(dedupe_key);
        self.withdrawn.write().await.push(dedupe_key.to_string());
        Ok(())
    }
}
