use crate::{LocationWatchJob, SnapshotRefreshJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(SnapshotRefreshJob);
impl_spawnable_job!(LocationWatchJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
    handles: &mut Vec<JoinHandle<()>>,
) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        handles.push(Arc::new(job).start_job());
    }
}

pub struct JobRunner {
    snapshot_refresh: Option<SnapshotRefreshJob>,
    location_watch: Option<LocationWatchJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            snapshot_refresh: None,
            location_watch: None,
            shutdown: None,
        }
    }

    pub fn with_snapshot_refresh(mut self, job: SnapshotRefreshJob) -> Self {
        self.snapshot_refresh = Some(job);
        self
    }

    pub fn with_location_watch(mut self, job: LocationWatchJob) -> Self {
        self.location_watch = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns the configured jobs. The handles complete once the shutdown
    /// token is cancelled.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::with_capacity(2);
        spawn_job(self.snapshot_refresh, &self.shutdown, &mut handles);
        spawn_job(self.location_watch, &self.shutdown, &mut handles);

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
