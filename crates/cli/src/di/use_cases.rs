use super::Adapters;
use picketline_application::services::{BlockedAttemptLog, SnapshotCache};
use picketline_application::use_cases::{
    CheckDestinationUseCase, ClearAccessTokenUseCase, ClearCacheUseCase, GetStatusUseCase,
    GuardDestinationUseCase, HandleLocationUpdateUseCase, ListActiveActionsUseCase, RefreshSnapshotUseCase,
    SetAccessTokenUseCase, SubmitFieldReportUseCase, TrackProximityUseCase,
};
use picketline_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub cache: Arc<SnapshotCache>,
    pub refresh: Arc<RefreshSnapshotUseCase>,
    pub blocked_attempts: Arc<BlockedAttemptLog>,
    pub guard_destination: Arc<GuardDestinationUseCase>,
    pub handle_location_update: Arc<HandleLocationUpdateUseCase>,
    pub submit_report: Arc<SubmitFieldReportUseCase>,
    pub list_actions: Arc<ListActiveActionsUseCase>,
    pub set_token: Arc<SetAccessTokenUseCase>,
    pub clear_token: Arc<ClearAccessTokenUseCase>,
    pub clear_cache: Arc<ClearCacheUseCase>,
    pub get_status: Arc<GetStatusUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let cache = Arc::new(SnapshotCache::new(adapters.key_value.clone()));
        let refresh = Arc::new(
            RefreshSnapshotUseCase::new(
                adapters.provider.clone(),
                cache.clone(),
                Duration::from_secs(config.api.timeout_secs),
            )
            .with_radius_override(config.api.radius_meters),
        );
        let blocked_attempts = Arc::new(BlockedAttemptLog::new(adapters.key_value.clone()));
        let track_proximity = Arc::new(TrackProximityUseCase::new(
            cache.clone(),
            adapters.notifications.clone(),
        ));

        Self {
            guard_destination: Arc::new(GuardDestinationUseCase::new(
                Arc::new(CheckDestinationUseCase::new(cache.clone())),
                blocked_attempts.clone(),
            )),
            handle_location_update: Arc::new(HandleLocationUpdateUseCase::new(
                refresh.clone(),
                track_proximity,
            )),
            submit_report: Arc::new(SubmitFieldReportUseCase::new(adapters.provider.clone())),
            list_actions: Arc::new(ListActiveActionsUseCase::new(adapters.provider.clone())),
            set_token: Arc::new(SetAccessTokenUseCase::new(adapters.credentials.clone())),
            clear_token: Arc::new(ClearAccessTokenUseCase::new(
                adapters.credentials.clone(),
                cache.clone(),
            )),
            clear_cache: Arc::new(ClearCacheUseCase::new(cache.clone())),
            get_status: Arc::new(GetStatusUseCase::new(
                cache.clone(),
                adapters.credentials.clone(),
                blocked_attempts.clone(),
            )),
            blocked_attempts,
            refresh,
            cache,
        }
    }
}
