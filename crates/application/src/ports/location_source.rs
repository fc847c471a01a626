use picketline_domain::{LocationAuthorization, LocationSample};
use tokio::sync::watch;

pub trait LocationSourcePort: Send + Sync {
    fn authorization(&self) -> LocationAuthorization;

    /// Most recent fix, if any has arrived.
    fn latest(&self) -> Option<LocationSample>;

    fn subscribe(&self) -> watch::Receiver<Option<LocationSample>>;
}
