use picketline_application::ports::LocationSourcePort;
use picketline_domain::{Coordinates, DomainError, LocationAuthorization, LocationSample};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Location source fed by whoever owns the device fix: a platform bridge,
/// a test, or a line-oriented stream of `lat,lng` pairs.
pub struct ChannelLocationSource {
    authorization: watch::Sender<LocationAuthorization>,
    samples: watch::Sender<Option<LocationSample>>,
}

impl ChannelLocationSource {
    pub fn new(authorization: LocationAuthorization) -> Self {
        let (authorization, _) = watch::channel(authorization);
        let (samples, _) = watch::channel(None);
        Self {
            authorization,
            samples,
        }
    }

    pub fn set_authorization(&self, authorization: LocationAuthorization) {
        self.authorization.send_replace(authorization);
    }

    /// Publishes a fix to subscribers. Returns false, and drops the fix, when
    /// location access is not authorized.
    pub fn publish(&self, sample: LocationSample) -> bool {
        if !self.authorization.borrow().is_authorized() {
            debug!("Location not authorized, sample dropped");
            return false;
        }
        self.samples.send_replace(Some(sample));
        true
    }

    /// Reads `lat,lng` lines until end of input and publishes each valid one.
    /// Blank lines and `#` comments are skipped; malformed lines are logged.
    pub async fn feed_lines<R>(&self, reader: R) -> Result<usize, DomainError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        let mut published = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| DomainError::StorageError(format!("read location input: {}", e)))?
        {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.parse::<Coordinates>() {
                Ok(coordinates) => {
                    if self.publish(LocationSample::new(coordinates)) {
                        published += 1;
                        // let subscribers observe this fix before the next one replaces it
                        tokio::task::yield_now().await;
                    }
                }
                Err(e) => warn!(input = %line, error = %e, "Skipping malformed location line"),
            }
        }

        Ok(published)
    }
}

impl Default for ChannelLocationSource {
    fn default() -> Self {
        Self::new(LocationAuthorization::Authorized)
    }
}

impl LocationSourcePort for ChannelLocationSource {
    fn authorization(&self) -> LocationAuthorization {
        *self.authorization.borrow()
    }

    fn latest(&self) -> Option<LocationSample> {
        *self.samples.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<LocationSample>> {
        self.samples.subscribe()
    }
}
