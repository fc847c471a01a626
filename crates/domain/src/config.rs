pub mod api;
pub mod cache;
pub mod credentials;
pub mod errors;
pub mod logging;
pub mod refresh;
pub mod root;

pub use api::ApiConfig;
pub use cache::CacheConfig;
pub use credentials::CredentialsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use refresh::RefreshConfig;
pub use root::{CliOverrides, Config};
