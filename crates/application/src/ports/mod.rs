mod credential_store;
mod data_provider;
mod key_value_store;
mod location_source;
mod notification_sink;

pub use credential_store::CredentialStorePort;
pub use data_provider::{DataProviderPort, FetchRequest, FetchResult};
pub use key_value_store::KeyValueStorePort;
pub use location_source::LocationSourcePort;
pub use notification_sink::{Notification, NotificationSinkPort};
