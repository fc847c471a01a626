//! Adapters for the application ports: provider HTTP client, SQLite
//! storage, credential stores, notification sink and location source.
pub mod credentials;
pub mod database;
pub mod http;
pub mod location;
pub mod notifications;
pub mod storage;
