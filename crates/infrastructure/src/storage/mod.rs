pub mod sqlite_kv_store;

pub use sqlite_kv_store::SqliteKeyValueStore;
