#![allow(dead_code)]

pub mod canned_http;
pub mod fixtures;

use picketline_infrastructure::database::create_pool;
use sqlx::SqlitePool;

/// In-memory databases live per connection, so the pool is pinned to one.
pub async fn memory_pool() -> SqlitePool {
    create_pool("sqlite::memory:", 1).await.unwrap()
}
