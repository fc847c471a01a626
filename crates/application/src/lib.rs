//! Application layer: ports for the outside world, the snapshot cache and
//! the use cases that drive refresh, matching and proximity alerts.
pub mod ports;
pub mod services;
pub mod use_cases;
