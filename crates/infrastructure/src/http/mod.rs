pub mod data_provider;
pub mod status;
pub mod wire;

pub use data_provider::HttpDataProvider;
pub use status::map_error_status;
