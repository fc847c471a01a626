#![allow(dead_code)]
mod builders;
mod mock_ports;

pub use builders::*;
pub use mock_ports::*;
