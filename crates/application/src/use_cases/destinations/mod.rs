mod check_destination;
mod guard_destination;

pub use check_destination::CheckDestinationUseCase;
pub use guard_destination::{DestinationVerdict, GuardDestinationUseCase};
