//! Request-handling services behind the HTTP routes.

pub mod chaos;
pub mod greeting;
pub mod in_flight;
pub mod pause;
pub mod status;

pub use chaos::ChaosService;
pub use greeting::GreetingService;
pub use pause::{CancellablePause, Pause};
pub use status::StatusService;
