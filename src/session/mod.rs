mod controller;
mod state;

pub use controller::{GenerateOutcome, LifecycleController};
pub use state::SessionState;
