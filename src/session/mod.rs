pub mod controller;
pub mod state;

pub use controller::{SessionController, SourceFactory};
pub use state::{SessionState, SessionStatus};
