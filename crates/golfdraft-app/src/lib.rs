// App orchestrator: owns the draft and serializes commands from the UI.

pub mod app;

pub use app::{run, AppState, MIN_TEAMS};
