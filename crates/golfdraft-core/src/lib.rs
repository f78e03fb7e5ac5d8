// Library root: the draft engine plus the candidate pool, configuration, and
// message types shared by the app orchestrator and the terminal UI.

pub mod config;
pub mod draft;
pub mod pool;
pub mod protocol;
