//! Pipeline entry points for the watcher.
//!
//! - `run_watch`: Build the monitor from configuration and poll until cancelled
//! - `Monitor`: The poll–detect–notify loop itself

pub mod monitor;
pub mod watch;

pub use monitor::{Collaborators, CycleOutcome, Monitor, MonitorState};
pub use watch::{build_monitor, run_watch};
