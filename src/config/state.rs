// Application state module
// Immutable per-process state shared with every request

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Holds the configuration and the resolved root directory. Both are
/// fixed for the lifetime of the process; request handling only reads
/// them, so no locking is involved.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
