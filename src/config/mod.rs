// Configuration module entry point
// Loads layered configuration and resolves the served root directory

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" in the working directory,
    /// `PREVIEW`-prefixed environment variables, and built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PREVIEW"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", "")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the root directory served to the browser.
    ///
    /// An explicitly configured root is used as given; otherwise the
    /// server serves the directory containing its own executable, which
    /// is where the add-in assets sit during development. The result is
    /// canonicalized so the traversal guard can compare prefixes.
    pub fn resolve_root(&self) -> std::io::Result<PathBuf> {
        let raw = if self.server.root.is_empty() {
            let exe = std::env::current_exe()?;
            exe.parent().map(PathBuf::from).ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "executable has no parent directory",
                )
            })?
        } else {
            PathBuf::from(&self.server.root)
        };
        raw.canonicalize()
    }
}
