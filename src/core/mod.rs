// Core types
pub mod types;
pub use types::*;

// Logging functionality
pub mod logger;
pub use logger::init_logger;

// Graph model and persistence
pub mod model;

// Wait-for graph implementation
pub mod graph;

// Analysis passes
pub mod detector;
pub mod prevention;
pub mod safety;

use anyhow::{Context, Result};

/// Resolock configuration struct
pub struct Resolock {
    log_path: Option<String>,
}

impl Default for Resolock {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolock {
    /// Create a new Resolock with default settings
    ///
    /// By default, logging is disabled.
    pub fn new() -> Self {
        Resolock { log_path: None }
    }

    /// Activate the analysis logger and set the path for the log file
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If the path contains "{timestamp}",
    ///   it will be replaced with the current timestamp.
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn with_log<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.log_path = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Initialize resolock with the configured settings
    ///
    /// # Errors
    /// Returns an error if logger initialization fails
    pub fn start(self) -> Result<()> {
        match self.log_path {
            Some(log_path) => {
                let log_path = log_path.replace(
                    "{timestamp}",
                    &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
                );
                init_logger(Some(log_path)).context("Failed to initialize logger")?;
            }
            None => init_logger(None::<&str>)?,
        }
        Ok(())
    }
}
