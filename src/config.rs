//! Configuration for ShelfKV
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{LibraryError, Result};

/// Main configuration for a ShelfKV library instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Waitlist Configuration
    // -------------------------------------------------------------------------
    /// Max pending reservations per book
    pub waitlist_capacity: usize,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Suffix used to derive the report file name from the command file.
    /// `commands.txt` becomes `commands{output_suffix}`.
    pub output_suffix: String,

    /// Abort the session on the first malformed command line instead of
    /// logging and skipping it
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            waitlist_capacity: 20,
            output_suffix: "_output_file.txt".to_string(),
            strict: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.waitlist_capacity == 0 {
            return Err(LibraryError::Config(
                "waitlist_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Report path for a given command file: same directory, file stem
    /// (up to the first '.') followed by `output_suffix`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = name.split('.').next().unwrap_or_default();
        input.with_file_name(format!("{}{}", stem, self.output_suffix))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-book waitlist capacity
    pub fn waitlist_capacity(mut self, capacity: usize) -> Self {
        self.config.waitlist_capacity = capacity;
        self
    }

    /// Set the suffix for derived report file names
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    /// Abort on malformed command lines
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
