/// Errors from the inventory domain layer.
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::provider::ProviderError;

/// Errors that abort an inventory run.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A provider call needed by the whole run failed.
    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),

    /// Every queried region failed; writing an empty inventory would hide the outage.
    #[error("All {count} region(s) failed to collect")]
    AllRegionsFailed {
        /// Number of regions attempted.
        count: usize,
    },

    /// The inventory file could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Exit code mapping for `InventoryError` variants.
impl InventoryError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Provider(_) | Self::AllRegionsFailed { .. } => 4,
            Self::Write { .. } => 5,
        }
    }

    /// Machine-readable snake_case code for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Provider(_) => "provider_error",
            Self::AllRegionsFailed { .. } => "all_regions_failed",
            Self::Write { .. } => "write_failed",
        }
    }
}
