/// Errors from the provider client boundary.
use thiserror::Error;

/// Maximum number of stderr bytes kept in a `NonZeroExit` error.
const STDERR_EXCERPT_LEN: usize = 512;

/// Typed failures of one provider client invocation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The client executable could not be started (not installed, not on `PATH`).
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Executable name or path.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The client ran but exited unsuccessfully.
    #[error("'{command}' exited with {status}: {stderr}")]
    NonZeroExit {
        /// Human-readable command line.
        command: String,
        /// Exit status description (`exit status: 255`, `signal: 9`, ...).
        status: String,
        /// Trimmed excerpt of the client's stderr.
        stderr: String,
    },

    /// Stdout was not valid UTF-8.
    #[error("'{command}' produced non UTF-8 output")]
    InvalidUtf8 {
        /// Human-readable command line.
        command: String,
    },

    /// Stdout could not be parsed as the expected JSON document.
    #[error("Failed to parse output of '{command}': {source}")]
    MalformedOutput {
        /// Human-readable command line.
        command: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// Build a `NonZeroExit` error, truncating stderr to a readable excerpt.
    #[must_use]
    pub fn non_zero_exit(command: &str, status: &std::process::ExitStatus, stderr: &[u8]) -> Self {
        let text = String::from_utf8_lossy(stderr);
        let trimmed = text.trim();
        let stderr = match trimmed.char_indices().nth(STDERR_EXCERPT_LEN) {
            Some((cut, _)) => format!("{}…", &trimmed[..cut]),
            None => trimmed.to_owned(),
        };
        Self::NonZeroExit {
            command: command.to_owned(),
            status: status.to_string(),
            stderr,
        }
    }
}
