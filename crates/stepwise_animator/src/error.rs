// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised while loading or saving step sequence definitions.

/// Error reading, parsing or writing a step sequence definition
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("Step sequence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Definition is not valid RON for the value type
    #[error("Invalid step sequence: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Definition could not be serialized
    #[error("Failed to serialize step sequence: {0}")]
    Serialize(#[from] ron::Error),
}
