//! Error types for the effect.
//!
//! The frame path never fails: precondition violations there degrade to
//! silent no-ops. Errors only arise from configuration loading, and the
//! effect falls back to defaults when they do.

use thiserror::Error;

/// Errors that can occur while loading the effect configuration.
#[derive(Debug, Error)]
pub enum EffectError {
    /// No configuration file was found in any of the expected locations.
    #[error("no configuration file found")]
    ConfigNotFound,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
