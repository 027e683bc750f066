use dust_generator::{ConfigError, ValidationError};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Failures of the run store and its export formats.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no simulation run available; run a simulation first")]
    NoRunAvailable,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse service configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Anything a service request can fail with.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Category of a failed request as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub enum ErrorKind {
    /// Request parameters were rejected
    Validation,
    /// No run has been published yet
    NoRun,
    Internal,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Store(StoreError::NoRunAvailable) => ErrorKind::NoRun,
            ServiceError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller can act on the message: bad input or no run yet.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// Message safe to hand back to a caller.
    ///
    /// Internal failures are logged in full and reported generically.
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            log::error!("Request failed: {}", self);
            "internal error".to_string()
        }
    }
}
