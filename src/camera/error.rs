use thiserror::Error;

/// Capture-source errors.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Device denied, missing, or busy. Fatal to the control loop: the
    /// session surfaces it on the status indicator and never retries.
    #[error("camera acquisition failed: {0}")]
    Acquisition(String),

    #[error("unknown camera backend: {0}")]
    UnknownBackend(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CameraError>;
