// Capture source — acquisition, live feed, and the synthetic backend.

pub mod backend;
pub mod error;
pub mod feed;
pub mod synthetic;
pub mod types;

use self::backend::CameraBackend;
use self::error::{CameraError, Result};
use self::synthetic::SyntheticBackend;

/// Resolve the configured backend name to an implementation.
///
/// `GESTURECAST_SYNTHETIC=1` overrides the configured name.
pub fn backend_for(name: &str) -> Result<Box<dyn CameraBackend>> {
    if SyntheticBackend::is_enabled() {
        return Ok(Box::new(SyntheticBackend::new()));
    }

    match name {
        "synthetic" => Ok(Box::new(SyntheticBackend::new())),
        other => Err(CameraError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_for_resolves_synthetic() {
        let backend = backend_for("synthetic").unwrap();
        assert_eq!(backend.name(), "synthetic");
    }

    #[test]
    fn backend_for_rejects_unknown_names() {
        let result = backend_for("holographic");
        assert!(matches!(result, Err(CameraError::UnknownBackend(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "unknown camera backend: holographic"
        );
    }
}
