use crate::camera::error::Result;
use crate::camera::feed::FeedHandle;
use crate::camera::types::FeedConfig;

/// Camera acquisition trait.
///
/// One call to [`CameraBackend::open`] either grants an exclusive live feed
/// for the session or fails with an acquisition error. Device-specific
/// capture (V4L2, AVFoundation, DirectShow) plugs in behind this trait; the
/// in-tree implementation is the synthetic test-pattern backend.
pub trait CameraBackend: Send + Sync {
    /// Backend name as referenced from the settings file.
    fn name(&self) -> &'static str;

    /// Acquire the device and start the live feed.
    ///
    /// Acquisition failures are not transient the way network drops are:
    /// the caller surfaces them and does not retry.
    fn open(&self, config: &FeedConfig) -> Result<FeedHandle>;
}

impl std::fmt::Debug for dyn CameraBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraBackend")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::error::CameraError;

    /// Backend that always refuses acquisition, for the fatal path.
    struct DeniedBackend;

    impl CameraBackend for DeniedBackend {
        fn name(&self) -> &'static str {
            "denied"
        }

        fn open(&self, _config: &FeedConfig) -> Result<FeedHandle> {
            Err(CameraError::Acquisition("permission denied".to_string()))
        }
    }

    #[test]
    fn denied_backend_fails_acquisition() {
        let backend = DeniedBackend;
        let result = backend.open(&FeedConfig::default());
        assert!(matches!(result, Err(CameraError::Acquisition(_))));
    }

    #[test]
    fn acquisition_error_message_names_the_cause() {
        let backend = DeniedBackend;
        let err = backend.open(&FeedConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "camera acquisition failed: permission denied"
        );
    }

    #[test]
    fn trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn CameraBackend>>();
    }
}
