//! Recoverable error types for the viewer core.
//!
//! None of these terminate the application: camera errors are shown to the
//! user, AR errors are logged and converted into a mode change.

use thiserror::Error;

/// Why the camera could not be acquired or played.
///
/// `Display` yields exactly the message reported by the device API so the UI
/// can show it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    NoDevice(String),

    #[error("{0}")]
    Playback(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

impl CameraError {
    /// Classify a rejected capture request by its DOMException `name`.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        let msg = |fallback: &str| {
            let m = message.trim();
            if m.is_empty() {
                fallback.to_string()
            } else {
                m.to_string()
            }
        };
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                CameraError::PermissionDenied(msg("Camera permission was denied"))
            }
            "NotFoundError" | "OverconstrainedError" | "NotReadableError" | "DevicesNotFoundError" => {
                CameraError::NoDevice(msg("No usable camera was found"))
            }
            "NotSupportedError" | "TypeError" => {
                CameraError::Unsupported(msg("Camera capture is not supported here"))
            }
            _ => CameraError::Other(msg("Could not start the camera")),
        }
    }

    /// A `play()` rejection on the video element after capture succeeded.
    pub fn playback(message: &str) -> Self {
        let m = message.trim();
        if m.is_empty() {
            CameraError::Playback("Camera video could not be played".to_string())
        } else {
            CameraError::Playback(m.to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CameraError::PermissionDenied(m)
            | CameraError::NoDevice(m)
            | CameraError::Playback(m)
            | CameraError::Unsupported(m)
            | CameraError::Other(m) => m,
        }
    }
}

/// Failures reported by the AR surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArError {
    #[error("AR capability query failed: {0}")]
    Query(String),

    #[error("AR activation failed: {0}")]
    Activation(String),
}
