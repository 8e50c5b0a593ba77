//! Camera session ownership.
//!
//! `CameraSession` is the only owner of the live capture stream. Every
//! acquisition is tagged with an [`AttemptToken`]; completions carrying an
//! older token are released on arrival instead of replacing the current state.

use crate::error::CameraError;

/// A live capture stream whose tracks can be stopped.
pub trait TrackSource {
    fn stop_all_tracks(&self);
}

/// Identifies one `begin()` call. Only the latest token may resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptToken(u64);

impl AttemptToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraStatus {
    #[default]
    Idle,
    Acquiring,
    Active,
    /// Fallback was requested but the camera could not be started.
    Unavailable,
}

/// A failed acquisition. `stream` is set when capture succeeded but a later
/// step (binding or playback) failed, so the tracks still need stopping.
#[derive(Debug)]
pub struct AcquireFailure<S> {
    pub error: CameraError,
    pub stream: Option<S>,
}

impl<S> AcquireFailure<S> {
    pub fn new(error: CameraError) -> Self {
        Self {
            error,
            stream: None,
        }
    }

    pub fn with_stream(error: CameraError, stream: S) -> Self {
        Self {
            error,
            stream: Some(stream),
        }
    }
}

/// The stream an acquisition produced, whether or not it succeeded.
pub fn delivered_stream<S>(result: &Result<S, AcquireFailure<S>>) -> Option<&S> {
    match result {
        Ok(stream) => Some(stream),
        Err(failure) => failure.stream.as_ref(),
    }
}

/// Outcome of `CameraSession::resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Active,
    Failed(CameraError),
    /// A newer `begin()` or a `stop()` ran first; the result was discarded.
    Superseded,
}

pub struct CameraSession<S: TrackSource> {
    stream: Option<S>,
    next_attempt: u64,
    pending: Option<AttemptToken>,
    status: CameraStatus,
    last_error: Option<CameraError>,
}

impl<S: TrackSource> Default for CameraSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TrackSource> CameraSession<S> {
    pub fn new() -> Self {
        Self {
            stream: None,
            next_attempt: 0,
            pending: None,
            status: CameraStatus::Idle,
            last_error: None,
        }
    }

    #[inline]
    pub fn status(&self) -> CameraStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == CameraStatus::Active
    }

    #[inline]
    pub fn last_error(&self) -> Option<&CameraError> {
        self.last_error.as_ref()
    }

    #[inline]
    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// True while `token` is the attempt a completion should bind to.
    #[inline]
    pub fn is_current(&self, token: AttemptToken) -> bool {
        self.pending == Some(token)
    }

    /// Tear down whatever is held, then hand out a token for a new request.
    pub fn begin(&mut self) -> AttemptToken {
        self.release();
        self.next_attempt += 1;
        let token = AttemptToken(self.next_attempt);
        self.pending = Some(token);
        self.status = CameraStatus::Acquiring;
        self.last_error = None;
        log::debug!("[camera] attempt {} started", token.0);
        token
    }

    /// Feed back the result of the request issued for `token`.
    pub fn resolve(&mut self, token: AttemptToken, result: Result<S, AcquireFailure<S>>) -> Resolution {
        if !self.is_current(token) {
            log::debug!("[camera] attempt {} superseded; releasing result", token.0);
            match result {
                Ok(stream) => stream.stop_all_tracks(),
                Err(AcquireFailure {
                    stream: Some(stream),
                    ..
                }) => stream.stop_all_tracks(),
                Err(_) => {}
            }
            return Resolution::Superseded;
        }
        self.pending = None;
        match result {
            Ok(stream) => {
                self.stream = Some(stream);
                self.status = CameraStatus::Active;
                self.last_error = None;
                log::info!("[camera] attempt {} active", token.0);
                Resolution::Active
            }
            Err(failure) => {
                if let Some(stream) = failure.stream {
                    stream.stop_all_tracks();
                }
                log::warn!("[camera] attempt {} failed: {}", token.0, failure.error);
                self.status = CameraStatus::Unavailable;
                self.last_error = Some(failure.error.clone());
                Resolution::Failed(failure.error)
            }
        }
    }

    /// Stop all tracks and drop the handle. Safe to call at any time.
    ///
    /// Returns whether a live stream was released.
    pub fn stop(&mut self) -> bool {
        let released = self.release();
        self.status = CameraStatus::Idle;
        if released {
            log::info!("[camera] stopped");
        }
        released
    }

    /// Forget any recorded error without touching the stream.
    pub fn clear_error(&mut self) {
        self.last_error = None;
        if self.status == CameraStatus::Unavailable {
            self.status = CameraStatus::Idle;
        }
    }

    fn release(&mut self) -> bool {
        self.pending = None;
        match self.stream.take() {
            Some(stream) => {
                stream.stop_all_tracks();
                true
            }
            None => false,
        }
    }
}

impl<S: TrackSource> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
