//! Presentation-mode state machine.
//!
//! The controller keeps one intent value and derives the effective mode from
//! it, so the visible surface can never disagree with the mode. Side effects
//! are pushed as [`Effect`]s for the frontend to perform; their completions
//! come back through `on_ar_activation` and `on_camera_result`.

use crate::camera::{AcquireFailure, AttemptToken, CameraSession, Resolution, TrackSource};
use crate::capability::{ArCapabilityQuery, CapabilityDetector, DeviceClass};
use crate::constants::*;
use crate::error::ArError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresentationMode {
    #[default]
    Orbit,
    Ar,
    CameraFallback,
}

/// The single display region shown for a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    OrbitCanvas,
    ArElement,
    CameraVideo,
}

impl From<PresentationMode> for Surface {
    fn from(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Orbit => Surface::OrbitCanvas,
            PresentationMode::Ar => Surface::ArElement,
            PresentationMode::CameraFallback => Surface::CameraVideo,
        }
    }
}

/// Session status reported by the AR element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArStatus {
    NotPresenting,
    SessionStarted,
    ObjectPlaced,
    Failed,
}

impl ArStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not-presenting" => Some(ArStatus::NotPresenting),
            "session-started" => Some(ArStatus::SessionStarted),
            "object-placed" => Some(ArStatus::ObjectPlaced),
            "failed" => Some(ArStatus::Failed),
            _ => None,
        }
    }

    #[inline]
    fn ends_session(self) -> bool {
        matches!(self, ArStatus::Failed | ArStatus::NotPresenting)
    }
}

/// Identifies one AR activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArAttempt(u64);

/// Work the frontend must perform after a controller call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ActivateAr(ArAttempt),
    StartCamera(AttemptToken),
    /// Unbind the video element; the stream itself is already stopped.
    DetachCamera,
    SubscribeArStatus,
    UnsubscribeArStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    Off,
    Ar(ArAttempt),
    Fallback,
}

/// Everything the UI needs to render the current state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub mode: PresentationMode,
    pub surface: Surface,
    pub label: &'static str,
    pub error: Option<String>,
    pub hint: Option<&'static str>,
    pub camera_active: bool,
}

pub struct PresentationController<S: TrackSource> {
    intent: Intent,
    next_ar_attempt: u64,
    capability: CapabilityDetector,
    camera: CameraSession<S>,
}

impl<S: TrackSource> PresentationController<S> {
    pub fn new(device_class: DeviceClass) -> Self {
        Self {
            intent: Intent::Off,
            next_ar_attempt: 0,
            capability: CapabilityDetector::new(device_class),
            camera: CameraSession::new(),
        }
    }

    /// The one mode currently in effect.
    pub fn mode(&self) -> PresentationMode {
        match self.intent {
            Intent::Off => PresentationMode::Orbit,
            Intent::Ar(_) => PresentationMode::Ar,
            Intent::Fallback => PresentationMode::CameraFallback,
        }
    }

    pub fn is_capable(&self) -> bool {
        self.capability.is_capable()
    }

    pub fn camera(&self) -> &CameraSession<S> {
        &self.camera
    }

    pub fn refresh_capability(&mut self, query: &impl ArCapabilityQuery) -> bool {
        self.capability.refresh(query)
    }

    /// The single toggle control.
    pub fn toggle(&mut self, out: &mut Vec<Effect>) {
        match self.intent {
            Intent::Off => self.enter(out),
            Intent::Ar(_) | Intent::Fallback => self.exit(out),
        }
    }

    fn enter(&mut self, out: &mut Vec<Effect>) {
        self.camera.clear_error();
        if self.capability.is_capable() {
            self.next_ar_attempt += 1;
            let attempt = ArAttempt(self.next_ar_attempt);
            self.intent = Intent::Ar(attempt);
            log::info!("[mode] orbit -> ar (attempt {})", attempt.0);
            out.push(Effect::SubscribeArStatus);
            out.push(Effect::ActivateAr(attempt));
        } else {
            log::info!("[mode] orbit -> camera (AR unavailable)");
            self.start_fallback(out);
        }
    }

    fn exit(&mut self, out: &mut Vec<Effect>) {
        log::info!("[mode] {:?} -> orbit", self.mode());
        if matches!(self.intent, Intent::Ar(_)) {
            out.push(Effect::UnsubscribeArStatus);
        }
        self.intent = Intent::Off;
        self.camera.stop();
        out.push(Effect::DetachCamera);
    }

    fn start_fallback(&mut self, out: &mut Vec<Effect>) {
        if matches!(self.intent, Intent::Ar(_)) {
            out.push(Effect::UnsubscribeArStatus);
        }
        self.intent = Intent::Fallback;
        let token = self.camera.begin();
        out.push(Effect::StartCamera(token));
    }

    /// Completion of an `Effect::ActivateAr`.
    pub fn on_ar_activation(&mut self, attempt: ArAttempt, result: Result<(), ArError>, out: &mut Vec<Effect>) {
        if self.intent != Intent::Ar(attempt) {
            log::debug!("[ar] ignoring stale activation result for attempt {}", attempt.0);
            return;
        }
        if let Err(e) = result {
            log::warn!("[ar] {}; falling back to camera", e);
            self.start_fallback(out);
        }
    }

    /// An `ar-status` event from the AR element.
    pub fn on_ar_status(&mut self, status: ArStatus, query: &impl ArCapabilityQuery, out: &mut Vec<Effect>) {
        self.capability.refresh(query);
        match self.intent {
            Intent::Ar(_) if status.ends_session() => {
                log::info!("[mode] ar -> camera (status {:?})", status);
                self.start_fallback(out);
            }
            Intent::Off if status.ends_session() => {
                log::debug!("[ar] ignoring {:?} after exit", status);
            }
            _ => {}
        }
    }

    /// Completion of an `Effect::StartCamera`.
    pub fn on_camera_result(
        &mut self,
        token: AttemptToken,
        result: Result<S, AcquireFailure<S>>,
        out: &mut Vec<Effect>,
    ) -> Resolution {
        let resolution = self.camera.resolve(token, result);
        if let Resolution::Failed(_) = resolution {
            if self.intent == Intent::Fallback {
                log::info!("[mode] camera -> orbit (camera unavailable)");
                self.intent = Intent::Off;
                out.push(Effect::DetachCamera);
            }
        }
        resolution
    }

    /// Release everything before the viewer goes away.
    pub fn teardown(&mut self, out: &mut Vec<Effect>) {
        if matches!(self.intent, Intent::Ar(_)) {
            out.push(Effect::UnsubscribeArStatus);
        }
        self.intent = Intent::Off;
        self.camera.stop();
        out.push(Effect::DetachCamera);
    }

    /// Toggle text for the current mode. The fallback reads "Open Camera"
    /// until its stream is live.
    pub fn label(&self) -> &'static str {
        match self.mode() {
            PresentationMode::Ar => LABEL_EXIT_AR,
            PresentationMode::CameraFallback if self.camera.is_active() => LABEL_STOP_CAMERA,
            PresentationMode::CameraFallback => LABEL_OPEN_CAMERA,
            PresentationMode::Orbit if self.capability.is_capable() => LABEL_VIEW_IN_AR,
            PresentationMode::Orbit => LABEL_OPEN_CAMERA,
        }
    }

    pub fn view(&self) -> ViewState {
        let mode = self.mode();
        let hint = match mode {
            PresentationMode::Orbit => Some(self.capability.device_class().hint()),
            _ => None,
        };
        ViewState {
            mode,
            surface: Surface::from(mode),
            label: self.label(),
            error: self.camera.last_error().map(|e| e.to_string()),
            hint,
            camera_active: self.camera.is_active(),
        }
    }
}
