use crate::dom;
use arview_core::{AcquireFailure, CameraError, TrackSource};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Owned `MediaStream` handed to the core camera session.
#[derive(Clone, Debug)]
pub struct CameraStream(web::MediaStream);

impl CameraStream {
    pub fn media(&self) -> &web::MediaStream {
        &self.0
    }
}

impl TrackSource for CameraStream {
    fn stop_all_tracks(&self) {
        let tracks = self.0.get_tracks();
        for t in tracks.iter() {
            if let Ok(track) = t.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        log::debug!("[camera] stopped {} track(s)", tracks.length());
    }
}

fn camera_error(err: &JsValue) -> CameraError {
    let (name, message) = dom::js_error_parts(err);
    CameraError::from_dom_exception(&name, &message)
}

/// Ask for a video-only stream from the camera facing `facing_mode`.
pub async fn request_stream(facing_mode: &str) -> Result<CameraStream, CameraError> {
    let window = web::window().ok_or_else(|| CameraError::Unsupported("No window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| camera_error(&e))?;

    let video = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&video, &"facingMode".into(), &facing_mode.into());
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| camera_error(&e))?;
    let value = JsFuture::from(promise).await.map_err(|e| camera_error(&e))?;
    value
        .dyn_into::<web::MediaStream>()
        .map(CameraStream)
        .map_err(|_| CameraError::Other("getUserMedia returned no stream".into()))
}

/// Attach `stream` to the video element and start playback.
///
/// On rejection the stream is handed back inside the failure so the session
/// can stop its tracks.
pub async fn bind_and_play(
    video: &web::HtmlVideoElement,
    stream: CameraStream,
) -> Result<CameraStream, AcquireFailure<CameraStream>> {
    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "");
    video.set_src_object(Some(stream.media()));
    let played = match video.play() {
        Ok(p) => JsFuture::from(p).await.map(|_| ()),
        Err(e) => Err(e),
    };
    match played {
        Ok(()) => Ok(stream),
        Err(e) => {
            video.set_src_object(None);
            let (_, message) = dom::js_error_parts(&e);
            Err(AcquireFailure::with_stream(CameraError::playback(&message), stream))
        }
    }
}

/// Clear the video element, but only if it still shows `stream` (or any
/// stream when `stream` is `None`).
pub fn detach(video: &web::HtmlVideoElement, stream: Option<&CameraStream>) {
    let bound = video.src_object();
    let matches = match (bound.as_ref(), stream) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(b), Some(s)) => {
            let bound: &JsValue = b.as_ref();
            let ours: &JsValue = s.media().as_ref();
            bound == ours
        }
    };
    if matches {
        video.set_src_object(None);
    }
}
