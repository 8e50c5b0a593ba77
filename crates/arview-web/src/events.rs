use crate::ar::{ArElement, ArStatusSubscription};
use crate::camera::{self, CameraStream};
use crate::ui::{self, Surfaces};
use arview_core::{AttemptToken, Effect, PresentationController, Resolution};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;

/// All viewer state, shared between DOM callbacks.
pub struct Viewer {
    pub controller: PresentationController<CameraStream>,
    pub surfaces: Surfaces,
    pub ar: ArElement,
    pub facing_mode: &'static str,
    status_sub: Option<ArStatusSubscription>,
}

pub type SharedViewer = Rc<RefCell<Viewer>>;

impl Viewer {
    pub fn new(
        controller: PresentationController<CameraStream>,
        surfaces: Surfaces,
        ar: ArElement,
        facing_mode: &'static str,
    ) -> Self {
        Self {
            controller,
            surfaces,
            ar,
            facing_mode,
            status_sub: None,
        }
    }
}

/// Run `f` against the controller, perform the effects it emits, then render.
///
/// The viewer is never borrowed while effects run, so callbacks fired
/// synchronously by the DOM can dispatch again.
pub fn dispatch(viewer: &SharedViewer, f: impl FnOnce(&mut Viewer, &mut Vec<Effect>)) {
    let mut effects = Vec::new();
    {
        let mut v = viewer.borrow_mut();
        f(&mut v, &mut effects);
    }
    for effect in effects {
        run_effect(viewer, effect);
    }
    render(viewer);
}

pub fn render(viewer: &SharedViewer) {
    let v = viewer.borrow();
    ui::render(&v.surfaces, &v.controller.view());
}

fn run_effect(viewer: &SharedViewer, effect: Effect) {
    match effect {
        Effect::ActivateAr(attempt) => {
            let ar = viewer.borrow().ar.clone();
            let viewer = viewer.clone();
            spawn_local(async move {
                let result = ar.activate().await;
                dispatch(&viewer, |v, out| v.controller.on_ar_activation(attempt, result, out));
            });
        }
        Effect::StartCamera(token) => {
            spawn_local(acquire_camera(viewer.clone(), token));
        }
        Effect::DetachCamera => {
            camera::detach(&viewer.borrow().surfaces.video, None);
        }
        Effect::SubscribeArStatus => {
            let weak = Rc::downgrade(viewer);
            let ar = viewer.borrow().ar.clone();
            let sub = ar.subscribe_status(move |status| {
                if let Some(viewer) = Weak::upgrade(&weak) {
                    dispatch(&viewer, |v, out| {
                        let Viewer { controller, ar, .. } = v;
                        controller.on_ar_status(status, &*ar, out);
                    });
                }
            });
            let old = viewer.borrow_mut().status_sub.replace(sub);
            release_later(old);
        }
        Effect::UnsubscribeArStatus => {
            let old = viewer.borrow_mut().status_sub.take();
            release_later(old);
        }
    }
}

async fn acquire_camera(viewer: SharedViewer, token: AttemptToken) {
    let started = Instant::now();
    let facing_mode = viewer.borrow().facing_mode;
    let result = match camera::request_stream(facing_mode).await {
        Ok(stream) => {
            // Do not bind a stream that a newer start/stop already superseded.
            if !viewer.borrow().controller.camera().is_current(token) {
                Ok(stream)
            } else {
                let video = viewer.borrow().surfaces.video.clone();
                camera::bind_and_play(&video, stream).await
            }
        }
        Err(e) => Err(arview_core::AcquireFailure::new(e)),
    };
    let delivered = arview_core::delivered_stream(&result).cloned();

    let mut resolution = Resolution::Superseded;
    dispatch(&viewer, |v, out| {
        resolution = v.controller.on_camera_result(token, result, out);
    });
    match resolution {
        Resolution::Active => log::info!(
            "[camera] live after {:.0} ms",
            started.elapsed().as_secs_f64() * 1000.0
        ),
        Resolution::Failed(e) => log::warn!("[camera] unavailable: {}", e),
        Resolution::Superseded => {
            // Only unbind our own stream; a newer attempt may own the video.
            if let Some(stream) = delivered {
                camera::detach(&viewer.borrow().surfaces.video, Some(&stream));
            }
        }
    }
}

// The unsubscribe may be requested from inside the listener itself; dropping
// its closure must wait until that call has returned.
fn release_later(sub: Option<ArStatusSubscription>) {
    if let Some(sub) = sub {
        spawn_local(async move { drop(sub) });
    }
}
