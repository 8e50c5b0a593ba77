#![cfg(target_arch = "wasm32")]
use arview_core::{DeviceClass, PresentationController, ViewerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod ar;
mod asset;
mod camera;
mod dom;
mod events;
mod ui;

pub use asset::{AssetFramer, NormalizedAsset};

fn device_class(window: &web::Window) -> DeviceClass {
    let nav = window.navigator();
    let ua = nav.user_agent().unwrap_or_default();
    DeviceClass::from_signals(&ua, nav.max_touch_points())
}

fn collect_surfaces(document: &web::Document, config: &ViewerConfig) -> anyhow::Result<ui::Surfaces> {
    let ids = &config.ids;
    Ok(ui::Surfaces {
        toggle: dom::element(document, ids.toggle)?,
        orbit: dom::element(document, ids.orbit_view)?,
        ar: dom::element(document, ids.ar_view)?,
        camera: dom::element(document, ids.camera_view)?,
        video: dom::element(document, ids.camera_video)?,
        error: document.get_element_by_id(ids.error),
        hint: document.get_element_by_id(ids.hint),
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("arview-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut config = ViewerConfig::default();
    let ar = ar::ArElement(dom::element::<web::HtmlElement>(&document, config.ids.ar_view)?);
    if let Some(src) = ar.source() {
        config = config.with_source(src);
    }
    let surfaces = collect_surfaces(&document, &config)?;

    let class = device_class(&window);
    let mut controller = PresentationController::new(class);
    let capable = controller.refresh_capability(&ar);
    log::info!(
        "[viewer] source={} device={:?} ar_capable={}",
        config.source.as_deref().unwrap_or("<none>"),
        class,
        capable
    );

    let viewer: events::SharedViewer = Rc::new(RefCell::new(events::Viewer::new(
        controller,
        surfaces,
        ar.clone(),
        config.facing_mode,
    )));

    // Toggle: the only user control
    let viewer_toggle = viewer.clone();
    dom::add_click_listener(&document, config.ids.toggle, move || {
        events::dispatch(&viewer_toggle, |v, out| v.controller.toggle(out));
    });

    // The AR element may only report capability once its model has loaded
    let viewer_load = Rc::downgrade(&viewer);
    let on_load = Closure::wrap(Box::new(move || {
        if let Some(viewer) = viewer_load.upgrade() {
            events::dispatch(&viewer, |v, _| {
                let events::Viewer { controller, ar, .. } = v;
                controller.refresh_capability(&*ar);
            });
        }
    }) as Box<dyn FnMut()>);
    let _ = ar
        .0
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
    on_load.forget();

    // Leaving the page must release the camera
    let viewer_hide = viewer.clone();
    dom::add_window_listener("pagehide", move || {
        log::info!("[viewer] pagehide; tearing down");
        events::dispatch(&viewer_hide, |v, out| v.controller.teardown(out));
    });

    events::render(&viewer);
    Ok(())
}
