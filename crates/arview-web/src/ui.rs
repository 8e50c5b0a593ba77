use crate::dom;
use arview_core::{Surface, ViewState};
use web_sys as web;

/// DOM handles for everything the viewer shows or reads.
#[derive(Clone)]
pub struct Surfaces {
    pub toggle: web::HtmlElement,
    pub orbit: web::Element,
    pub ar: web::Element,
    pub camera: web::Element,
    pub video: web::HtmlVideoElement,
    pub error: Option<web::Element>,
    pub hint: Option<web::Element>,
}

/// Show exactly the region for `view.surface` and refresh the text regions.
pub fn render(s: &Surfaces, view: &ViewState) {
    dom::set_visible(&s.orbit, view.surface == Surface::OrbitCanvas);
    dom::set_visible(&s.ar, view.surface == Surface::ArElement);
    dom::set_visible(&s.camera, view.surface == Surface::CameraVideo);

    s.toggle.set_inner_text(view.label);
    let _ = s.toggle.set_attribute("data-mode", mode_attr(view));

    if let Some(el) = &s.error {
        match &view.error {
            Some(msg) => {
                el.set_text_content(Some(msg));
                dom::set_visible(el, true);
            }
            None => {
                el.set_text_content(None);
                dom::set_visible(el, false);
            }
        }
    }
    if let Some(el) = &s.hint {
        el.set_text_content(view.hint);
        dom::set_visible(el, view.hint.is_some());
    }
}

fn mode_attr(view: &ViewState) -> &'static str {
    match view.surface {
        Surface::OrbitCanvas => "orbit",
        Surface::ArElement => "ar",
        Surface::CameraVideo => "camera",
    }
}
