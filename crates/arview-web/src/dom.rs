use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}; click handler not wired", element_id);
    }
}

pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Look up an element by id and cast it to the expected type.
pub fn element<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has unexpected type: {:?}", id, e))
}

#[inline]
pub fn set_visible(el: &web::Element, visible: bool) {
    if visible {
        let _ = el.remove_attribute("hidden");
        let _ = el.set_attribute("style", "");
    } else {
        let _ = el.set_attribute("hidden", "");
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Best-effort `name` and `message` of a rejected promise value.
pub fn js_error_parts(err: &wasm_bindgen::JsValue) -> (String, String) {
    if let Some(ex) = err.dyn_ref::<web::DomException>() {
        return (ex.name(), ex.message());
    }
    let field = |key: &str| {
        js_sys::Reflect::get(err, &key.into())
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    let message = field("message");
    let message = if message.is_empty() {
        err.as_string().unwrap_or_default()
    } else {
        message
    };
    (field("name"), message)
}
