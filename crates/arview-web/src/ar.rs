use crate::dom;
use arview_core::{ArCapabilityQuery, ArError, ArStatus};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The platform AR element (e.g. `<model-viewer ar>`).
#[derive(Clone)]
pub struct ArElement(pub web::HtmlElement);

impl ArCapabilityQuery for ArElement {
    fn can_activate_ar(&self) -> Result<bool, ArError> {
        let v = js_sys::Reflect::get(&self.0, &"canActivateAR".into())
            .map_err(|e| ArError::Query(dom::js_error_parts(&e).1))?;
        Ok(v.as_bool().unwrap_or(false))
    }
}

impl ArElement {
    pub fn source(&self) -> Option<String> {
        self.0
            .get_attribute("data-src")
            .or_else(|| self.0.get_attribute("src"))
    }

    /// Call `activateAR()`, awaiting it if it returns a promise.
    pub async fn activate(&self) -> Result<(), ArError> {
        let activation_error = |e: JsValue| ArError::Activation(dom::js_error_parts(&e).1);
        let f = js_sys::Reflect::get(&self.0, &"activateAR".into()).map_err(activation_error)?;
        let f = f
            .dyn_into::<js_sys::Function>()
            .map_err(|_| ArError::Activation("activateAR is not available".into()))?;
        let ret = f.call0(&self.0).map_err(activation_error)?;
        if let Ok(promise) = ret.dyn_into::<js_sys::Promise>() {
            JsFuture::from(promise).await.map_err(activation_error)?;
        }
        Ok(())
    }

    /// Listen for `ar-status` events until the returned guard is dropped.
    pub fn subscribe_status(&self, mut handler: impl FnMut(ArStatus) + 'static) -> ArStatusSubscription {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            let status = ev
                .dyn_ref::<web::CustomEvent>()
                .and_then(|ce| js_sys::Reflect::get(&ce.detail(), &"status".into()).ok())
                .and_then(|s| s.as_string());
            match status.as_deref().and_then(ArStatus::parse) {
                Some(s) => handler(s),
                None => log::debug!("[ar] ignoring ar-status event {:?}", status),
            }
        }) as Box<dyn FnMut(web::Event)>);
        let _ = self
            .0
            .add_event_listener_with_callback("ar-status", closure.as_ref().unchecked_ref());
        log::debug!("[ar] status listener attached");
        ArStatusSubscription {
            target: self.0.clone(),
            closure,
        }
    }
}

/// Removes the `ar-status` listener on drop.
pub struct ArStatusSubscription {
    target: web::HtmlElement,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for ArStatusSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("ar-status", self.closure.as_ref().unchecked_ref());
        log::debug!("[ar] status listener removed");
    }
}
