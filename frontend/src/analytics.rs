use log::debug;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};

/// Events the page reports to the analytics backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView { page_title: String },
    ProductView { product: String },
    PhoneClick,
    WhatsappClick,
    ContactSubmit { name: String, email: String },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::PageView { .. } => "page_view",
            AnalyticsEvent::ProductView { .. } => "product_view",
            AnalyticsEvent::PhoneClick => "phone_click",
            AnalyticsEvent::WhatsappClick => "whatsapp_click",
            AnalyticsEvent::ContactSubmit { .. } => "contact_submit",
        }
    }

    /// Parameter object handed to `gtag`, without the event tag itself.
    pub fn params(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut params = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        params.remove("event");
        params
    }
}

/// Calls `gtag("event", ...)` when the page has it. Never fails.
pub fn track_event(event: &AnalyticsEvent) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let gtag = match Reflect::get(&window, &JsValue::from_str("gtag")) {
        Ok(value) => value,
        Err(_) => return,
    };
    let Some(gtag) = gtag.dyn_ref::<Function>() else {
        return;
    };

    // gtag wants a plain object, not a JS Map
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let params = event.params().serialize(&serializer).unwrap_or(JsValue::UNDEFINED);
    if let Err(e) = gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(event.name()),
        &params,
    ) {
        debug!("gtag threw for {}: {:?}", event.name(), e);
    }
}
