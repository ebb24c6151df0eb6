//! Thin wrappers over the browser calls the page needs.
//!
//! Everything here returns a `Result` so callers can decide whether a
//! failure is worth a warning or can be ignored outright.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{
    Document, Element, FocusOptions, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type DomResult<T> = Result<T, DomError>;

pub fn window() -> DomResult<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> DomResult<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn element_by_id(id: &str) -> DomResult<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))
}

pub fn html_element_by_id(id: &str) -> DomResult<HtmlElement> {
    element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Js(format!("`{}` is not an HTML element", id)))
}

/// Publishes the nav bar height as a CSS custom property on `<html>`.
pub fn set_root_property(name: &str, value: &str) -> DomResult<()> {
    let root = document()?
        .document_element()
        .ok_or(DomError::NoDocument)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Js("document element is not HTML".to_string()))?;
    root.style().set_property(name, value)?;
    Ok(())
}

/// Computed value of a custom property on `<html>`, empty when unset.
pub fn root_property(name: &str) -> DomResult<String> {
    let window = window()?;
    let root = document()?.document_element().ok_or(DomError::NoDocument)?;
    let style = window
        .get_computed_style(&root)?
        .ok_or_else(|| DomError::Js("no computed style".to_string()))?;
    Ok(style.get_property_value(name)?)
}

pub fn set_body_scroll_locked(locked: bool) -> DomResult<()> {
    let body = document()?.body().ok_or(DomError::NoDocument)?;
    let overflow = if locked { "hidden" } else { "auto" };
    body.style().set_property("overflow", overflow)?;
    Ok(())
}

/// `element.focus({ preventScroll: true })`
pub fn focus_without_scroll(element: &HtmlElement) -> DomResult<()> {
    element.set_attribute("tabindex", "-1")?;
    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    element.focus_with_options(&options)?;
    Ok(())
}

pub fn smooth_scroll_to_top_of(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Rewrites the fragment without adding a history entry.
pub fn replace_hash(id: &str) -> DomResult<()> {
    let history = window()?.history()?;
    history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{}", id)))?;
    Ok(())
}

pub fn current_hash() -> DomResult<String> {
    Ok(window()?.location().hash()?)
}

pub fn window_has(name: &str) -> bool {
    window()
        .ok()
        .and_then(|w| Reflect::has(&w, &JsValue::from_str(name)).ok())
        .unwrap_or(false)
}
