//! Keeps section reveals and the nav highlight in step with scrolling.

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{
    DEFAULT_NAV_HEIGHT_PX, NAV_HEIGHT_PROPERTY, SCROLL_SPY_BOTTOM_MARGIN_PX, SCROLL_SPY_THRESHOLD,
};
use crate::dom::{self, DomResult};
use crate::router::{Observation, PageAction, PageHandle};

/// Reads a pixel length the way `parseInt` would, falling back to the default
/// nav height for empty, unparsable or zero values.
pub fn parse_nav_height(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i32>() {
        Ok(value) if value != 0 => sign * value,
        _ => DEFAULT_NAV_HEIGHT_PX,
    }
}

/// Shrinks the observed viewport by the nav bar on top and a fixed strip at the bottom.
pub fn root_margin(nav_height: i32) -> String {
    format!("{}px 0px -{}px 0px", -nav_height, SCROLL_SPY_BOTTOM_MARGIN_PX)
}

/// Live observer over every `.section`; disconnects when dropped.
pub struct ScrollSpy {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl ScrollSpy {
    /// `None` when the browser has no `IntersectionObserver` or setup failed.
    pub fn start(page: PageHandle) -> Option<Self> {
        if !dom::window_has("IntersectionObserver") {
            info!("IntersectionObserver unavailable, scroll-spy disabled");
            return None;
        }
        match Self::observe_sections(page) {
            Ok(spy) => Some(spy),
            Err(e) => {
                warn!("Failed to start scroll-spy: {}", e);
                None
            }
        }
    }

    fn observe_sections(page: PageHandle) -> DomResult<Self> {
        let nav_height = parse_nav_height(&dom::root_property(NAV_HEIGHT_PROPERTY).unwrap_or_default());

        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<Observation> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Observation {
                    id: entry.target().id(),
                    intersecting: entry.is_intersecting(),
                    top: entry.bounding_client_rect().top(),
                })
                .collect();
            if !batch.is_empty() {
                page.dispatch(PageAction::Observed(batch));
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(SCROLL_SPY_THRESHOLD));
        options.set_root_margin(&root_margin(nav_height));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let sections = dom::document()?.query_selector_all(".section")?;
        for i in 0..sections.length() {
            if let Some(section) = sections.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                observer.observe(&section);
            }
        }
        debug!(
            "Scroll-spy watching {} sections, root margin {}",
            sections.length(),
            root_margin(nav_height)
        );

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
