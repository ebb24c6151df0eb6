use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::content::GalleryImage;
use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxView {
    Closed,
    Open(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightboxState {
    len: usize,
    view: LightboxView,
}

#[derive(Debug)]
pub enum LightboxAction {
    Open(usize),
    Close,
    Next,
    Prev,
    Key(String),
}

impl LightboxState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            view: LightboxView::Closed,
        }
    }

    pub fn view(&self) -> LightboxView {
        self.view
    }

    pub fn is_open(&self) -> bool {
        matches!(self.view(), LightboxView::Open(_))
    }

    pub fn current(&self) -> Option<usize> {
        match self.view {
            LightboxView::Open(index) => Some(index),
            LightboxView::Closed => None,
        }
    }

    pub fn apply(&mut self, action: LightboxAction) {
        let action = match (action, self.view) {
            (LightboxAction::Key(key), LightboxView::Open(_)) => match key.as_str() {
                "Escape" => LightboxAction::Close,
                "ArrowRight" => LightboxAction::Next,
                "ArrowLeft" => LightboxAction::Prev,
                _ => return,
            },
            (action, _) => action,
        };

        self.view = match (action, self.view) {
            (LightboxAction::Open(index), _) if index < self.len => LightboxView::Open(index),
            (LightboxAction::Open(index), view) => {
                debug!("Ignoring open of image {} out of {}", index, self.len);
                view
            }
            (LightboxAction::Close, _) => LightboxView::Closed,
            (LightboxAction::Next, LightboxView::Open(index)) => {
                LightboxView::Open((index + 1) % self.len)
            }
            (LightboxAction::Prev, LightboxView::Open(index)) => {
                LightboxView::Open((index + self.len - 1) % self.len)
            }
            // next/prev/keys do nothing while closed
            (_, view) => view,
        };
    }
}

impl Reducible for LightboxState {
    type Action = LightboxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub images: Vec<GalleryImage>,
}

/// Thumbnail grid plus the modal viewer that pages through it.
#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    let images = &props.images;
    let lightbox = {
        let len = images.len();
        use_reducer(move || LightboxState::new(len))
    };

    // Body scroll follows the modal
    use_effect_with_deps(
        |open: &bool| {
            if let Err(e) = dom::set_body_scroll_locked(*open) {
                warn!("Could not toggle page scroll: {}", e);
            }
            || ()
        },
        lightbox.is_open(),
    );

    {
        let lightbox = lightbox.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if lightbox.is_open() {
                lightbox.dispatch(LightboxAction::Key(e.key()));
            }
        });
    }

    let close = {
        let lightbox = lightbox.clone();
        Callback::from(move |_: MouseEvent| lightbox.dispatch(LightboxAction::Close))
    };
    let backdrop_click = {
        let lightbox = lightbox.clone();
        Callback::from(move |e: MouseEvent| {
            let on_backdrop = match (e.target(), e.current_target()) {
                (Some(target), Some(current)) => JsValue::from(target) == JsValue::from(current),
                _ => false,
            };
            if on_backdrop {
                lightbox.dispatch(LightboxAction::Close);
            }
        })
    };
    let next = {
        let lightbox = lightbox.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            lightbox.dispatch(LightboxAction::Next);
        })
    };
    let prev = {
        let lightbox = lightbox.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            lightbox.dispatch(LightboxAction::Prev);
        })
    };

    let thumbnails = images.iter().enumerate().map(|(index, image)| {
        let onclick = {
            let lightbox = lightbox.clone();
            Callback::from(move |_: MouseEvent| lightbox.dispatch(LightboxAction::Open(index)))
        };
        html! {
            <img class="gallery-item" src={image.src.clone()} alt={image.alt.clone()} loading="lazy" {onclick} />
        }
    });

    let shown = lightbox.current().and_then(|index| images.get(index));
    let display = if lightbox.is_open() {
        "display: flex;"
    } else {
        "display: none;"
    };

    html! {
        <>
            <div class="gallery-grid">
                { for thumbnails }
            </div>
            <div id="lightbox" class="lightbox" style={display} onclick={backdrop_click}>
                <span class="close-btn" role="button" aria-label="Close" onclick={close}>{"×"}</span>
                <img id="lightbox-img"
                     class="lightbox-content"
                     src={shown.map(|image| image.src.clone()).unwrap_or_default()}
                     alt={shown.map(|image| image.alt.clone()).unwrap_or_default()} />
                <a class="prev" role="button" aria-label="Previous image" onclick={prev}>{"❮"}</a>
                <a class="next" role="button" aria-label="Next image" onclick={next}>{"❯"}</a>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(len: usize, index: usize) -> LightboxState {
        let mut state = LightboxState::new(len);
        state.apply(LightboxAction::Open(index));
        state
    }

    #[test]
    fn thumbnail_then_next_wraps() {
        let mut state = open_at(5, 2);
        assert_eq!(state.current(), Some(2));
        state.apply(LightboxAction::Next);
        assert_eq!(state.current(), Some(3));

        let mut state = open_at(5, 4);
        state.apply(LightboxAction::Next);
        assert_eq!(state.current(), Some(0));
    }

    #[test]
    fn n_steps_land_on_modular_index() {
        for n in 0..12 {
            let mut forward = open_at(5, 0);
            let mut backward = open_at(5, 0);
            for _ in 0..n {
                forward.apply(LightboxAction::Next);
                backward.apply(LightboxAction::Prev);
            }
            assert_eq!(forward.current(), Some(n % 5));
            assert_eq!(backward.current(), Some((5 - n % 5) % 5));
        }
    }

    #[test]
    fn keys_only_act_while_open() {
        let mut state = LightboxState::new(3);
        state.apply(LightboxAction::Key("ArrowRight".into()));
        assert_eq!(state.view(), LightboxView::Closed);

        state.apply(LightboxAction::Open(0));
        state.apply(LightboxAction::Key("ArrowLeft".into()));
        assert_eq!(state.current(), Some(2));
        state.apply(LightboxAction::Key("ArrowRight".into()));
        assert_eq!(state.current(), Some(0));
        state.apply(LightboxAction::Key("Enter".into()));
        assert_eq!(state.current(), Some(0));
        state.apply(LightboxAction::Key("Escape".into()));
        assert!(!state.is_open());
    }

    #[test]
    fn reopening_uses_clicked_thumbnail() {
        let mut state = open_at(4, 1);
        state.apply(LightboxAction::Next);
        state.apply(LightboxAction::Close);
        state.apply(LightboxAction::Open(3));
        assert_eq!(state.current(), Some(3));
    }

    #[test]
    fn empty_or_out_of_range_is_ignored() {
        let mut empty = LightboxState::new(0);
        empty.apply(LightboxAction::Open(0));
        empty.apply(LightboxAction::Next);
        assert_eq!(empty.view(), LightboxView::Closed);

        let mut state = open_at(2, 1);
        state.apply(LightboxAction::Open(7));
        assert_eq!(state.current(), Some(1));
    }

    #[test]
    fn navigation_while_closed_is_a_no_op() {
        let mut state = LightboxState::new(3);
        state.apply(LightboxAction::Next);
        state.apply(LightboxAction::Prev);
        assert!(!state.is_open());
    }

    #[test]
    fn unchanged_state_is_not_replaced() {
        let closed = Rc::new(LightboxState::new(3));
        let next = closed.clone().reduce(LightboxAction::Key("a".into()));
        assert!(Rc::ptr_eq(&closed, &next));

        let open = Rc::new(open_at(3, 1));
        let next = open.clone().reduce(LightboxAction::Key("Shift".into()));
        assert!(Rc::ptr_eq(&open, &next));

        let next = open.clone().reduce(LightboxAction::Next);
        assert!(!Rc::ptr_eq(&open, &next));
        assert_eq!(next.current(), Some(2));
    }
}
