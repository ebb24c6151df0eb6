use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::Event;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::content::SiteContent;
use crate::dom;
use crate::nav::Nav;
use crate::pages::home::Home;
use crate::router::{complete_navigation, id_from_hash, show_section, PageHandle, PageState};
use crate::scroll_spy::ScrollSpy;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub content: Rc<SiteContent>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let page = {
        let targets = props.content.nav_targets();
        use_reducer(move || PageState::new(targets))
    };

    // Finish each navigation once its section has rendered as active
    {
        let seq = page.navigation_seq();
        let page = page.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(navigation) = page.last_navigation() {
                    complete_navigation(navigation);
                }
                || ()
            },
            seq,
        );
    }

    // Honour the hash we were loaded with, then start watching sections
    {
        let page = page.clone();
        use_effect_with_deps(
            move |_| {
                let initial = dom::current_hash()
                    .ok()
                    .and_then(|hash| id_from_hash(&hash).map(str::to_string));
                if let Some(id) = initial {
                    debug!("Initial hash #{}", id);
                    let page = page.clone();
                    Timeout::new(config::HASH_SETTLE_DELAY_MS, move || {
                        show_section(&page, &id, None);
                    })
                    .forget();
                }

                let spy = ScrollSpy::start(page);
                move || drop(spy)
            },
            (),
        );
    }

    {
        let page = page.clone();
        use_event_with_window("hashchange", move |_: Event| {
            let hash = dom::current_hash().unwrap_or_default();
            if let Some(id) = id_from_hash(&hash) {
                show_section(&page, id, None);
            }
        });
    }

    html! {
        <ContextProvider<PageHandle> context={page}>
            <Nav brand={props.content.brand.clone()} entries={props.content.nav.clone()} />
            <Home content={props.content.clone()} />
        </ContextProvider<PageHandle>>
    }
}
