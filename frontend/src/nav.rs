use log::{debug, warn};
use web_sys::{Event, HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::NAV_HEIGHT_PROPERTY;
use crate::content::NavEntry;
use crate::dom;
use crate::router::{show_section, target_from_href, PageHandle, SectionState};

/// Mobile menu state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMenu {
    Closed,
    Open,
}

impl NavMenu {
    pub fn toggled(self) -> Self {
        match self {
            NavMenu::Closed => NavMenu::Open,
            NavMenu::Open => NavMenu::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == NavMenu::Open
    }

    /// Value for the toggle button's `aria-expanded`.
    pub fn aria_expanded(self) -> &'static str {
        if self.is_open() {
            "true"
        } else {
            "false"
        }
    }
}

fn sync_nav_height(navbar_ref: &NodeRef) {
    let Some(navbar) = navbar_ref.cast::<HtmlElement>() else {
        return;
    };
    let height = format!("{}px", navbar.offset_height());
    if let Err(e) = dom::set_root_property(NAV_HEIGHT_PROPERTY, &height) {
        warn!("Could not publish nav height: {}", e);
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub brand: String,
    pub entries: Vec<NavEntry>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let NavProps { brand, entries } = props;
    let page = use_context::<PageHandle>();
    let menu = use_state(|| NavMenu::Closed);
    let navbar_ref = use_node_ref();

    // Keep --nav-height in step with the rendered bar
    {
        let navbar_ref = navbar_ref.clone();
        use_effect_with_deps(
            move |_| {
                sync_nav_height(&navbar_ref);
                || ()
            },
            (),
        );
    }
    {
        let navbar_ref = navbar_ref.clone();
        use_event_with_window("resize", move |_: Event| sync_nav_height(&navbar_ref));
    }
    {
        let navbar_ref = navbar_ref.clone();
        use_event_with_window("load", move |_: Event| sync_nav_height(&navbar_ref));
    }

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let next = menu.toggled();
            debug!("Nav menu {:?}", next);
            menu.set(next);
        })
    };

    let links = entries.iter().map(|entry| {
        let onclick = {
            let menu = menu.clone();
            let page = page.clone();
            let href = entry.href.clone();
            Callback::from(move |e: MouseEvent| {
                if let Some(id) = target_from_href(&href) {
                    e.prevent_default();
                    if let Some(page) = &page {
                        show_section(page, id, None);
                    }
                }
                menu.set(NavMenu::Closed);
            })
        };
        let (highlighted, current) = match (&page, entry.section_id()) {
            (Some(page), Some(id)) => (
                page.is_highlighted(id),
                matches!(page.section(), SectionState::Showing(shown) if shown == id),
            ),
            _ => (false, false),
        };

        html! {
            <li>
                <a class={classes!("nav-link", highlighted.then_some("active"))}
                   href={entry.href.clone()}
                   aria-current={current.then_some("page")}
                   {onclick}>
                    {&entry.label}
                </a>
            </li>
        }
    });

    html! {
        <nav id="navbar" class="navbar" ref={navbar_ref}>
            <div class="nav-content">
                <a href="#home" class="nav-logo">{brand}</a>
                <button id="nav-toggle"
                        class="nav-toggle"
                        aria-controls="nav-list"
                        aria-label="Toggle navigation"
                        aria-expanded={menu.aria_expanded()}
                        onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul id="nav-list" class={classes!("nav-list", menu.is_open().then_some("open"))}>
                    { for links }
                </ul>
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates_starting_closed() {
        let mut menu = NavMenu::Closed;
        let mut seen = Vec::new();
        for _ in 0..3 {
            menu = menu.toggled();
            seen.push(menu.aria_expanded());
        }
        assert_eq!(seen, vec!["true", "false", "true"]);
    }

    #[test]
    fn closed_menu_reports_false() {
        assert!(!NavMenu::Closed.is_open());
        assert_eq!(NavMenu::Closed.aria_expanded(), "false");
    }
}
