//! Section router: which page section is shown, which sections are revealed,
//! and which nav link is highlighted.
//!
//! The state lives in a reducer; the `active` classes in the markup are only a
//! projection of it. Platform side effects of a navigation (analytics, focus,
//! history, scrolling) run after the render that applied the class.

use std::collections::BTreeSet;
use std::rc::Rc;

use log::{debug, warn};
use yew::prelude::*;

use crate::analytics::{track_event, AnalyticsEvent};
use crate::dom;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionState {
    Idle,
    Showing(String),
}

/// One call to `show_section`, numbered so repeats of the same id still fire.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    pub id: String,
    pub seq: u64,
    pub follow_up: Option<AnalyticsEvent>,
}

/// A section's visibility as reported by the scroll-spy.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub id: String,
    pub intersecting: bool,
    pub top: f64,
}

#[derive(Debug)]
pub enum PageAction {
    Show {
        id: String,
        follow_up: Option<AnalyticsEvent>,
    },
    Observed(Vec<Observation>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    section: SectionState,
    revealed: BTreeSet<String>,
    highlighted: Option<String>,
    nav_targets: Rc<BTreeSet<String>>,
    last_navigation: Option<Navigation>,
    seq: u64,
}

pub type PageHandle = UseReducerHandle<PageState>;

impl PageState {
    pub fn new<I, S>(nav_targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            section: SectionState::Idle,
            revealed: BTreeSet::new(),
            highlighted: None,
            nav_targets: Rc::new(nav_targets.into_iter().map(Into::into).collect()),
            last_navigation: None,
            seq: 0,
        }
    }

    pub fn section(&self) -> &SectionState {
        &self.section
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted() == Some(id)
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn last_navigation(&self) -> Option<&Navigation> {
        self.last_navigation.as_ref()
    }

    /// Bumps on every navigation; effects key on it.
    pub fn navigation_seq(&self) -> u64 {
        self.seq
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Show { id, follow_up } => {
                self.seq += 1;
                self.revealed.insert(id.clone());
                self.section = SectionState::Showing(id.clone());
                self.last_navigation = Some(Navigation {
                    id,
                    seq: self.seq,
                    follow_up,
                });
            }
            PageAction::Observed(batch) => {
                for obs in &batch {
                    if obs.intersecting {
                        self.revealed.insert(obs.id.clone());
                    } else {
                        self.revealed.remove(&obs.id);
                    }
                }
                if let Some(id) = pick_highlight(&batch, &self.nav_targets) {
                    self.highlighted = Some(id.to_string());
                }
            }
        }
    }
}

impl Reducible for PageState {
    type Action = PageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Topmost intersecting section that has a nav link. Equal tops go to the
/// entry delivered last.
fn pick_highlight<'a>(batch: &'a [Observation], nav_targets: &BTreeSet<String>) -> Option<&'a str> {
    let mut best: Option<&Observation> = None;
    for obs in batch {
        if !obs.intersecting || !nav_targets.contains(&obs.id) {
            continue;
        }
        match best {
            Some(current) if obs.top > current.top => {}
            _ => best = Some(obs),
        }
    }
    best.map(|obs| obs.id.as_str())
}

/// In-page target of a link, `None` when the link should navigate normally.
pub fn target_from_href(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Section id from `location.hash`, `None` for an empty fragment.
pub fn id_from_hash(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// The action that shows `id`, or `None` when the document has no `.section`
/// with that id. Other elements are not navigation targets.
pub fn section_request(id: &str, follow_up: Option<AnalyticsEvent>) -> Option<PageAction> {
    let element = dom::element_by_id(id).ok()?;
    if !element.class_list().contains("section") {
        debug!("`{}` is not a section, ignoring", id);
        return None;
    }
    Some(PageAction::Show {
        id: id.to_string(),
        follow_up,
    })
}

/// Shows the section with `id` if the document has it, otherwise does nothing.
pub fn show_section(page: &PageHandle, id: &str, follow_up: Option<AnalyticsEvent>) {
    match section_request(id, follow_up) {
        Some(action) => {
            debug!("Showing section `{}`", id);
            page.dispatch(action);
        }
        None => debug!("No section `{}`, ignoring", id),
    }
}

/// Post-render half of a navigation: analytics, focus, history, scroll.
pub fn complete_navigation(navigation: &Navigation) {
    track_event(&AnalyticsEvent::PageView {
        page_title: navigation.id.clone(),
    });
    if let Some(event) = &navigation.follow_up {
        track_event(event);
    }

    let element = match dom::html_element_by_id(&navigation.id) {
        Ok(element) => element,
        Err(e) => {
            warn!("Section vanished before navigation finished: {}", e);
            return;
        }
    };
    if let Err(e) = dom::focus_without_scroll(&element) {
        debug!("Could not focus `{}`: {}", navigation.id, e);
    }
    // Older browsers may lack replaceState; the fragment just stays stale.
    if let Err(e) = dom::replace_hash(&navigation.id) {
        debug!("Could not update fragment to #{}: {}", navigation.id, e);
    }
    dom::smooth_scroll_to_top_of(&element);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> PageState {
        PageState::new(["home", "products", "about", "contact"])
    }

    fn seen(id: &str, intersecting: bool, top: f64) -> Observation {
        Observation {
            id: id.to_string(),
            intersecting,
            top,
        }
    }

    #[test]
    fn show_reveals_and_records_target() {
        let mut page = state();
        page.apply(PageAction::Show {
            id: "about".into(),
            follow_up: None,
        });
        assert_eq!(page.section(), &SectionState::Showing("about".into()));
        assert!(page.is_revealed("about"));
        assert!(!page.is_revealed("home"));
        assert_eq!(page.last_navigation().map(|n| n.id.as_str()), Some("about"));
    }

    #[test]
    fn repeated_show_gets_new_sequence() {
        let mut page = state();
        for _ in 0..2 {
            page.apply(PageAction::Show {
                id: "home".into(),
                follow_up: None,
            });
        }
        assert_eq!(page.navigation_seq(), 2);
        assert_eq!(page.last_navigation().unwrap().seq, 2);
    }

    #[test]
    fn product_view_rides_along_with_navigation() {
        let mut page = state();
        let event = AnalyticsEvent::ProductView {
            product: "chairs".into(),
        };
        page.apply(PageAction::Show {
            id: "chairs-details".into(),
            follow_up: Some(event.clone()),
        });
        assert_eq!(page.last_navigation().unwrap().follow_up, Some(event));
    }

    #[test]
    fn observer_toggles_reveal() {
        let mut page = state();
        page.apply(PageAction::Observed(vec![seen("home", true, 0.0), seen("about", true, 500.0)]));
        assert!(page.is_revealed("home") && page.is_revealed("about"));

        page.apply(PageAction::Observed(vec![seen("home", false, -800.0)]));
        assert!(!page.is_revealed("home"));
        assert!(page.is_revealed("about"));
    }

    #[test]
    fn leaving_viewport_unreveals_shown_section() {
        let mut page = state();
        page.apply(PageAction::Show {
            id: "contact".into(),
            follow_up: None,
        });
        page.apply(PageAction::Observed(vec![seen("contact", false, 900.0)]));
        assert!(!page.is_revealed("contact"));
        // canonical target is untouched by the spy
        assert_eq!(page.section(), &SectionState::Showing("contact".into()));
    }

    #[test]
    fn topmost_intersecting_section_wins_highlight() {
        let mut page = state();
        page.apply(PageAction::Observed(vec![
            seen("about", true, 300.0),
            seen("products", true, 40.0),
            seen("contact", false, 10.0),
        ]));
        assert_eq!(page.highlighted(), Some("products"));
        assert!(page.is_highlighted("products"));
        assert!(!page.is_highlighted("about"));
    }

    #[test]
    fn equal_tops_fall_back_to_last_delivered() {
        let mut page = state();
        page.apply(PageAction::Observed(vec![seen("home", true, 0.0), seen("about", true, 0.0)]));
        assert_eq!(page.highlighted(), Some("about"));
    }

    #[test]
    fn sections_without_links_keep_previous_highlight() {
        let mut page = state();
        page.apply(PageAction::Observed(vec![seen("home", true, 0.0)]));
        page.apply(PageAction::Observed(vec![seen("tables-details", true, 0.0)]));
        assert_eq!(page.highlighted(), Some("home"));
        assert!(page.is_revealed("tables-details"));

        page.apply(PageAction::Observed(vec![seen("home", false, -500.0)]));
        assert_eq!(page.highlighted(), Some("home"));
    }

    #[test]
    fn href_and_hash_parsing() {
        assert_eq!(target_from_href("#about"), Some("about"));
        assert_eq!(target_from_href("https://example.com"), None);
        assert_eq!(target_from_href(""), None);
        assert_eq!(id_from_hash("#gallery"), Some("gallery"));
        assert_eq!(id_from_hash("#"), None);
        assert_eq!(id_from_hash(""), None);
    }
}
