use std::collections::BTreeMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::js_sys::{self, Array};
use web_sys::{FormData, HtmlFormElement, MouseEvent, SubmitEvent};
use yew::prelude::*;

use crate::analytics::{track_event, AnalyticsEvent};
use crate::config::FORM_MESSAGE_LIFETIME_MS;
use crate::content::ContactInfo;

pub const CONFIRMATION: &str =
    "Thank you — your message has been received. We will contact you soon.";

#[derive(Clone, Debug, PartialEq)]
pub struct FormMessage {
    pub text: String,
    pub success: bool,
}

/// Confirmation banner, tagged with the submission that raised it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactState {
    message: Option<FormMessage>,
    token: u64,
}

pub enum ContactAction {
    Submitted(u64),
    /// Fired by the clear timer; ignored unless it belongs to the latest submission.
    Expire(u64),
}

impl ContactState {
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn apply(&mut self, action: ContactAction) {
        match action {
            ContactAction::Submitted(token) => {
                self.token = token;
                self.message = Some(FormMessage {
                    text: CONFIRMATION.to_string(),
                    success: true,
                });
            }
            ContactAction::Expire(token) => {
                if token == self.token {
                    self.message = None;
                } else {
                    debug!("Stale message timer {} (current {})", token, self.token);
                }
            }
        }
    }
}

impl Reducible for ContactState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub fn contact_submit_event(fields: &BTreeMap<String, String>) -> AnalyticsEvent {
    let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
    AnalyticsEvent::ContactSubmit {
        name: field("name"),
        email: field("email"),
    }
}

/// Every string-valued field of the form; file inputs are skipped.
pub fn collect_fields(form: &HtmlFormElement) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let Ok(data) = FormData::new_with_form(form) else {
        return fields;
    };
    if let Ok(Some(entries)) = js_sys::try_iter(&data) {
        for entry in entries.flatten() {
            let pair = Array::from(&entry);
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.insert(key, value);
            }
        }
    }
    fields
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let state = use_reducer(ContactState::default);
    let submissions = use_mut_ref(|| 0u64);
    let form_ref = use_node_ref();

    let onsubmit = {
        let state = state.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };

            let fields = collect_fields(&form);
            track_event(&contact_submit_event(&fields));

            let token = {
                let mut counter = submissions.borrow_mut();
                *counter += 1;
                *counter
            };
            debug!("Contact form submitted ({} fields, token {})", fields.len(), token);
            state.dispatch(ContactAction::Submitted(token));
            form.reset();

            let state = state.clone();
            Timeout::new(FORM_MESSAGE_LIFETIME_MS, move || {
                state.dispatch(ContactAction::Expire(token));
            })
            .forget();
        })
    };

    let (text, success) = match state.message() {
        Some(message) => (message.text.clone(), message.success),
        None => (String::new(), false),
    };

    html! {
        <form id="contact-form" class="contact-form" ref={form_ref} {onsubmit}>
            <label for="contact-name">{"Name"}</label>
            <input id="contact-name" type="text" name="name" required=true />
            <label for="contact-email">{"Email"}</label>
            <input id="contact-email" type="email" name="email" required=true />
            <label for="contact-phone">{"Phone (optional)"}</label>
            <input id="contact-phone" type="tel" name="phone" />
            <label for="contact-message">{"Message"}</label>
            <textarea id="contact-message" name="message" rows="5"></textarea>
            <button type="submit" class="submit-btn">{"Send message"}</button>
            <p id="form-message"
               class={classes!("form-message", success.then_some("success"))}
               role="status"
               aria-live="polite">
                {text}
            </p>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactChannelsProps {
    pub contact: ContactInfo,
}

/// Phone, WhatsApp and email links; the first two report clicks.
#[function_component(ContactChannels)]
pub fn contact_channels(props: &ContactChannelsProps) -> Html {
    let contact = &props.contact;
    let on_phone = Callback::from(|_: MouseEvent| track_event(&AnalyticsEvent::PhoneClick));
    let on_whatsapp = Callback::from(|_: MouseEvent| track_event(&AnalyticsEvent::WhatsappClick));

    html! {
        <ul class="contact-channels">
            <li>
                <a id="phone-link" href={contact.phone_href()} onclick={on_phone}>
                    {&contact.phone}
                </a>
            </li>
            <li>
                <a id="whatsapp-link"
                   href={contact.whatsapp_href()}
                   target="_blank"
                   rel="noopener noreferrer"
                   onclick={on_whatsapp}>
                    {"WhatsApp"}
                </a>
            </li>
            <li>
                <a href={format!("mailto:{}", contact.email)}>{&contact.email}</a>
            </li>
            {
                if contact.address.is_empty() {
                    html! {}
                } else {
                    html! { <li class="contact-address">{&contact.address}</li> }
                }
            }
        </ul>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn submission_shows_confirmation() {
        let mut state = ContactState::default();
        state.apply(ContactAction::Submitted(1));
        let message = state.message().unwrap();
        assert_eq!(message.text, CONFIRMATION);
        assert!(message.success);
    }

    #[test]
    fn timer_clears_its_own_message() {
        let mut state = ContactState::default();
        state.apply(ContactAction::Submitted(1));
        state.apply(ContactAction::Expire(1));
        assert_eq!(state.message(), None);
    }

    #[test]
    fn stale_timer_leaves_newer_message() {
        let mut state = ContactState::default();
        state.apply(ContactAction::Submitted(1));
        state.apply(ContactAction::Submitted(2));
        state.apply(ContactAction::Expire(1));
        assert!(state.message().is_some());

        state.apply(ContactAction::Expire(2));
        assert!(state.message().is_none());
    }

    #[test]
    fn submit_event_defaults_missing_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "ada@example.com".to_string());
        fields.insert("message".to_string(), "Hello".to_string());
        assert_eq!(
            contact_submit_event(&fields),
            AnalyticsEvent::ContactSubmit {
                name: String::new(),
                email: "ada@example.com".into(),
            }
        );
    }
}
