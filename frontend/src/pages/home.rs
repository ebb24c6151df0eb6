use std::rc::Rc;

use chrono::{Datelike, Local};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::analytics::AnalyticsEvent;
use crate::contact::{ContactChannels, ContactForm};
use crate::content::{detail_section_id, Product, SiteContent};
use crate::lightbox::Gallery;
use crate::router::{show_section, PageHandle};

#[derive(Properties, PartialEq)]
struct SectionProps {
    id: AttrValue,
    #[prop_or_default]
    class: Classes,
    children: Children,
}

/// A page region; `active` while the router or scroll-spy has it revealed.
#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    let page = use_context::<PageHandle>();
    let revealed = page.map_or(false, |page| page.is_revealed(&props.id));

    html! {
        <section id={props.id.clone()}
                 class={classes!("section", props.class.clone(), revealed.then_some("active"))}>
            { for props.children.iter() }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProductCardProps {
    product: Product,
}

#[function_component(ProductCard)]
fn product_card(props: &ProductCardProps) -> Html {
    let page = use_context::<PageHandle>();
    let product = &props.product;

    let view_details = {
        let slug = product.slug.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = &page {
                let follow_up = AnalyticsEvent::ProductView {
                    product: slug.clone(),
                };
                show_section(page, &detail_section_id(&slug), Some(follow_up));
            }
        })
    };

    html! {
        <div class="product-card">
            <img src={product.image.clone()} alt={product.name.clone()} loading="lazy" />
            <h3>{&product.name}</h3>
            <p>{&product.summary}</p>
            <button class="view-details-btn" data-product={product.slug.clone()} onclick={view_details}>
                {"View details"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BackButtonProps {
    to: AttrValue,
}

#[function_component(BackButton)]
fn back_button(props: &BackButtonProps) -> Html {
    let page = use_context::<PageHandle>();
    let onclick = {
        let to = props.to.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = &page {
                show_section(page, &to, None);
            }
        })
    };

    html! {
        <button class="back-btn" data-back={props.to.clone()} {onclick}>
            {"← Back"}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub content: Rc<SiteContent>,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let content = &props.content;
    let year = Local::now().year();

    html! {
        <main class="brochure">
            <Section id="home" class={classes!("hero")}>
                <div class="hero-content">
                    <h1>{&content.brand}</h1>
                    <p class="hero-subtitle">{&content.tagline}</p>
                    <a href="#products" class="hero-cta">{"See what we make"}</a>
                </div>
            </Section>

            <Section id="products">
                <h2>{"Products"}</h2>
                <div class="product-grid">
                    { for content.products.iter().map(|product| html! {
                        <ProductCard product={product.clone()} />
                    }) }
                </div>
            </Section>

            { for content.products.iter().map(|product| html! {
                <Section id={product.detail_section_id()} class={classes!("product-details")}>
                    <BackButton to="products" />
                    <h2>{&product.name}</h2>
                    <img src={product.image.clone()} alt={product.name.clone()} loading="lazy" />
                    <p>{&product.summary}</p>
                    <ul class="detail-list">
                        { for product.details.iter().map(|line| html! { <li>{line}</li> }) }
                    </ul>
                </Section>
            }) }

            <Section id="about">
                <h2>{"About us"}</h2>
                { for content.about.iter().map(|paragraph| html! { <p>{paragraph}</p> }) }
            </Section>

            <Section id="gallery">
                <h2>{"Gallery"}</h2>
                <Gallery images={content.gallery.clone()} />
            </Section>

            <Section id="contact">
                <h2>{"Contact"}</h2>
                <div class="contact-layout">
                    <ContactChannels contact={content.contact.clone()} />
                    <ContactForm />
                </div>
            </Section>

            <footer class="site-footer">
                <p>{"© "}<span id="year">{year.to_string()}</span>{" "}{&content.brand}</p>
            </footer>
        </main>
    }
}
