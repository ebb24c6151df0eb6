use std::rc::Rc;

use brochure::config;
use brochure::content::SiteContent;
use brochure::{App, AppProps};
use log::info;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    let content = SiteContent::bundled().expect("bundled site content is malformed");
    info!("Starting {}", content.brand);
    yew::Renderer::<App>::with_props(AppProps {
        content: Rc::new(content),
    })
    .render();
}
