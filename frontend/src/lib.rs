pub mod analytics;
pub mod app;
pub mod config;
pub mod contact;
pub mod content;
pub mod dom;
pub mod lightbox;
pub mod nav;
pub mod router;
pub mod scroll_spy;
pub mod pages {
    pub mod home;
}

pub use app::{App, AppProps};
