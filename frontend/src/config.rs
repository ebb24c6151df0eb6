use log::Level;

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug // Chatty console while developing locally
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}

/// Delay before honouring a hash present at load, lets the sections mount first.
pub const HASH_SETTLE_DELAY_MS: u32 = 50;

/// How long the contact form confirmation stays on screen.
pub const FORM_MESSAGE_LIFETIME_MS: u32 = 6_000;

pub const SCROLL_SPY_THRESHOLD: f64 = 0.45;

/// Used when `--nav-height` is unset or unreadable.
pub const DEFAULT_NAV_HEIGHT_PX: i32 = 70;

pub const SCROLL_SPY_BOTTOM_MARGIN_PX: i32 = 40;

pub const NAV_HEIGHT_PROPERTY: &str = "--nav-height";
