//! The console feature: a signal-backed [`ConsoleStore`], the context that
//! hands it to routes, and the banners with their expiry timers.
//!
//! [`ConsoleStore`]: user_api::console::ConsoleStore

mod notices;
mod store;

pub(crate) use notices::NoticeBanners;
pub(crate) use store::{use_console, ConsoleProvider};
