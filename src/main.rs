//! Folio Motion Entry Point
//!
//! Adds motion and interaction to a static portfolio page: the gradient
//! backdrop, nav scroll-spy, draggable work filter tabs, the FAQ accordion,
//! scroll reveal and the contact action.

mod app;
mod components;
mod config;
mod context;
mod dom;
mod error;
mod filter;
mod logging;
mod motion;
mod observer;
mod raf;
#[cfg(test)]
mod testing;

use config::PageConfig;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match PageConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (PageConfig::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!("{e}; using defaults");
    }

    if let Err(e) = app::init_page(&config) {
        tracing::error!("page behaviors not started: {e}");
    }
}
