//! Folio Motion App
//!
//! Wires every behavior onto the page. A behavior whose elements are
//! missing, or that fails to bind, is skipped; the rest still run.

use std::rc::Rc;

use crate::components::{backdrop, contact, faq, nav_spy, reveal, work_tabs};
use crate::config::PageConfig;
use crate::context::PageContext;
use crate::dom::{self, WebViewport};
use crate::error::PageError;
use crate::motion::{Motion, TweenScheduler};
use crate::raf;

fn report(behavior: &str, result: Result<(), PageError>) {
    if let Err(e) = result {
        tracing::warn!("{behavior} skipped: {e}");
    }
}

pub fn init_page(config: &PageConfig) -> Result<(), PageError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    let motion = Motion::new();
    raf::start_ticker(&window, motion.clone())?;
    let scheduler: Rc<dyn TweenScheduler> = Rc::new(motion);

    let ctx = PageContext::new();
    let viewport = Rc::new(WebViewport::new(window.clone()));

    report("backdrop", backdrop::wire(&document, &scheduler, &config.backdrop));
    report("scroll-spy", nav_spy::wire(&document, viewport, &scheduler, ctx, config));
    report("work tabs", work_tabs::wire(&document, &window, &scheduler, ctx, config));
    report("faq", faq::wire(&document, ctx));
    report("contact", contact::wire(&document, &window, config));
    report("scroll reveal", reveal::wire(&document, &config.reveal));

    tracing::info!("page wired");
    Ok(())
}
