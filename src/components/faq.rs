//! FAQ Accordion
//!
//! At most one answer is open. The `open` class is projected onto both the
//! answer and the question's icon.

use std::rc::Rc;

use web_sys::Document;

use crate::context::PageContext;
use crate::dom::{listen, query_all, UiElement};
use crate::error::PageError;

const OPEN: &str = "open";

pub struct FaqItem<E> {
    pub answer: Option<Rc<E>>,
    pub icon: Option<Rc<E>>,
}

impl<E: UiElement> FaqItem<E> {
    fn set_open(&self, open: bool) {
        for part in [&self.answer, &self.icon].into_iter().flatten() {
            part.set_class(OPEN, open);
        }
    }
}

pub struct Accordion<E> {
    items: Vec<FaqItem<E>>,
    ctx: PageContext,
}

impl<E: UiElement> Accordion<E> {
    pub fn new(items: Vec<FaqItem<E>>, ctx: PageContext) -> Self {
        Self { items, ctx }
    }

    /// Question `index` was clicked
    pub fn toggle(&self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let open = self.ctx.toggle_faq(index);
        for (i, item) in self.items.iter().enumerate() {
            item.set_open(open == Some(i));
        }
    }
}

pub fn wire(document: &Document, ctx: PageContext) -> Result<(), PageError> {
    let mut items = Vec::new();
    let mut questions = Vec::new();
    for el in query_all(document, ".faq-item")? {
        let index = items.len();
        items.push(FaqItem {
            answer: el.query(".faq-answer"),
            icon: el.query(".faq-icon"),
        });
        match el.query(".faq-question") {
            Some(q) => questions.push((index, q)),
            None => tracing::debug!(index, "faq item without a question"),
        }
    }
    if items.is_empty() {
        return Ok(());
    }

    let accordion = Rc::new(Accordion::new(items, ctx));
    for (index, question) in &questions {
        let accordion = accordion.clone();
        let index = *index;
        listen(question.html(), "click", move |_| accordion.toggle(index))?;
    }
    tracing::debug!(questions = questions.len(), "faq wired");
    Ok(())
}
