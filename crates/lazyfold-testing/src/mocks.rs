//! Instrumented collaborator implementations.

use std::cell::RefCell;

use lazyfold_core::TreeHost;
use lazyfold_runtime_std::{Document, Element, WeakElement};

/// A [`TreeHost`] that delegates to a [`Document`] and records every
/// activation, so tests can assert on activation order — something the
/// attributes alone cannot show.
pub struct RecordingHost {
    document: Document,
    activations: RefCell<Vec<String>>,
}

impl RecordingHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            activations: RefCell::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Activated sources, in activation order.
    pub fn activations(&self) -> Vec<String> {
        self.activations.borrow().clone()
    }
}

impl TreeHost for RecordingHost {
    type Element = Element;
    type WeakElement = WeakElement;

    fn downgrade(&self, element: &Element) -> WeakElement {
        self.document.downgrade(element)
    }

    fn upgrade(&self, weak: &WeakElement) -> Option<Element> {
        self.document.upgrade(weak)
    }

    fn element_id(&self, element: &Element) -> Option<String> {
        self.document.element_id(element)
    }

    fn document_scope(&self) -> Element {
        self.document.document_scope()
    }

    fn resolve_id(&self, id: &str) -> Option<Element> {
        self.document.resolve_id(id)
    }

    fn lazy_candidates(&self, scope: &Element) -> Vec<(Element, String)> {
        self.document.lazy_candidates(scope)
    }

    fn activate(&self, element: &Element, source: &str) {
        self.activations.borrow_mut().push(source.to_owned());
        self.document.activate(element, source);
    }
}
