//! Collaborator bundle handed to the loader at construction time.

use std::rc::Rc;

use crate::host::TreeHost;
use crate::platform::{EventBridge, PositionProvider};

/// The three host collaborators, selected at the composition root.
///
/// Cloning is cheap; clones share the same underlying collaborators.
pub struct Environment<H: TreeHost> {
    host: Rc<H>,
    positions: Rc<dyn PositionProvider<H::Element>>,
    events: Rc<dyn EventBridge>,
}

impl<H: TreeHost> Environment<H> {
    pub fn new(
        host: Rc<H>,
        positions: Rc<dyn PositionProvider<H::Element>>,
        events: Rc<dyn EventBridge>,
    ) -> Self {
        Self {
            host,
            positions,
            events,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn positions(&self) -> &dyn PositionProvider<H::Element> {
        self.positions.as_ref()
    }

    pub fn events(&self) -> &dyn EventBridge {
        self.events.as_ref()
    }
}

// Manual impl: `derive(Clone)` would demand `H: Clone`, which the `Rc`
// fields do not need.
impl<H: TreeHost> Clone for Environment<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            positions: Rc::clone(&self.positions),
            events: Rc::clone(&self.events),
        }
    }
}
