//! Event hub: the std-backed event bridge.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use lazyfold_core::{EventBridge, EventHandler, EventKind};

type HandlerList = SmallVec<[EventHandler; 4]>;

/// Dispatches scroll, resize, and load notifications to subscribed
/// handlers.
///
/// Handlers are matched by pointer identity on unsubscription. Dispatch
/// iterates over a snapshot of the subscriber list, so a handler may
/// unsubscribe itself (or others) while it runs; removals take effect on the
/// next emit.
#[derive(Default)]
pub struct EventHub {
    handlers: RefCell<FxHashMap<EventKind, HandlerList>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every handler currently subscribed for `kind`.
    pub fn emit(&self, kind: EventKind) {
        let snapshot: HandlerList = self
            .handlers
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        for handler in &snapshot {
            handler();
        }
    }

    /// Number of live subscriptions for `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .borrow()
            .get(&kind)
            .map(|list| list.len())
            .unwrap_or(0)
    }
}

impl EventBridge for EventHub {
    fn subscribe(&self, kind: EventKind, handler: &EventHandler) {
        self.handlers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Rc::clone(handler));
    }

    fn unsubscribe(&self, kind: EventKind, handler: &EventHandler) {
        if let Some(list) = self.handlers.borrow_mut().get_mut(&kind) {
            list.retain(|subscribed| !Rc::ptr_eq(subscribed, handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_handler(count: &Rc<Cell<usize>>) -> EventHandler {
        let count = Rc::clone(count);
        Rc::new(move || count.set(count.get() + 1))
    }

    #[test]
    fn test_emit_reaches_subscribed_kind_only() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        let handler = counting_handler(&count);

        hub.subscribe(EventKind::Scroll, &handler);
        hub.emit(EventKind::Scroll);
        hub.emit(EventKind::Resize);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_matches_by_identity() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        let first = counting_handler(&count);
        let second = counting_handler(&count);

        hub.subscribe(EventKind::Scroll, &first);
        hub.subscribe(EventKind::Scroll, &second);
        hub.unsubscribe(EventKind::Scroll, &first);
        hub.emit(EventKind::Scroll);

        assert_eq!(count.get(), 1);
        assert_eq!(hub.handler_count(EventKind::Scroll), 1);
    }

    #[test]
    fn test_handler_can_unsubscribe_itself_mid_dispatch() {
        let hub = Rc::new(EventHub::new());
        let count = Rc::new(Cell::new(0));

        let slot: Rc<RefCell<Option<EventHandler>>> = Rc::new(RefCell::new(None));
        let once: EventHandler = {
            let hub = Rc::clone(&hub);
            let count = Rc::clone(&count);
            let slot = Rc::clone(&slot);
            Rc::new(move || {
                count.set(count.get() + 1);
                if let Some(own) = slot.borrow().as_ref() {
                    hub.unsubscribe(EventKind::Scroll, own);
                }
            })
        };
        *slot.borrow_mut() = Some(Rc::clone(&once));

        hub.subscribe(EventKind::Scroll, &once);
        hub.emit(EventKind::Scroll);
        hub.emit(EventKind::Scroll);

        assert_eq!(count.get(), 1);
        assert_eq!(hub.handler_count(EventKind::Scroll), 0);
    }
}
