//! Platform abstraction traits for host environment services.
//!
//! These traits let the loader delegate measurement and event registration to
//! the host environment, enabling integration with different environments
//! without depending on any particular windowing or document API. Everything
//! here is single-threaded: handlers are `Rc`-backed closures dispatched
//! synchronously by the host.

use std::rc::Rc;

/// Kinds of host notifications the loader cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The scroll position of the viewport changed.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// The host environment finished its initial load.
    Load,
}

/// A subscription callback.
///
/// Handlers are compared by pointer identity: the same `Rc` that was passed
/// to [`EventBridge::subscribe`] must be passed to
/// [`EventBridge::unsubscribe`] to remove it.
pub type EventHandler = Rc<dyn Fn()>;

/// Subscribes and unsubscribes callbacks to host notifications.
///
/// Abstracts whichever native event-registration mechanism the host offers.
/// Implementations must tolerate a handler unsubscribing itself from within
/// its own dispatch: a loader removes its scroll subscription inside the
/// scroll callback that completes its work.
pub trait EventBridge {
    /// Registers `handler` for notifications of `kind`.
    fn subscribe(&self, kind: EventKind, handler: &EventHandler);

    /// Removes a previously registered handler, matched by pointer identity.
    ///
    /// Unknown handlers are ignored.
    fn unsubscribe(&self, kind: EventKind, handler: &EventHandler);
}

/// Reports element positions and the current viewport height.
///
/// Offsets are measured relative to the current scroll origin, so an
/// element's reported offset shrinks as the user scrolls toward it. An
/// implementation over an unmeasurable viewport may adopt the
/// "assume everything is visible" policy by reporting an infinite height;
/// the loader then treats every candidate as near enough to load.
pub trait PositionProvider<E> {
    /// Distance from the top of the viewport to the element's top edge.
    fn vertical_offset(&self, element: &E) -> f32;

    /// Height of the viewport, recomputed by the host whenever a resize
    /// notification fires.
    fn viewport_height(&self) -> f32;
}
