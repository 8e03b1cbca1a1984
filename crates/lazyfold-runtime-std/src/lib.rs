//! Reference host runtime for Lazyfold.
//!
//! Provides an in-memory retained element tree plus std-backed
//! implementations of the host collaborator traits: [`Document`] as the
//! [`TreeHost`](lazyfold_core::TreeHost), [`EventHub`] as the
//! [`EventBridge`](lazyfold_core::EventBridge), and [`WindowMetrics`] over a
//! simulated [`Window`] as the
//! [`PositionProvider`](lazyfold_core::PositionProvider).

mod document;
mod events;
mod metrics;

pub use document::{Document, Element, WeakElement, ACTIVE_SOURCE_ATTR, LAZY_SOURCE_ATTR};
pub use events::EventHub;
pub use metrics::{Window, WindowMetrics};
