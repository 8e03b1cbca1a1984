//! Core abstractions for Lazyfold.
//!
//! This crate defines the seams between the lazy-loading machinery and the
//! host environment: the element tree ([`TreeHost`]), position measurement
//! ([`PositionProvider`]), and event subscription ([`EventBridge`]).
//! Implementations are selected once, at the composition root, and handed to
//! the loader bundled in an [`Environment`].

mod environment;
mod host;
mod platform;

pub use environment::Environment;
pub use host::TreeHost;
pub use platform::{EventBridge, EventHandler, EventKind, PositionProvider};
