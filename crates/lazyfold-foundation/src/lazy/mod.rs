//! Lazy below-the-fold resource loading.
//!
//! Elements below the fold keep their resource reference in a marker
//! attribute until scrolling brings them within a prefetch margin of the
//! viewport, at which point the reference is copied into the active
//! attribute and the host's normal fetch takes over.
//!
//! # Architecture
//!
//! - [`ImageDescriptor`] - one discovered candidate plus its captured
//!   pending resource reference
//! - [`LazyLoader`] - per-scope instance owning the sorted candidate list,
//!   the forward cursor, and the scan algorithm
//! - [`InstanceRegistry`] - construct-or-fetch map guaranteeing at most one
//!   loader per scope identity
//!
//! The scan is the only interesting part: candidates are sorted once by
//! vertical position and a cursor only ever moves forward, so however many
//! scroll notifications fire, each candidate is threshold-tested a constant
//! number of times across the instance's whole life. Total work is linear in
//! the number of candidates, not candidates times scroll events.

mod descriptor;
mod loader;
mod registry;
mod scope;

pub use descriptor::ImageDescriptor;
pub use loader::{LazyLoader, DEFAULT_PREFETCH_MARGIN};
pub use registry::InstanceRegistry;
pub use scope::{ScopeIdentity, ScopeTarget};
