//! Lazy-loading foundation for Lazyfold.

pub mod lazy;

pub use lazy::{
    ImageDescriptor, InstanceRegistry, LazyLoader, ScopeIdentity, ScopeTarget,
    DEFAULT_PREFETCH_MARGIN,
};
