//! Scope identities and construction targets.

use std::fmt;

use lazyfold_core::TreeHost;

/// Stable key used to deduplicate loader instances per scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeIdentity {
    /// The whole document.
    Document,
    /// A container element, keyed by its id.
    Id(String),
    /// A container element that carries no id.
    ///
    /// Every id-less scope maps to this one key, so a second id-less request
    /// returns the instance created by the first.
    Unidentified,
}

impl fmt::Display for ScopeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeIdentity::Document => f.write_str("$document"),
            ScopeIdentity::Id(id) => f.write_str(id),
            ScopeIdentity::Unidentified => f.write_str("$undefined"),
        }
    }
}

/// What a loader should cover: the whole document, an element looked up by
/// id, or an element handle supplied directly.
///
/// An id target does not have to exist in the tree yet; resolution is
/// retried on every scan until it succeeds.
#[derive(Clone, Debug, Default)]
pub enum ScopeTarget<E> {
    #[default]
    Document,
    Id(String),
    Element(E),
}

impl<E> ScopeTarget<E> {
    /// Splits the target into its registry identity and, when already
    /// available, the resolved scope element.
    pub(crate) fn resolve<H>(self, host: &H) -> (ScopeIdentity, Option<E>)
    where
        H: TreeHost<Element = E>,
    {
        match self {
            ScopeTarget::Document => (ScopeIdentity::Document, Some(host.document_scope())),
            ScopeTarget::Id(id) => {
                let element = host.resolve_id(&id);
                (ScopeIdentity::Id(id), element)
            }
            ScopeTarget::Element(element) => match host.element_id(&element) {
                Some(id) => (ScopeIdentity::Id(id), Some(element)),
                None => (ScopeIdentity::Unidentified, Some(element)),
            },
        }
    }
}

impl<E> From<&str> for ScopeTarget<E> {
    fn from(id: &str) -> Self {
        ScopeTarget::Id(id.to_owned())
    }
}

impl<E> From<String> for ScopeTarget<E> {
    fn from(id: String) -> Self {
        ScopeTarget::Id(id)
    }
}
