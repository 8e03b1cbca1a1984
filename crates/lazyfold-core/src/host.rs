//! Element-tree host abstraction.

/// Provides all the needed info about the host's element tree: scope
/// resolution, candidate discovery, and activation.
///
/// Elements are cheap cloneable handles. The loader never keeps a candidate
/// alive on its own; it holds the weak counterpart and upgrades it at the
/// moment it needs to measure or activate.
pub trait TreeHost {
    /// Owning handle to an element in the tree.
    type Element: Clone + 'static;

    /// Non-owning counterpart of [`Self::Element`].
    type WeakElement: Clone + 'static;

    /// Downgrades an element handle to its weak counterpart.
    fn downgrade(&self, element: &Self::Element) -> Self::WeakElement;

    /// Upgrades a weak handle, returning `None` if the element has been
    /// dropped from the tree.
    fn upgrade(&self, weak: &Self::WeakElement) -> Option<Self::Element>;

    /// The element's id, if it carries one.
    fn element_id(&self, element: &Self::Element) -> Option<String>;

    /// The whole-document scope root.
    fn document_scope(&self) -> Self::Element;

    /// Looks an element up by id anywhere in the document.
    fn resolve_id(&self, id: &str) -> Option<Self::Element>;

    /// Enumerates descendants of `scope` that carry the lazy marker
    /// attribute, in document order, paired with the marker value.
    ///
    /// The marker value is read exactly once, here; the loader captures it
    /// and never re-reads the attribute.
    fn lazy_candidates(&self, scope: &Self::Element) -> Vec<(Self::Element, String)>;

    /// Copies `source` into the element's active resource attribute.
    ///
    /// Whatever fetch the host performs in response is its own business.
    fn activate(&self, element: &Self::Element, source: &str);
}
