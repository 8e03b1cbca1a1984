//! In-memory retained element tree.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use lazyfold_core::TreeHost;

/// Marker attribute carrying a pending resource reference. Any element
/// bearing it is a lazy-load candidate.
pub const LAZY_SOURCE_ATTR: &str = "data-src";

/// Active resource attribute. Writing it triggers the host's normal fetch.
pub const ACTIVE_SOURCE_ATTR: &str = "src";

struct NodeData {
    id: Option<String>,
    attributes: FxHashMap<String, String>,
    /// Absolute distance from the top of the document to this element's top
    /// edge. Assigned by whoever lays the page out.
    top: f32,
    children: Vec<Element>,
    parent: Option<WeakElement>,
}

/// Owning handle to a node. Cloning shares the node.
#[derive(Clone)]
pub struct Element {
    node: Rc<RefCell<NodeData>>,
}

/// Non-owning handle to a node.
#[derive(Clone)]
pub struct WeakElement {
    node: Weak<RefCell<NodeData>>,
}

impl Element {
    pub fn new() -> Self {
        Self {
            node: Rc::new(RefCell::new(NodeData {
                id: None,
                attributes: FxHashMap::default(),
                top: 0.0,
                children: Vec::new(),
                parent: None,
            })),
        }
    }

    pub fn with_id(id: &str) -> Self {
        let element = Self::new();
        element.node.borrow_mut().id = Some(id.to_owned());
        element
    }

    pub fn id(&self) -> Option<String> {
        self.node.borrow().id.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn top(&self) -> f32 {
        self.node.borrow().top
    }

    pub fn set_top(&self, top: f32) {
        self.node.borrow_mut().top = top;
    }

    pub fn append_child(&self, child: &Element) {
        child.node.borrow_mut().parent = Some(self.downgrade());
        self.node.borrow_mut().children.push(child.clone());
    }

    /// Removes this element from its parent's children. The node dies once
    /// the last owning handle is dropped.
    pub fn detach(&self) {
        let parent = self.node.borrow_mut().parent.take();
        if let Some(parent) = parent.and_then(|weak| weak.upgrade()) {
            parent
                .node
                .borrow_mut()
                .children
                .retain(|child| !child.ptr_eq(self));
        }
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            node: Rc::downgrade(&self.node),
        }
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Depth-first walk over descendants in document order, excluding
    /// `self`.
    fn for_each_descendant(&self, visit: &mut dyn FnMut(&Element)) {
        let children = self.node.borrow().children.clone();
        for child in &children {
            visit(child);
            child.for_each_descendant(visit);
        }
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.node.upgrade().map(|node| Element { node })
    }
}

/// A whole document: the root element plus tree-wide lookups.
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Element::new(),
        }
    }

    pub fn root(&self) -> Element {
        self.root.clone()
    }

    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        let mut found = None;
        self.root.for_each_descendant(&mut |element| {
            if found.is_none() && element.id().as_deref() == Some(id) {
                found = Some(element.clone());
            }
        });
        found
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHost for Document {
    type Element = Element;
    type WeakElement = WeakElement;

    fn downgrade(&self, element: &Element) -> WeakElement {
        element.downgrade()
    }

    fn upgrade(&self, weak: &WeakElement) -> Option<Element> {
        weak.upgrade()
    }

    fn element_id(&self, element: &Element) -> Option<String> {
        element.id()
    }

    fn document_scope(&self) -> Element {
        self.root()
    }

    fn resolve_id(&self, id: &str) -> Option<Element> {
        self.element_by_id(id)
    }

    fn lazy_candidates(&self, scope: &Element) -> Vec<(Element, String)> {
        let mut candidates = Vec::new();
        scope.for_each_descendant(&mut |element| {
            if let Some(source) = element.attribute(LAZY_SOURCE_ATTR) {
                candidates.push((element.clone(), source));
            }
        });
        candidates
    }

    fn activate(&self, element: &Element, source: &str) {
        element.set_attribute(ACTIVE_SOURCE_ATTR, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate_sources(document: &Document, scope: &Element) -> Vec<String> {
        document
            .lazy_candidates(scope)
            .into_iter()
            .map(|(_, source)| source)
            .collect()
    }

    #[test]
    fn test_candidates_in_document_order() {
        let document = Document::new();
        let section = Element::with_id("gallery");
        document.root().append_child(&section);

        for name in ["a.png", "b.png", "c.png"] {
            let image = Element::new();
            image.set_attribute(LAZY_SOURCE_ATTR, name);
            section.append_child(&image);
        }
        // Unmarked elements are not candidates.
        section.append_child(&Element::new());

        assert_eq!(
            candidate_sources(&document, &document.root()),
            ["a.png", "b.png", "c.png"]
        );
    }

    #[test]
    fn test_candidates_scoped_to_subtree() {
        let document = Document::new();
        let inside = Element::with_id("inside");
        let outside = Element::with_id("outside");
        document.root().append_child(&inside);
        document.root().append_child(&outside);

        let image = Element::new();
        image.set_attribute(LAZY_SOURCE_ATTR, "in.png");
        inside.append_child(&image);
        let other = Element::new();
        other.set_attribute(LAZY_SOURCE_ATTR, "out.png");
        outside.append_child(&other);

        assert_eq!(candidate_sources(&document, &inside), ["in.png"]);
    }

    #[test]
    fn test_element_by_id_finds_nested() {
        let document = Document::new();
        let outer = Element::with_id("outer");
        let inner = Element::with_id("inner");
        document.root().append_child(&outer);
        outer.append_child(&inner);

        assert!(document.element_by_id("inner").unwrap().ptr_eq(&inner));
        assert!(document.element_by_id("missing").is_none());
    }

    #[test]
    fn test_detached_element_dies() {
        let document = Document::new();
        let image = Element::new();
        document.root().append_child(&image);

        let weak = image.downgrade();
        image.detach();
        drop(image);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_activation_copies_source() {
        let document = Document::new();
        let image = Element::new();
        image.set_attribute(LAZY_SOURCE_ATTR, "photo.jpg");
        document.root().append_child(&image);

        document.activate(&image, "photo.jpg");

        assert_eq!(image.attribute(ACTIVE_SOURCE_ATTR).as_deref(), Some("photo.jpg"));
        // The marker stays; activation only writes the active attribute.
        assert_eq!(image.attribute(LAZY_SOURCE_ATTR).as_deref(), Some("photo.jpg"));
    }
}
