//! Candidate descriptors and discovery-time sorting.

use lazyfold_core::{PositionProvider, TreeHost};

/// One discovered lazy-load candidate.
///
/// Holds a weak handle to the element and the resource reference captured
/// from the marker attribute at discovery time. The reference is immutable
/// once captured; it is copied into the active attribute exactly once.
pub struct ImageDescriptor<H: TreeHost> {
    element: H::WeakElement,
    pending_source: String,
}

impl<H: TreeHost> ImageDescriptor<H> {
    pub(crate) fn new(element: H::WeakElement, pending_source: String) -> Self {
        Self {
            element,
            pending_source,
        }
    }

    pub fn element(&self) -> &H::WeakElement {
        &self.element
    }

    pub fn pending_source(&self) -> &str {
        &self.pending_source
    }
}

/// Enumerates the scope's candidates and returns them sorted ascending by
/// their vertical offset at discovery time.
///
/// Offsets live only in the sort table built here and are dropped with it.
/// They are measurements of a layout that may shift later; the scan always
/// re-measures through the position provider.
pub(crate) fn discover_sorted<H: TreeHost>(
    host: &H,
    positions: &dyn PositionProvider<H::Element>,
    scope: &H::Element,
) -> Vec<ImageDescriptor<H>> {
    let mut table: Vec<(f32, ImageDescriptor<H>)> = host
        .lazy_candidates(scope)
        .into_iter()
        .map(|(element, source)| {
            let offset = positions.vertical_offset(&element);
            (offset, ImageDescriptor::new(host.downgrade(&element), source))
        })
        .collect();
    sort_by_offset(&mut table);
    table.into_iter().map(|(_, descriptor)| descriptor).collect()
}

/// Stable ascending sort: candidates at equal offsets keep discovery order.
fn sort_by_offset<T>(table: &mut [(f32, T)]) {
    table.sort_by(|a, b| a.0.total_cmp(&b.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_ascending() {
        let mut table = vec![(900.0, "c"), (50.0, "a"), (600.0, "b")];
        sort_by_offset(&mut table);
        let order: Vec<&str> = table.into_iter().map(|(_, v)| v).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let mut table = vec![(400.0, "first"), (100.0, "x"), (400.0, "second")];
        sort_by_offset(&mut table);
        let order: Vec<&str> = table.into_iter().map(|(_, v)| v).collect();
        assert_eq!(order, ["x", "first", "second"]);
    }
}
