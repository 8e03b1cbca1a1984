//! Viewport measurement over a simulated window.

use std::cell::Cell;
use std::rc::Rc;

use lazyfold_core::PositionProvider;

use crate::document::Element;

/// The simulated host window: a viewport height (when measurable) and the
/// current scroll position.
pub struct Window {
    inner_height: Cell<Option<f32>>,
    scroll_y: Cell<f32>,
}

impl Window {
    pub fn new(inner_height: f32) -> Self {
        Self {
            inner_height: Cell::new(Some(inner_height)),
            scroll_y: Cell::new(0.0),
        }
    }

    /// A window whose height cannot be measured. Metrics built over it adopt
    /// the assume-everything-visible policy.
    pub fn unmeasurable() -> Self {
        Self {
            inner_height: Cell::new(None),
            scroll_y: Cell::new(0.0),
        }
    }

    pub fn inner_height(&self) -> Option<f32> {
        self.inner_height.get()
    }

    pub fn set_inner_height(&self, height: f32) {
        self.inner_height.set(Some(height));
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.get()
    }

    pub fn scroll_to(&self, y: f32) {
        self.scroll_y.set(y);
    }
}

/// Position provider backed by a [`Window`].
///
/// The viewport height is read from the window once and cached; the
/// composition root wires [`Self::refresh_viewport_height`] to resize
/// notifications. Offsets are viewport-relative: absolute element top minus
/// the current scroll position.
pub struct WindowMetrics {
    window: Rc<Window>,
    cached_height: Cell<f32>,
}

impl WindowMetrics {
    pub fn new(window: Rc<Window>) -> Self {
        let metrics = Self {
            window,
            cached_height: Cell::new(0.0),
        };
        metrics.refresh_viewport_height();
        metrics
    }

    /// Re-reads the window height into the cache and returns it.
    ///
    /// An unmeasurable window yields an infinite height: the explicit
    /// "assume everything is visible" policy, under which every candidate
    /// passes the loader's threshold test.
    pub fn refresh_viewport_height(&self) -> f32 {
        let height = match self.window.inner_height() {
            Some(height) => height,
            None => {
                log::debug!("viewport height unmeasurable, assuming everything is visible");
                f32::INFINITY
            }
        };
        self.cached_height.set(height);
        height
    }
}

impl PositionProvider<Element> for WindowMetrics {
    fn vertical_offset(&self, element: &Element) -> f32 {
        element.top() - self.window.scroll_y()
    }

    fn viewport_height(&self) -> f32 {
        self.cached_height.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_tracks_scroll_position() {
        let window = Rc::new(Window::new(800.0));
        let metrics = WindowMetrics::new(Rc::clone(&window));
        let element = Element::new();
        element.set_top(1200.0);

        assert_eq!(metrics.vertical_offset(&element), 1200.0);
        window.scroll_to(500.0);
        assert_eq!(metrics.vertical_offset(&element), 700.0);
    }

    #[test]
    fn test_height_cached_until_refreshed() {
        let window = Rc::new(Window::new(800.0));
        let metrics = WindowMetrics::new(Rc::clone(&window));

        window.set_inner_height(400.0);
        assert_eq!(metrics.viewport_height(), 800.0);

        metrics.refresh_viewport_height();
        assert_eq!(metrics.viewport_height(), 400.0);
    }

    #[test]
    fn test_unmeasurable_window_reports_infinite_height() {
        let metrics = WindowMetrics::new(Rc::new(Window::unmeasurable()));
        assert_eq!(metrics.viewport_height(), f32::INFINITY);
    }
}
