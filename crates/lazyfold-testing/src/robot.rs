//! Robot testing harness for lazy-loading scenarios.
//!
//! A [`PageRobot`] owns a simulated page (document tree, window, event hub)
//! and the environment/registry a loader needs, and provides programmatic
//! control over the notifications a real host would fire:
//!
//! ```
//! use lazyfold_foundation::{LazyLoader, ScopeTarget};
//! use lazyfold_testing::PageRobot;
//!
//! let robot = PageRobot::new(800.0);
//! let image = robot.add_image(1500.0, "far.png");
//!
//! let loader = LazyLoader::get_or_create(
//!     robot.env(),
//!     robot.registry(),
//!     ScopeTarget::Document,
//!     None,
//! );
//! assert!(!robot.is_activated(&image));
//!
//! robot.scroll_to(600.0);
//! assert!(robot.is_activated(&image));
//! assert!(loader.is_destroyed());
//! ```

use std::rc::Rc;

use lazyfold_core::{Environment, EventBridge, EventHandler, EventKind};
use lazyfold_foundation::InstanceRegistry;
use lazyfold_runtime_std::{
    Document, Element, EventHub, Window, WindowMetrics, ACTIVE_SOURCE_ATTR, LAZY_SOURCE_ATTR,
};

/// Programmatic control over a simulated page and its host notifications.
pub struct PageRobot {
    document: Rc<Document>,
    window: Rc<Window>,
    hub: Rc<EventHub>,
    env: Environment<Document>,
    registry: InstanceRegistry<Document>,
    // Owned so the resize wiring survives as long as the robot.
    _resize_refresh: EventHandler,
}

impl PageRobot {
    /// Builds a page with the given viewport height and the default wiring
    /// a composition root performs: resize notifications refresh the cached
    /// viewport height.
    pub fn new(viewport_height: f32) -> Self {
        Self::with_window(Window::new(viewport_height))
    }

    /// Builds a page whose viewport height cannot be measured, so the
    /// position provider assumes everything is visible.
    pub fn unmeasurable() -> Self {
        Self::with_window(Window::unmeasurable())
    }

    fn with_window(window: Window) -> Self {
        let document = Rc::new(Document::new());
        let window = Rc::new(window);
        let metrics = Rc::new(WindowMetrics::new(Rc::clone(&window)));
        let hub = Rc::new(EventHub::new());

        let resize_refresh: EventHandler = {
            let metrics = Rc::clone(&metrics);
            Rc::new(move || {
                metrics.refresh_viewport_height();
            })
        };
        hub.subscribe(EventKind::Resize, &resize_refresh);

        let env = Environment::new(
            Rc::clone(&document),
            metrics,
            Rc::clone(&hub) as Rc<dyn EventBridge>,
        );

        Self {
            document,
            window,
            hub,
            env,
            registry: InstanceRegistry::new(),
            _resize_refresh: resize_refresh,
        }
    }

    pub fn env(&self) -> &Environment<Document> {
        &self.env
    }

    pub fn registry(&self) -> &InstanceRegistry<Document> {
        &self.registry
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    /// Appends a container element with the given id to the document root.
    pub fn add_container(&self, id: &str) -> Element {
        let container = Element::with_id(id);
        self.document.root().append_child(&container);
        container
    }

    /// Appends a lazy-load candidate to the document root.
    pub fn add_image(&self, top: f32, source: &str) -> Element {
        self.add_image_in(&self.document.root(), top, source)
    }

    /// Appends a lazy-load candidate to `parent`.
    pub fn add_image_in(&self, parent: &Element, top: f32, source: &str) -> Element {
        let image = Element::new();
        image.set_top(top);
        image.set_attribute(LAZY_SOURCE_ATTR, source);
        parent.append_child(&image);
        image
    }

    /// Moves the viewport to `y` and fires the scroll notification.
    pub fn scroll_to(&self, y: f32) {
        self.window.scroll_to(y);
        self.hub.emit(EventKind::Scroll);
    }

    /// Fires a scroll notification without moving the viewport.
    pub fn emit_scroll(&self) {
        self.hub.emit(EventKind::Scroll);
    }

    /// Resizes the window and fires the resize notification.
    pub fn resize_to(&self, viewport_height: f32) {
        self.window.set_inner_height(viewport_height);
        self.hub.emit(EventKind::Resize);
    }

    /// Fires the initial-load notification.
    pub fn emit_load(&self) {
        self.hub.emit(EventKind::Load);
    }

    /// The element's active resource reference, if it has been activated.
    pub fn active_source(&self, element: &Element) -> Option<String> {
        element.attribute(ACTIVE_SOURCE_ATTR)
    }

    pub fn is_activated(&self, element: &Element) -> bool {
        self.active_source(element).is_some()
    }

    /// How many of `elements` have been activated.
    pub fn activated_count(&self, elements: &[Element]) -> usize {
        elements
            .iter()
            .filter(|element| self.is_activated(element))
            .count()
    }

    /// Live scroll subscriptions, for asserting that a finished loader
    /// unsubscribed itself.
    pub fn scroll_handler_count(&self) -> usize {
        self.hub.handler_count(EventKind::Scroll)
    }
}
