//! Headless demo: default whole-document wiring over a simulated page.
//!
//! Builds a long page of lazily-loaded images, installs the default
//! document-scoped loader the way a host bootstrap would (load + resize +
//! scroll notifications), then scrolls to the bottom in steps and reports
//! which images each step activated.

use std::rc::Rc;

use anyhow::ensure;

use lazyfold_core::{Environment, EventBridge, EventHandler, EventKind, PositionProvider};
use lazyfold_foundation::{InstanceRegistry, LazyLoader, ScopeTarget};
use lazyfold_runtime_std::{
    Document, Element, EventHub, Window, WindowMetrics, ACTIVE_SOURCE_ATTR, LAZY_SOURCE_ATTR,
};

const VIEWPORT_HEIGHT: f32 = 900.0;
const IMAGE_COUNT: usize = 12;
const IMAGE_SPACING: f32 = 450.0;
const SCROLL_STEP: f32 = 300.0;

fn build_page(document: &Document) -> Vec<Element> {
    (0..IMAGE_COUNT)
        .map(|i| {
            let image = Element::new();
            image.set_top(i as f32 * IMAGE_SPACING);
            image.set_attribute(LAZY_SOURCE_ATTR, &format!("photos/{i:02}.jpg"));
            document.root().append_child(&image);
            image
        })
        .collect()
}

fn activated_count(images: &[Element]) -> usize {
    images
        .iter()
        .filter(|image| image.attribute(ACTIVE_SOURCE_ATTR).is_some())
        .count()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .init();

    println!("=== Lazyfold Headless Demo ===");
    println!(
        "{IMAGE_COUNT} images spaced {IMAGE_SPACING}px apart, viewport {VIEWPORT_HEIGHT}px, \
         scrolled in {SCROLL_STEP}px steps"
    );
    println!();

    let document = Rc::new(Document::new());
    let images = build_page(&document);

    let window = Rc::new(Window::new(VIEWPORT_HEIGHT));
    let metrics = Rc::new(WindowMetrics::new(Rc::clone(&window)));
    let hub = Rc::new(EventHub::new());
    let env = Environment::new(
        Rc::clone(&document),
        Rc::clone(&metrics) as Rc<dyn PositionProvider<Element>>,
        Rc::clone(&hub) as Rc<dyn EventBridge>,
    );
    let registry = InstanceRegistry::new();

    // Default wiring: resize refreshes the cached viewport height, the
    // document-scoped loader subscribes itself to scroll, and its scan is
    // additionally bound to the load notification.
    let refresh_on_resize: EventHandler = {
        let metrics = Rc::clone(&metrics);
        Rc::new(move || {
            metrics.refresh_viewport_height();
        })
    };
    hub.subscribe(EventKind::Resize, &refresh_on_resize);

    let loader = LazyLoader::get_or_create(&env, &registry, ScopeTarget::Document, None);
    let scan_on_load: EventHandler = {
        let loader = loader.clone();
        Rc::new(move || loader.scan())
    };
    hub.subscribe(EventKind::Load, &scan_on_load);
    hub.emit(EventKind::Load);

    println!(
        "after load: {}/{} images active",
        activated_count(&images),
        IMAGE_COUNT
    );

    let page_bottom = IMAGE_COUNT as f32 * IMAGE_SPACING;
    let mut scroll = 0.0;
    while scroll < page_bottom && !registry.is_empty() {
        scroll += SCROLL_STEP;
        window.scroll_to(scroll);
        hub.emit(EventKind::Scroll);
        println!(
            "scrolled to {scroll:>6.0}px: {:>2}/{} images active",
            activated_count(&images),
            IMAGE_COUNT
        );
    }

    ensure!(
        activated_count(&images) == IMAGE_COUNT,
        "expected every image to be activated by the bottom of the page"
    );
    ensure!(
        registry.is_empty(),
        "expected the loader to deregister itself after finishing"
    );
    println!();
    println!("loader finished and removed itself; registry is empty");

    Ok(())
}
