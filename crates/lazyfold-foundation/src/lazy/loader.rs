//! Loader instances and the forward-scan algorithm.

use std::cell::RefCell;
use std::rc::Rc;

use lazyfold_core::{Environment, EventHandler, EventKind, TreeHost};

use super::descriptor::{discover_sorted, ImageDescriptor};
use super::registry::InstanceRegistry;
use super::scope::{ScopeIdentity, ScopeTarget};

/// Extra distance beyond the viewport's lower edge within which a candidate
/// is still activated, when the caller does not pick a margin.
pub const DEFAULT_PREFETCH_MARGIN: f32 = 200.0;

/// One lazy-loading scope: a sorted candidate list, a forward cursor, and
/// the scan that moves the cursor.
///
/// Instances are created through [`get_or_create`](Self::get_or_create) and
/// live in an [`InstanceRegistry`] until every candidate has been activated,
/// at which point they unsubscribe and deregister themselves. Cloning is
/// cheap; clones share the same state, and registry identity is handle
/// identity ([`ptr_eq`](Self::ptr_eq)).
pub struct LazyLoader<H: TreeHost> {
    env: Environment<H>,
    registry: InstanceRegistry<H>,
    state: Rc<RefCell<LoaderState<H>>>,
}

struct LoaderState<H: TreeHost> {
    identity: ScopeIdentity,
    /// Resolved scope element. Stays `None` until the scope appears in the
    /// tree; re-resolved on each scan.
    target: Option<H::Element>,
    /// Candidates sorted ascending by offset at discovery time. `None` until
    /// discovery finds at least one candidate; never rebuilt afterward.
    ordered_images: Option<Vec<ImageDescriptor<H>>>,
    /// Index of the first not-yet-activated candidate. Never decreases.
    cursor: usize,
    prefetch_margin: f32,
    destroyed: bool,
    /// Kept so the scroll subscription can be removed by handler identity.
    scroll_handler: Option<EventHandler>,
}

// `'static` because the scroll handler is an `Rc<dyn Fn()>` capturing the
// environment and registry.
impl<H: TreeHost + 'static> LazyLoader<H> {
    /// Returns the loader for `target`'s scope, constructing it on first
    /// request.
    ///
    /// A request for a scope identity that is already registered returns the
    /// existing instance unchanged; `prefetch_margin` is ignored in that
    /// case. The margin of the first construction wins for the instance's
    /// whole life.
    ///
    /// A new instance registers itself, subscribes its scan to scroll
    /// notifications, and scans once before returning.
    pub fn get_or_create(
        env: &Environment<H>,
        registry: &InstanceRegistry<H>,
        target: impl Into<ScopeTarget<H::Element>>,
        prefetch_margin: Option<f32>,
    ) -> LazyLoader<H> {
        let (identity, resolved) = target.into().resolve(env.host());
        if let Some(existing) = registry.get(&identity) {
            return existing;
        }

        let loader = LazyLoader {
            env: env.clone(),
            registry: registry.clone(),
            state: Rc::new(RefCell::new(LoaderState {
                identity: identity.clone(),
                target: resolved,
                ordered_images: None,
                cursor: 0,
                prefetch_margin: prefetch_margin.unwrap_or(DEFAULT_PREFETCH_MARGIN),
                destroyed: false,
                scroll_handler: None,
            })),
        };
        registry.put(identity, loader.clone());

        let handler = loader.scan_handler();
        loader.state.borrow_mut().scroll_handler = Some(handler.clone());
        env.events().subscribe(EventKind::Scroll, &handler);

        loader.scan();
        loader
    }

    /// Builds the scroll callback.
    ///
    /// The closure holds the state weakly: the registry already keeps the
    /// instance alive while it is subscribed, and a strong capture would tie
    /// the handler and the state into a cycle.
    fn scan_handler(&self) -> EventHandler {
        let env = self.env.clone();
        let registry = self.registry.clone();
        let state = Rc::downgrade(&self.state);
        Rc::new(move || {
            if let Some(state) = state.upgrade() {
                let loader = LazyLoader {
                    env: env.clone(),
                    registry: registry.clone(),
                    state,
                };
                loader.scan();
            }
        })
    }

    /// Runs one scan: resolve the scope if needed, discover candidates if
    /// needed, then activate every candidate from the cursor forward whose
    /// current offset is within `viewport_height + prefetch_margin`.
    ///
    /// The candidate list is sorted ascending, so the first candidate over
    /// the threshold ends the scan; everything after it is at least as far
    /// down. Once the cursor has passed the last candidate the instance
    /// destroys itself.
    pub fn scan(&self) {
        let host = self.env.host();
        let positions = self.env.positions();

        let finished = {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            if state.destroyed {
                return;
            }

            // The scope may not have existed in the tree at construction
            // time; keep trying.
            if state.target.is_none() {
                state.target = match &state.identity {
                    ScopeIdentity::Document => Some(host.document_scope()),
                    ScopeIdentity::Id(id) => host.resolve_id(id),
                    ScopeIdentity::Unidentified => None,
                };
            }
            let Some(scope) = state.target.as_ref() else {
                return;
            };

            if state.ordered_images.is_none() {
                let discovered = discover_sorted(host, positions, scope);
                if discovered.is_empty() {
                    // The scope's content may still be loading; zero
                    // candidates is "not yet ready", not "done".
                    return;
                }
                log::debug!(
                    "scope {}: discovered {} lazy candidates",
                    state.identity,
                    discovered.len()
                );
                state.ordered_images = Some(discovered);
            }
            let Some(images) = state.ordered_images.as_ref() else {
                return;
            };

            let threshold = positions.viewport_height() + state.prefetch_margin;
            loop {
                let Some(descriptor) = images.get(state.cursor) else {
                    break true;
                };
                match host.upgrade(descriptor.element()) {
                    Some(element) => {
                        // Always re-measure; the sort-time offset is stale
                        // the moment layout shifts.
                        if positions.vertical_offset(&element) < threshold {
                            host.activate(&element, descriptor.pending_source());
                            log::trace!(
                                "scope {}: activated {:?} at cursor {}",
                                state.identity,
                                descriptor.pending_source(),
                                state.cursor
                            );
                            state.cursor += 1;
                        } else {
                            break false;
                        }
                    }
                    None => {
                        // The element left the tree; nothing to load there.
                        log::debug!(
                            "scope {}: candidate at cursor {} is gone, skipping",
                            state.identity,
                            state.cursor
                        );
                        state.cursor += 1;
                    }
                }
            }
        };

        if finished {
            log::debug!("scope {}: all candidates activated", self.identity());
            self.destroy();
        }
    }

    /// Unsubscribes from scroll notifications and removes the instance from
    /// the registry. Idempotent; later `scan` calls on a destroyed instance
    /// do nothing.
    pub fn destroy(&self) {
        let handler = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            state.scroll_handler.take()
        };
        if let Some(handler) = &handler {
            self.env.events().unsubscribe(EventKind::Scroll, handler);
        }
        self.registry.remove(&self.identity());
    }

    pub fn identity(&self) -> ScopeIdentity {
        self.state.borrow().identity.clone()
    }

    /// Index of the first not-yet-activated candidate.
    pub fn cursor(&self) -> usize {
        self.state.borrow().cursor
    }

    /// Number of discovered candidates, or `None` while discovery has not
    /// found any yet.
    pub fn discovered(&self) -> Option<usize> {
        self.state
            .borrow()
            .ordered_images
            .as_ref()
            .map(|images| images.len())
    }

    pub fn prefetch_margin(&self) -> f32 {
        self.state.borrow().prefetch_margin
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Whether two handles refer to the same instance.
    pub fn ptr_eq(&self, other: &LazyLoader<H>) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<H: TreeHost> Clone for LazyLoader<H> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            registry: self.registry.clone(),
            state: Rc::clone(&self.state),
        }
    }
}
