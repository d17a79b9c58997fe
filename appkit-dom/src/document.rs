//! The document: named mount points plus document-level event dispatch.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::element::{find_element, Element};
use crate::event::Event;
use crate::query::closest_with_class;

/// A document-level event listener.
pub type ListenerFn = Arc<dyn Fn(&Event) + Send + Sync>;

/// The shared document widgets render into.
///
/// A `Document` holds a flat set of named mount points (each the root of an
/// [`Element`] tree) and a keyed registry of document-level listeners.
/// Cloning shares the underlying state, so widgets keep a clone and render
/// into their mount on every state change.
///
/// Listener registration is keyed: registering under an existing key
/// replaces the previous listener, which makes repeated widget `attach`
/// calls idempotent.
#[derive(Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

#[derive(Default)]
struct DocumentInner {
    mounts: BTreeMap<String, Element>,
    listeners: BTreeMap<String, ListenerFn>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Mount points
    // -------------------------------------------------------------------------

    /// Register an empty mount point. Existing mounts are left untouched.
    pub fn register_mount(&self, id: impl Into<String>) {
        let id = id.into();
        if let Ok(mut guard) = self.inner.write() {
            guard
                .mounts
                .entry(id.clone())
                .or_insert_with(|| Element::box_().id(id));
        }
    }

    /// Check whether a mount point exists.
    pub fn has_mount(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.mounts.contains_key(id))
            .unwrap_or(false)
    }

    /// Get a clone of a mount's current element tree.
    pub fn mount(&self, id: &str) -> Option<Element> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.mounts.get(id).cloned())
    }

    /// Replace a mount's element tree wholesale.
    ///
    /// Setting an unregistered mount is ignored with a warning; widgets are
    /// expected to check [`has_mount`](Self::has_mount) at construction and
    /// degrade to no-ops when their container is missing.
    pub fn set_mount(&self, id: &str, element: Element) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.mounts.contains_key(id) {
                guard.mounts.insert(id.to_string(), element);
            } else {
                log::warn!("set_mount: mount point \"{id}\" not found");
            }
        }
    }

    /// Mutate a mount's element tree in place.
    pub fn update_mount(&self, id: &str, f: impl FnOnce(&mut Element)) {
        if let Ok(mut guard) = self.inner.write() {
            if let Some(element) = guard.mounts.get_mut(id) {
                f(element);
            }
        }
    }

    /// Mutate every mount's element tree in place.
    pub fn update_mounts(&self, mut f: impl FnMut(&str, &mut Element)) {
        if let Ok(mut guard) = self.inner.write() {
            for (id, element) in guard.mounts.iter_mut() {
                f(id, element);
            }
        }
    }

    /// Mutate the element with the given id, wherever it is mounted.
    /// Returns `false` when no element matched.
    pub fn update_element(&self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            for root in guard.mounts.values_mut() {
                if let Some(element) = crate::element::find_element_mut(root, id) {
                    f(element);
                    return true;
                }
            }
        }
        false
    }

    /// Find an element by id across all mounts.
    pub fn find(&self, id: &str) -> Option<Element> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .mounts
                .values()
                .find_map(|root| find_element(root, id).cloned())
        })
    }

    /// Find the nearest ancestor-or-self of `id` carrying `class`, searching
    /// every mount. Returns the matching element's id.
    pub fn closest_class(&self, id: &str, class: &str) -> Option<String> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .mounts
                .values()
                .find_map(|root| closest_with_class(root, id, class).map(|el| el.id.clone()))
        })
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a document-level listener under a key, replacing any
    /// previous listener with the same key.
    pub fn add_listener(&self, key: impl Into<String>, listener: ListenerFn) {
        if let Ok(mut guard) = self.inner.write() {
            guard.listeners.insert(key.into(), listener);
        }
    }

    /// Remove a listener by key.
    pub fn remove_listener(&self, key: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.listeners.remove(key);
        }
    }

    /// Dispatch an event to every registered listener, in key order.
    ///
    /// Listeners are snapshotted before invocation so they are free to
    /// mutate mounts or the listener registry.
    pub fn dispatch(&self, event: &Event) {
        let listeners: Vec<ListenerFn> = self
            .inner
            .read()
            .map(|guard| guard.listeners.values().cloned().collect())
            .unwrap_or_default();

        for listener in listeners {
            listener(event);
        }
    }
}
