//! Dropdown manager - toggles `.dropdown` containers document-wide.

use std::sync::Arc;

use appkit_dom::{for_each_mut, Document, Event, Key};

const LISTENER_KEY: &str = "dropdown";

/// Manages every `.dropdown` container in the document.
///
/// An explicit instance constructed once at application start: it holds its
/// own document reference and registers its document-level click and key
/// listeners under a stable key, so repeated [`attach`](Self::attach) calls
/// are idempotent.
///
/// Behavior: clicking a `.dropdown-toggle` closes all open dropdowns, then
/// opens its own `.dropdown` container unless it was already open; clicking
/// anywhere outside a `.dropdown-menu` closes all; Escape closes all.
#[derive(Clone)]
pub struct Dropdown {
    document: Document,
}

impl Dropdown {
    /// Attach a dropdown manager to the document.
    pub fn attach(document: &Document) -> Self {
        let manager = Self {
            document: document.clone(),
        };

        let handler = manager.clone();
        document.add_listener(
            LISTENER_KEY,
            Arc::new(move |event| handler.handle_event(event)),
        );
        manager
    }

    pub fn handle_event(&self, event: &Event) {
        match event {
            Event::Click { target: Some(target) } => {
                if self
                    .document
                    .closest_class(target, "dropdown-toggle")
                    .is_some()
                {
                    let Some(container) = self.document.closest_class(target, "dropdown") else {
                        return;
                    };
                    let was_active = self
                        .document
                        .find(&container)
                        .map(|el| el.has_class("active"))
                        .unwrap_or(false);
                    self.close_all();
                    if !was_active {
                        self.document
                            .update_element(&container, |el| el.add_class("active"));
                    }
                } else if self
                    .document
                    .closest_class(target, "dropdown-menu")
                    .is_none()
                {
                    self.close_all();
                }
            }
            Event::Click { target: None } => self.close_all(),
            Event::Key { key: Key::Escape, .. } => self.close_all(),
            _ => {}
        }
    }

    /// Close every open dropdown in the document.
    pub fn close_all(&self) {
        self.document.update_mounts(|_, root| {
            for_each_mut(root, &mut |el| {
                if el.has_class("dropdown") {
                    el.remove_class("active");
                }
            });
        });
    }

    /// Open a dropdown by element id, closing every other one first.
    pub fn open(&self, id: &str) {
        if self.document.find(id).is_none() {
            return;
        }
        self.close_all();
        self.document.update_element(id, |el| el.add_class("active"));
    }

    /// Close a dropdown by element id.
    pub fn close(&self, id: &str) {
        self.document
            .update_element(id, |el| el.remove_class("active"));
    }
}
