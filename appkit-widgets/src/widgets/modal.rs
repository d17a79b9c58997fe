//! Modal manager - opens and closes `.modal-overlay` mounts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use appkit_dom::{for_each_mut, Document, Element, Event, Key};

const LISTENER_KEY: &str = "modal";
const CONFIRM_MOUNT: &str = "modal-confirm";

/// Options for [`Modal::confirm`].
#[derive(Clone)]
pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Extra class applied to the confirm button (`btn-danger` by default).
    pub confirm_class: String,
    pub on_confirm: Option<Arc<dyn Fn() + Send + Sync>>,
    pub on_cancel: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: "Are you sure?".to_string(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            confirm_class: "btn-danger".to_string(),
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl ConfirmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    pub fn confirm_class(mut self, class: impl Into<String>) -> Self {
        self.confirm_class = class.into();
        self
    }

    pub fn on_confirm(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Arc::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Arc::new(f));
        self
    }
}

/// Manages every `.modal-overlay` mount in the document.
///
/// An explicit instance constructed once at application start. Escape
/// closes all open modals; clicking an overlay backdrop closes that modal.
/// [`confirm`](Self::confirm) builds a reusable confirmation dialog whose
/// callbacks fire exactly once per showing.
#[derive(Clone)]
pub struct Modal {
    document: Document,
}

impl Modal {
    /// Attach a modal manager to the document.
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
            Event::Key { key: Key::Escape, .. } => self.close_all(),
            Event::Click { target: Some(target) } => {
                // Only a click on the overlay itself (the backdrop) closes;
                // clicks inside the dialog have deeper targets.
                let is_overlay = self
                    .document
                    .find(target)
                    .map(|el| el.has_class("modal-overlay"))
                    .unwrap_or(false);
                if is_overlay {
                    self.document
                        .update_element(target, |el| el.remove_class("active"));
                }
            }
            _ => {}
        }
    }

    /// Open a modal by element id.
    pub fn open(&self, id: &str) {
        self.document.update_element(id, |el| el.add_class("active"));
    }

    /// Close a modal by element id.
    pub fn close(&self, id: &str) {
        self.document
            .update_element(id, |el| el.remove_class("active"));
    }

    /// Close every open modal in the document.
    pub fn close_all(&self) {
        self.document.update_mounts(|_, root| {
            for_each_mut(root, &mut |el| {
                if el.has_class("modal-overlay") {
                    el.remove_class("active");
                }
            });
        });
    }

    /// Show a confirmation dialog.
    ///
    /// Builds (or rebuilds) the shared `modal-confirm` mount, wires the
    /// confirm/cancel/close buttons, and opens it. Each button fires its
    /// callback at most once per showing.
    pub fn confirm(&self, options: ConfirmOptions) {
        self.document.register_mount(CONFIRM_MOUNT);
        self.document
            .set_mount(CONFIRM_MOUNT, build_confirm(&options));

        let fired = Arc::new(AtomicBool::new(false));
        let manager = self.clone();
        self.document.add_listener(
            "modal-confirm",
            Arc::new(move |event| {
                let Event::Click { target: Some(target) } = event else {
                    return;
                };
                let confirmed = match target.as_str() {
                    "modal-confirm-action" => true,
                    "modal-confirm-cancel" | "modal-confirm-close" => false,
                    _ => return,
                };
                manager.close(CONFIRM_MOUNT);
                if fired.swap(true, Ordering::SeqCst) {
                    return;
                }
                let callback = if confirmed {
                    options.on_confirm.clone()
                } else {
                    options.on_cancel.clone()
                };
                if let Some(callback) = callback {
                    callback();
                }
            }),
        );

        self.open(CONFIRM_MOUNT);
    }
}

fn build_confirm(options: &ConfirmOptions) -> Element {
    let header = Element::box_()
        .class("modal-header")
        .child(
            Element::box_()
                .class("modal-title")
                .child(Element::text(options.title.clone())),
        )
        .child(
            Element::button("\u{00d7}")
                .id("modal-confirm-close")
                .class("modal-close"),
        );

    let body = Element::box_()
        .class("modal-body")
        .child(Element::text(options.message.clone()));

    let footer = Element::box_()
        .class("modal-footer")
        .child(
            Element::button(options.cancel_text.clone())
                .id("modal-confirm-cancel")
                .class("btn-secondary"),
        )
        .child(
            Element::button(options.confirm_text.clone())
                .id("modal-confirm-action")
                .class(options.confirm_class.clone()),
        );

    Element::box_()
        .id(CONFIRM_MOUNT)
        .class("modal-overlay")
        .clickable(true)
        .child(
            Element::box_()
                .class("modal")
                .child(header)
                .child(body)
                .child(footer),
        )
}
