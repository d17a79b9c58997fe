//! Toast manager - transient notifications in a shared container.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use appkit_dom::{Content, Document, Element};
use tokio::runtime::Handle;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

const CONTAINER_MOUNT: &str = "toast-container";

/// Severity level of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Info => "toast-info",
            ToastLevel::Success => "toast-success",
            ToastLevel::Warning => "toast-warning",
            ToastLevel::Error => "toast-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Info => "\u{2139}",
            ToastLevel::Success => "\u{2713}",
            ToastLevel::Warning => "\u{26a0}",
            ToastLevel::Error => "\u{2717}",
        }
    }
}

/// Manages the shared toast container.
///
/// An explicit instance constructed once at application start; the
/// container mount is created on first construction and reused thereafter.
/// Each shown toast auto-dismisses after its duration when a tokio runtime
/// is available; otherwise it stays until dismissed explicitly.
#[derive(Clone)]
pub struct Toast {
    document: Document,
    counter: Arc<AtomicU64>,
}

impl Toast {
    /// Attach a toast manager to the document, creating the container mount
    /// if needed.
    pub fn attach(document: &Document) -> Self {
        document.register_mount(CONTAINER_MOUNT);
        document.update_mount(CONTAINER_MOUNT, |el| el.add_class("toast-container"));
        Self {
            document: document.clone(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Show a toast. Returns the toast's element id.
    pub fn show(
        &self,
        message: impl Into<String>,
        level: ToastLevel,
        duration: Option<Duration>,
    ) -> String {
        let id = format!("toast-{}", self.counter.fetch_add(1, Ordering::SeqCst));
        let toast = Element::box_()
            .id(id.clone())
            .class("toast")
            .class(level.class())
            .child(Element::text(level.icon()).class("toast-icon"))
            .child(Element::text(message.into()).class("toast-message"));

        self.document.update_mount(CONTAINER_MOUNT, |container| {
            match &mut container.content {
                Content::Children(children) => children.push(toast),
                content => *content = Content::Children(vec![toast]),
            }
        });

        if let Ok(handle) = Handle::try_current() {
            let manager = self.clone();
            let dismiss_id = id.clone();
            let duration = duration.unwrap_or(DEFAULT_TOAST_DURATION);
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                manager.dismiss(&dismiss_id);
            });
        }

        id
    }

    /// Remove a toast by id.
    pub fn dismiss(&self, id: &str) {
        self.document.update_mount(CONTAINER_MOUNT, |container| {
            if let Content::Children(children) = &mut container.content {
                children.retain(|child| child.id != id);
            }
        });
    }

    /// Number of toasts currently shown.
    pub fn len(&self) -> usize {
        self.document
            .mount(CONTAINER_MOUNT)
            .map(|container| container.content.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(message, ToastLevel::Success, None)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(message, ToastLevel::Error, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.show(message, ToastLevel::Warning, None)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(message, ToastLevel::Info, None)
    }
}
