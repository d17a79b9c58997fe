use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use appkit_dom::{Document, Element, Event};

#[test]
fn test_mount_registration_and_replacement() {
    let document = Document::new();
    assert!(!document.has_mount("app"));

    document.register_mount("app");
    assert!(document.has_mount("app"));

    document.set_mount("app", Element::box_().id("app").child(Element::text("hi")));
    let mounted = document.mount("app").expect("mounted");
    assert_eq!(mounted.text_content(), "hi");
}

#[test]
fn test_register_mount_is_idempotent() {
    let document = Document::new();
    document.register_mount("app");
    document.set_mount("app", Element::box_().id("app").child(Element::text("kept")));

    // Re-registering must not wipe the existing tree.
    document.register_mount("app");
    assert_eq!(document.mount("app").expect("mounted").text_content(), "kept");
}

#[test]
fn test_set_unregistered_mount_is_ignored() {
    let document = Document::new();
    document.set_mount("ghost", Element::box_());
    assert!(!document.has_mount("ghost"));
}

#[test]
fn test_update_element_across_mounts() {
    let document = Document::new();
    document.register_mount("a");
    document.register_mount("b");
    document.set_mount(
        "b",
        Element::box_().id("b").child(Element::box_().id("inner").class("modal-overlay")),
    );

    assert!(document.update_element("inner", |el| el.add_class("active")));
    assert!(document.find("inner").expect("found").has_class("active"));

    assert!(!document.update_element("missing", |_| {}));
}

#[test]
fn test_dispatch_reaches_all_listeners() {
    let document = Document::new();
    let count = Arc::new(AtomicUsize::new(0));

    for key in ["one", "two"] {
        let count = Arc::clone(&count);
        document.add_listener(key, Arc::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
    }

    document.dispatch(&Event::click("anywhere"));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_listener_registration_is_idempotent() {
    let document = Document::new();
    let count = Arc::new(AtomicUsize::new(0));

    // Registering twice under one key must replace, not stack.
    for _ in 0..2 {
        let count = Arc::clone(&count);
        document.add_listener("widget", Arc::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        }));
    }

    document.dispatch(&Event::click_nowhere());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    document.remove_listener("widget");
    document.dispatch(&Event::click_nowhere());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_listener_may_mutate_document_during_dispatch() {
    let document = Document::new();
    document.register_mount("app");

    let doc = document.clone();
    document.add_listener("mutator", Arc::new(move |_| {
        doc.update_mount("app", |el| el.add_class("clicked"));
    }));

    document.dispatch(&Event::click_nowhere());
    assert!(document.mount("app").expect("mounted").has_class("clicked"));
}
