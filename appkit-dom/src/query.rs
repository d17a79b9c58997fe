//! Tree queries over [`Element`] trees.

use crate::element::{Content, Element};

/// Collect all elements carrying the given class, depth-first.
pub fn find_all_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_by_class(root, class, &mut found);
    found
}

fn collect_by_class<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    if element.has_class(class) {
        found.push(element);
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_by_class(child, class, found);
        }
    }
}

/// The root-to-target path for the element with the given id, or `None`
/// if the id is not in the tree. The last entry is the target itself.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    let mut path = Vec::new();
    if walk_path(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk_path<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);
    if element.id == id {
        return true;
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            if walk_path(child, id, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}

/// Find the nearest ancestor-or-self of `id` carrying `class`.
///
/// The `closest()` of this document model: used by managers that route a
/// click on an inner element to its enclosing widget container.
pub fn closest_with_class<'a>(root: &'a Element, id: &str, class: &str) -> Option<&'a Element> {
    let path = path_to(root, id)?;
    path.into_iter().rev().find(|el| el.has_class(class))
}

/// Visit every element in the tree mutably, depth-first.
pub fn for_each_mut(root: &mut Element, f: &mut impl FnMut(&mut Element)) {
    f(root);
    if let Content::Children(children) = &mut root.content {
        for child in children {
            for_each_mut(child, f);
        }
    }
}

/// Concatenate the text content of an element subtree.
pub fn collect_text(element: &Element) -> String {
    let mut out = String::new();
    collect_text_into(element, &mut out);
    out
}

fn collect_text_into(element: &Element, out: &mut String) {
    match &element.content {
        Content::Text(text) => out.push_str(text),
        Content::TextInput { value, .. } => out.push_str(value),
        Content::Children(children) => {
            for child in children {
                collect_text_into(child, out);
            }
        }
        Content::Checkbox { .. } | Content::None => {}
    }
}
