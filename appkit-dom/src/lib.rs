pub mod document;
pub mod element;
pub mod event;
pub mod query;

pub use document::{Document, ListenerFn};
pub use element::{find_element, find_element_mut, Content, Element};
pub use event::{Event, Key, Modifiers};
pub use query::{closest_with_class, collect_text, find_all_by_class, for_each_mut, path_to};
