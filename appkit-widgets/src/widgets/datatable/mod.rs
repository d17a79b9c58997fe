//! Data table widget - a search/sort/paginate/select grid.
//!
//! The table owns an in-memory row collection and derives the visible page
//! from view state on every render; there is no incremental diffing. The
//! derivation pipeline (filter, then sort, then paginate) lives in
//! [`query`] as pure functions so it can be unit-tested without a document.

mod events;
mod item;
pub mod query;
mod render;
mod state;

pub use item::{canonical_id, record_ids, Column, Row, TableRecord};
pub use query::SortDirection;
pub use state::{DataTable, DataTableConfig, RowCallback, SelectionCallback};
