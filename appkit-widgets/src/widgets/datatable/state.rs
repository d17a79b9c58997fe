//! Data table state and operations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use appkit_dom::Document;

use crate::debounce::Debouncer;
use crate::widgets::selection::Selection;

use super::item::{record_ids, Column, Row, TableRecord};
use super::query::{self, SortDirection};
use super::render;

/// Quiet period between search keystrokes and the actual search.
pub(super) const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Called with the clicked row.
pub type RowCallback = Arc<dyn Fn(&Row) + Send + Sync>;

/// Called with the sorted list of selected canonical ids.
pub type SelectionCallback = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Unique identifier for a DataTable widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__datatable_{}", self.0)
    }
}

/// Configuration for a [`DataTable`].
///
/// Every field has a usable default; malformed values degrade to defaults
/// rather than failing (`per_page` of 0 becomes 10).
#[derive(Clone)]
pub struct DataTableConfig {
    /// Rows per page.
    pub per_page: usize,
    /// Render the search header.
    pub searchable: bool,
    /// Allow sorting by clicking header cells.
    pub sortable: bool,
    /// Render the selection checkbox column.
    pub selectable: bool,
    /// Message shown when the filtered set is empty.
    pub empty_message: String,
    /// Message shown while loading.
    pub loading_message: String,
    /// Invoked when a row (outside its checkbox) is clicked.
    pub on_row_click: Option<RowCallback>,
    /// Invoked with the full selected-id list after any selection change.
    pub on_selection_change: Option<SelectionCallback>,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            searchable: true,
            sortable: true,
            selectable: false,
            empty_message: "No data available".to_string(),
            loading_message: "Loading...".to_string(),
            on_row_click: None,
            on_selection_change: None,
        }
    }
}

impl DataTableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn on_row_click(mut self, f: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl Fn(&[String]) + Send + Sync + 'static) -> Self {
        self.on_selection_change = Some(Arc::new(f));
        self
    }

    fn normalized(mut self) -> Self {
        if self.per_page == 0 {
            self.per_page = 10;
        }
        self
    }
}

/// Internal state for the DataTable widget.
pub(super) struct TableInner {
    /// The backing collection, ids assigned at the last `set_data`.
    pub records: Vec<TableRecord>,
    /// Column definitions.
    pub columns: Vec<Column>,
    /// Widget configuration.
    pub config: DataTableConfig,
    /// Current search term.
    pub search_term: String,
    /// Current sort state (column key, direction).
    pub sort: Option<(String, SortDirection)>,
    /// Current page, 1-indexed, clamped to `[1, total_pages]`.
    pub current_page: usize,
    /// Selection state (by canonical row id).
    pub selection: Selection,
    /// Loading flag; suppresses table and pagination markup.
    pub loading: bool,
}

impl TableInner {
    /// The filtered and sorted view of the collection.
    fn derived(&self) -> Vec<TableRecord> {
        let filtered = query::filter_records(&self.records, &self.columns, &self.search_term);
        match &self.sort {
            Some((key, direction)) => query::sort_records(filtered, key, *direction),
            None => filtered,
        }
    }

    fn total_pages(&self) -> usize {
        let filtered =
            query::filter_records(&self.records, &self.columns, &self.search_term).len();
        query::total_pages(filtered, self.config.per_page)
    }

    /// The records visible on the current page.
    pub(super) fn page_records(&self) -> Vec<TableRecord> {
        query::page_slice(&self.derived(), self.current_page, self.config.per_page)
    }
}

/// A search/sort/paginate/select grid.
///
/// Owns an in-memory row collection and derives the visible page from view
/// state on every render. Cheap to clone; clones share state. A table
/// constructed against a missing mount point is a disabled no-op instance.
///
/// # Example
///
/// ```ignore
/// let table = DataTable::new(
///     &document,
///     "users-table",
///     rows,
///     vec![Column::new("name", "Name"), Column::new("email", "Email")],
///     DataTableConfig::new().per_page(25).selectable(true),
/// );
/// table.search("alice");
/// ```
pub struct DataTable {
    id: TableId,
    pub(super) document: Document,
    pub(super) mount_id: String,
    pub(super) enabled: bool,
    pub(super) debouncer: Debouncer,
    pub(super) inner: Arc<RwLock<TableInner>>,
}

impl DataTable {
    /// Create a table and render it into the given mount point.
    ///
    /// If the mount point is not registered on the document, logs a warning
    /// and returns a disabled instance whose operations all silently no-op.
    pub fn new(
        document: &Document,
        mount_id: impl Into<String>,
        rows: Vec<Row>,
        columns: Vec<Column>,
        config: DataTableConfig,
    ) -> Self {
        let mount_id = mount_id.into();
        let enabled = document.has_mount(&mount_id);
        if !enabled {
            log::warn!("DataTable: mount point \"{mount_id}\" not found");
        }

        let table = Self {
            id: TableId::new(),
            document: document.clone(),
            mount_id,
            enabled,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            inner: Arc::new(RwLock::new(TableInner {
                records: record_ids(rows),
                columns,
                config: config.normalized(),
                search_term: String::new(),
                sort: None,
                current_page: 1,
                selection: Selection::new(),
                loading: false,
            })),
        };

        if table.enabled {
            let handler = table.clone();
            document.add_listener(
                table.id_string(),
                Arc::new(move |event| handler.handle_event(event)),
            );
            table.render();
        }
        table
    }

    /// The widget's unique id, used to prefix its rendered element ids.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Whether the table resolved its mount point at construction.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Replace the row collection. Resets the page to 1 and clears the
    /// selection.
    pub fn set_data(&self, rows: Vec<Row>) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.records = record_ids(rows);
            guard.current_page = 1;
            guard.selection.clear();
        }
        self.render();
    }

    /// Set the search term. Resets the page to 1.
    pub fn search(&self, term: impl Into<String>) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.search_term = term.into();
            guard.current_page = 1;
        }
        self.render();
    }

    /// Sort by a column: a repeated column flips the direction, a new
    /// column sorts ascending.
    pub fn sort(&self, column: &str) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.sort = match guard.sort.take() {
                Some((key, direction)) if key == column => Some((key, direction.flip())),
                _ => Some((column.to_string(), SortDirection::Asc)),
            };
        }
        self.render();
    }

    /// Move to the previous page. No-op on page 1.
    pub fn prev_page(&self) {
        if !self.enabled {
            return;
        }
        let moved = self
            .inner
            .write()
            .map(|mut guard| {
                if guard.current_page > 1 {
                    guard.current_page -= 1;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if moved {
            self.render();
        }
    }

    /// Move to the next page. No-op on the last page.
    pub fn next_page(&self) {
        if !self.enabled {
            return;
        }
        let moved = self
            .inner
            .write()
            .map(|mut guard| {
                if guard.current_page < guard.total_pages() {
                    guard.current_page += 1;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if moved {
            self.render();
        }
    }

    /// Jump to a page. No-op unless `1 <= page <= total_pages`.
    pub fn go_to_page(&self, page: usize) {
        if !self.enabled {
            return;
        }
        let moved = self
            .inner
            .write()
            .map(|mut guard| {
                if page >= 1 && page <= guard.total_pages() {
                    guard.current_page = page;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if moved {
            self.render();
        }
    }

    /// Add or remove a row id from the selection.
    pub fn select_row(&self, id: &str, selected: bool) {
        if !self.enabled {
            return;
        }
        let notify = self
            .inner
            .write()
            .map(|mut guard| {
                guard.selection.set(id, selected);
                (
                    guard.config.on_selection_change.clone(),
                    guard.selection.sorted_ids(),
                )
            })
            .ok();
        self.render();
        if let Some((Some(callback), ids)) = notify {
            callback(&ids);
        }
    }

    /// Select or deselect every row on the current page (not the whole
    /// filtered set).
    pub fn select_all(&self, selected: bool) {
        if !self.enabled {
            return;
        }
        let notify = self
            .inner
            .write()
            .map(|mut guard| {
                let page = guard.page_records();
                for record in &page {
                    guard.selection.set(&record.id, selected);
                }
                (
                    guard.config.on_selection_change.clone(),
                    guard.selection.sorted_ids(),
                )
            })
            .ok();
        self.render();
        if let Some((Some(callback), ids)) = notify {
            callback(&ids);
        }
    }

    /// Toggle the loading state. While loading, the body shows the loading
    /// message and table/pagination markup is suppressed.
    pub fn set_loading(&self, loading: bool) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.loading = loading;
        }
        self.render();
    }

    /// Rows from the full collection whose canonical id is selected.
    pub fn get_selected_rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .records
                    .iter()
                    .filter(|record| guard.selection.is_selected(&record.id))
                    .map(|record| record.fields.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Force a re-render with no state change (for externally mutated row
    /// data).
    pub fn refresh(&self) {
        if !self.enabled {
            return;
        }
        self.render();
    }

    // -------------------------------------------------------------------------
    // State accessors
    // -------------------------------------------------------------------------

    /// The current 1-indexed page.
    pub fn current_page(&self) -> usize {
        self.inner.read().map(|g| g.current_page).unwrap_or(1)
    }

    /// The current search term.
    pub fn search_term(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search_term.clone())
            .unwrap_or_default()
    }

    /// The current sort state (column key, direction).
    pub fn sort_state(&self) -> Option<(String, SortDirection)> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Sorted list of selected canonical ids.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selection.sorted_ids())
            .unwrap_or_default()
    }

    /// Number of rows in the backing collection (unfiltered).
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub(super) fn render(&self) {
        if !self.enabled {
            return;
        }
        let element = match self.inner.read() {
            Ok(guard) => render::build(&guard, &self.id_string(), &self.mount_id),
            Err(_) => return,
        };
        self.document.set_mount(&self.mount_id, element);
    }
}

impl Clone for DataTable {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            document: self.document.clone(),
            mount_id: self.mount_id.clone(),
            enabled: self.enabled,
            debouncer: self.debouncer.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}
