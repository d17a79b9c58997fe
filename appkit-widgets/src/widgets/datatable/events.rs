//! Event routing for the data table.

use appkit_dom::Event;

use super::state::DataTable;

impl DataTable {
    /// Route a dispatched event to the matching table operation.
    ///
    /// Element ids are prefixed with the table's own id, so several tables
    /// can share a document without crosstalk. Events for other targets
    /// fall through untouched.
    pub fn handle_event(&self, event: &Event) {
        if !self.enabled {
            return;
        }
        let prefix = self.id_string();

        match event {
            Event::Input { target, value } if *target == format!("{prefix}-search") => {
                let searchable = self
                    .inner
                    .read()
                    .map(|guard| guard.config.searchable)
                    .unwrap_or(false);
                if searchable {
                    let table = self.clone();
                    let value = value.clone();
                    self.debouncer.debounce(move || table.search(value));
                }
            }
            Event::Click { target: Some(target) } => {
                if *target == format!("{prefix}-prev") {
                    self.prev_page();
                } else if *target == format!("{prefix}-next") {
                    self.next_page();
                } else if let Some(key) = target.strip_prefix(&format!("{prefix}-sort-")) {
                    let sortable = self
                        .inner
                        .read()
                        .map(|guard| guard.config.sortable)
                        .unwrap_or(false);
                    if sortable {
                        let key = key.to_string();
                        self.sort(&key);
                    }
                } else if let Some(id) = target.strip_prefix(&format!("{prefix}-row-")) {
                    self.row_clicked(id);
                }
            }
            Event::Toggle { target, checked } => {
                if *target == format!("{prefix}-select-all") {
                    self.select_all(*checked);
                } else if let Some(id) = target.strip_prefix(&format!("{prefix}-check-")) {
                    let id = id.to_string();
                    self.select_row(&id, *checked);
                }
            }
            _ => {}
        }
    }

    /// Look the clicked row up in the full collection and invoke the
    /// configured callback. Unknown ids silently do nothing.
    fn row_clicked(&self, id: &str) {
        let hit = self.inner.read().ok().and_then(|guard| {
            let callback = guard.config.on_row_click.clone()?;
            let row = guard
                .records
                .iter()
                .find(|record| record.id == id)
                .map(|record| record.fields.clone())?;
            Some((callback, row))
        });
        if let Some((callback, row)) = hit {
            callback(&row);
        }
    }
}
