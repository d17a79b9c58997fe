//! Markup construction for the data table.

use appkit_dom::Element;

use super::item::TableRecord;
use super::query::{self, SortDirection};
use super::state::TableInner;

/// Build the full table markup from the current state.
pub(super) fn build(inner: &TableInner, prefix: &str, mount_id: &str) -> Element {
    let filtered = query::filter_records(&inner.records, &inner.columns, &inner.search_term);
    let total = filtered.len();
    let sorted = match &inner.sort {
        Some((key, direction)) => query::sort_records(filtered, key, *direction),
        None => filtered,
    };
    let pages = query::total_pages(total, inner.config.per_page);
    let page_records = query::page_slice(&sorted, inner.current_page, inner.config.per_page);

    let mut root = Element::box_().id(mount_id).class("datatable");

    if inner.config.searchable {
        root = root.child(build_header(inner, prefix, page_records.len(), total));
    }

    root = root.child(build_container(inner, prefix, &page_records));

    if !inner.loading && pages > 1 {
        root = root.child(build_pagination(inner, prefix, pages));
    }

    root
}

fn build_header(inner: &TableInner, prefix: &str, shown: usize, total: usize) -> Element {
    let search = Element::text_input(inner.search_term.clone())
        .id(format!("{prefix}-search"))
        .class("form-input")
        .placeholder("Search...");

    let info = Element::box_()
        .class("datatable-info")
        .child(Element::text(format!("Showing {shown} of {total} entries")));

    Element::box_()
        .class("datatable-header")
        .child(Element::box_().class("datatable-search").child(search))
        .child(info)
}

fn build_container(inner: &TableInner, prefix: &str, page_records: &[TableRecord]) -> Element {
    let container = Element::box_().class("table-container");

    if inner.loading {
        return container.child(
            Element::box_()
                .class("datatable-loading")
                .child(Element::text(inner.config.loading_message.clone())),
        );
    }

    let mut table = Element::box_().class("table");
    if inner.config.sortable {
        table = table.class("table-sortable");
    }

    table = table.child(build_head(inner, prefix, page_records));
    table = table.child(build_body(inner, prefix, page_records));

    container.child(table)
}

fn build_head(inner: &TableInner, prefix: &str, page_records: &[TableRecord]) -> Element {
    let mut head = Element::box_().class("table-head");

    if inner.config.selectable {
        let all_selected = !page_records.is_empty()
            && page_records
                .iter()
                .all(|record| inner.selection.is_selected(&record.id));
        head = head.child(
            Element::box_().class("table-th").class("table-th-select").child(
                Element::checkbox(all_selected).id(format!("{prefix}-select-all")),
            ),
        );
    }

    for col in &inner.columns {
        let sorted = inner
            .sort
            .as_ref()
            .filter(|(key, _)| *key == col.key)
            .map(|(_, direction)| *direction);
        let arrow = match sorted {
            Some(SortDirection::Asc) => " \u{2191}",
            Some(SortDirection::Desc) => " \u{2193}",
            None => "",
        };

        let mut th = Element::box_()
            .id(format!("{prefix}-sort-{}", col.key))
            .class("table-th")
            .clickable(inner.config.sortable)
            .child(Element::text(format!("{}{arrow}", col.label)));
        match sorted {
            Some(SortDirection::Asc) => th = th.class("sorted-asc"),
            Some(SortDirection::Desc) => th = th.class("sorted-desc"),
            None => {}
        }
        if let Some(width) = &col.width {
            th = th.data("width", width.clone());
        }
        head = head.child(th);
    }

    head
}

fn build_body(inner: &TableInner, prefix: &str, page_records: &[TableRecord]) -> Element {
    let body = Element::box_().class("table-body");

    if page_records.is_empty() {
        return body.child(
            Element::box_()
                .class("datatable-empty")
                .child(Element::text(inner.config.empty_message.clone())),
        );
    }

    body.children(
        page_records
            .iter()
            .map(|record| build_row(inner, prefix, record)),
    )
}

fn build_row(inner: &TableInner, prefix: &str, record: &TableRecord) -> Element {
    let selected = inner.selection.is_selected(&record.id);

    let mut row = Element::box_()
        .id(format!("{prefix}-row-{}", record.id))
        .class("table-row")
        .clickable(inner.config.on_row_click.is_some())
        .data("id", record.id.clone());
    if selected {
        row = row.class("selected");
    }

    if inner.config.selectable {
        row = row.child(
            Element::box_()
                .class("table-cell")
                .class("table-cell-select")
                .child(Element::checkbox(selected).id(format!("{prefix}-check-{}", record.id))),
        );
    }

    for col in &inner.columns {
        let value = record.fields.get(&col.key);
        let display = match (&col.render, value) {
            (Some(render), Some(value)) => render(value, &record.fields),
            (Some(render), None) => render(&serde_json::Value::Null, &record.fields),
            (None, value) => query::value_text(value).unwrap_or_else(|| "-".to_string()),
        };
        row = row.child(Element::box_().class("table-cell").child(Element::text(display)));
    }

    row
}

fn build_pagination(inner: &TableInner, prefix: &str, pages: usize) -> Element {
    let prev = Element::button("Previous")
        .id(format!("{prefix}-prev"))
        .classes(["btn-sm", "btn-secondary"])
        .disabled(inner.current_page == 1);

    let info = Element::box_().class("pagination-info").child(Element::text(format!(
        "Page {} of {pages}",
        inner.current_page
    )));

    let next = Element::button("Next")
        .id(format!("{prefix}-next"))
        .classes(["btn-sm", "btn-secondary"])
        .disabled(inner.current_page == pages);

    Element::box_()
        .class("pagination")
        .child(prev)
        .child(info)
        .child(next)
}
