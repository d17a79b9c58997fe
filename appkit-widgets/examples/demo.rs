use std::fs::File;

use appkit_dom::{Document, Event};
use appkit_widgets::{
    Charts, Column, ConfirmOptions, DataTable, DataTableConfig, Dataset, Dropdown, Modal,
    SeriesData, Toast,
};
use serde_json::{json, Value};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() {
    // Set up file logging
    let log_file = File::create("demo.log").expect("create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let document = Document::new();
    document.register_mount("users-table");
    document.register_mount("revenue-chart");

    // Managers are explicit instances, constructed once at startup.
    let _dropdown = Dropdown::attach(&document);
    let modal = Modal::attach(&document);
    let toast = Toast::attach(&document);

    let rows: Vec<_> = [
        json!({"id": 1, "name": "Alice", "role": "admin"}),
        json!({"id": 2, "name": "Bob", "role": "viewer"}),
        json!({"id": 3, "name": "Carol", "role": "editor"}),
    ]
    .into_iter()
    .map(|v| v.as_object().expect("row object").clone())
    .collect();

    let table = DataTable::new(
        &document,
        "users-table",
        rows,
        vec![
            Column::new("name", "Name"),
            Column::new("role", "Role").render(|value, _| format!("[{}]", value.as_str().unwrap_or("-"))),
        ],
        DataTableConfig::new().per_page(2).selectable(true),
    );

    table.sort("name");
    table.next_page();
    println!(
        "table page {}: {}",
        table.current_page(),
        document.mount("users-table").expect("mounted").text_content()
    );

    // Drive the table through dispatched events, as a host would.
    let prefix = table.id_string();
    document.dispatch(&Event::toggle(format!("{prefix}-select-all"), true));
    println!("selected ids: {:?}", table.selected_ids());

    let chart = Charts::new(&document)
        .line(
            "revenue-chart",
            &SeriesData {
                labels: vec!["Jan".into(), "Feb".into(), "Mar".into()],
                datasets: vec![Dataset::new([12.0, 19.5, 27.0]).label("Revenue")],
            },
            Value::Null,
        )
        .expect("chart mount exists");
    println!("chart type: {}", chart.kind());

    modal.confirm(
        ConfirmOptions::new()
            .title("Remove user")
            .message("Remove Bob from the workspace?")
            .on_confirm({
                let toast = toast.clone();
                move || {
                    toast.success("User removed");
                }
            }),
    );
    document.dispatch(&Event::click("modal-confirm-action"));
    println!("toasts shown: {}", toast.len());
}
