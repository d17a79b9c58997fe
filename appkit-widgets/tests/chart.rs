use appkit_dom::Document;
use appkit_widgets::chart::{hex_to_rgba, SeriesKind, PALETTE};
use appkit_widgets::{Charts, Dataset, SeriesData, SliceData};
use serde_json::{json, Value};

fn series() -> SeriesData {
    SeriesData {
        labels: vec!["Jan".into(), "Feb".into(), "Mar".into()],
        datasets: vec![
            Dataset::new([10.0, 20.0, 30.0]).label("Revenue"),
            Dataset::new([5.0, 15.0, 25.0]),
        ],
    }
}

fn charts() -> (Document, Charts) {
    let document = Document::new();
    document.register_mount("viz");
    let charts = Charts::new(&document);
    (document, charts)
}

#[test]
fn test_hex_to_rgba() {
    assert_eq!(hex_to_rgba("#2563eb", 0.1), "rgba(37, 99, 235, 0.1)");
    assert_eq!(hex_to_rgba("#ffffff", 1.0), "rgba(255, 255, 255, 1)");
    assert_eq!(hex_to_rgba("bad", 0.5), "rgba(0, 0, 0, 0.5)");
}

#[test]
fn test_missing_mount_returns_none() {
    let document = Document::new();
    let charts = Charts::new(&document);
    assert!(charts.line("nowhere", &series(), Value::Null).is_none());
}

#[test]
fn test_line_chart_defaults() {
    let (_document, charts) = charts();
    let handle = charts.line("viz", &series(), Value::Null).expect("chart");
    let config = handle.config();

    assert_eq!(config["type"], json!("line"));
    assert_eq!(config["data"]["labels"], json!(["Jan", "Feb", "Mar"]));

    let first = &config["data"]["datasets"][0];
    assert_eq!(first["label"], json!("Revenue"));
    assert_eq!(first["borderColor"], json!(PALETTE[0]));
    assert_eq!(first["backgroundColor"], json!("transparent"));
    assert_eq!(first["fill"], json!(false));

    // Unlabeled datasets get a numbered fallback and the next palette color.
    let second = &config["data"]["datasets"][1];
    assert_eq!(second["label"], json!("Dataset 2"));
    assert_eq!(second["borderColor"], json!(PALETTE[1]));

    assert_eq!(config["options"]["plugins"]["legend"]["position"], json!("bottom"));
    assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], json!(true));
}

#[test]
fn test_area_chart_fills_every_dataset() {
    let (_document, charts) = charts();
    let handle = charts.area("viz", &series(), Value::Null).expect("chart");
    let config = handle.config();

    let first = &config["data"]["datasets"][0];
    assert_eq!(first["fill"], json!(true));
    assert_eq!(first["backgroundColor"], json!(hex_to_rgba(PALETTE[0], 0.1)));
}

#[test]
fn test_bar_and_horizontal_bar() {
    let (_document, charts) = charts();

    let bar = charts.bar("viz", &series(), Value::Null).expect("chart");
    let config = bar.config();
    assert_eq!(config["type"], json!("bar"));
    assert_eq!(config["data"]["datasets"][0]["borderRadius"], json!(6));
    assert!(config["options"].get("indexAxis").is_none());

    let horizontal = charts
        .horizontal_bar("viz", &series(), Value::Null)
        .expect("chart");
    let config = horizontal.config();
    assert_eq!(config["options"]["indexAxis"], json!("y"));
    assert_eq!(config["options"]["scales"]["x"]["beginAtZero"], json!(true));
}

#[test]
fn test_doughnut_and_pie() {
    let (_document, charts) = charts();
    let data = SliceData {
        labels: vec!["A".into(), "B".into()],
        values: vec![60.0, 40.0],
        colors: None,
    };

    let doughnut = charts.doughnut("viz", &data, Value::Null).expect("chart");
    let config = doughnut.config();
    assert_eq!(config["type"], json!("doughnut"));
    assert_eq!(config["options"]["cutout"], json!("70%"));
    assert_eq!(
        config["data"]["datasets"][0]["backgroundColor"],
        json!([PALETTE[0], PALETTE[1]])
    );

    let pie = charts.pie("viz", &data, Value::Null).expect("chart");
    let config = pie.config();
    assert_eq!(config["type"], json!("pie"));
    assert_eq!(config["options"]["cutout"], json!(0));
}

#[test]
fn test_mixed_chart_per_series_kinds() {
    let (_document, charts) = charts();
    let data = SeriesData {
        labels: vec!["Q1".into(), "Q2".into()],
        datasets: vec![
            Dataset::new([1.0, 2.0]).kind(SeriesKind::Bar),
            Dataset::new([3.0, 4.0]).kind(SeriesKind::Line).color("#ff0000"),
        ],
    };

    let handle = charts.mixed("viz", &data, Value::Null).expect("chart");
    let config = handle.config();
    assert_eq!(config["type"], json!("bar"));

    let bar = &config["data"]["datasets"][0];
    assert_eq!(bar["type"], json!("bar"));
    assert_eq!(bar["borderRadius"], json!(6));

    let line = &config["data"]["datasets"][1];
    assert_eq!(line["type"], json!("line"));
    assert_eq!(line["backgroundColor"], json!("transparent"));
    assert_eq!(line["borderColor"], json!("#ff0000"));
    assert_eq!(line["borderWidth"], json!(2));
}

#[test]
fn test_caller_options_merge_over_defaults() {
    let (_document, charts) = charts();
    let handle = charts
        .line("viz", &series(), json!({"animation": false, "scales": {"y": {"max": 100}}}))
        .expect("chart");
    let config = handle.config();

    assert_eq!(config["options"]["animation"], json!(false));
    // Shallow merge: the caller's scales replace the built ones wholesale.
    assert_eq!(config["options"]["scales"]["y"]["max"], json!(100));
}

#[test]
fn test_update_replaces_labels_and_data() {
    let (document, charts) = charts();
    let handle = charts.line("viz", &series(), Value::Null).expect("chart");

    handle.update(&SeriesData {
        labels: vec!["Apr".into(), "May".into()],
        datasets: vec![Dataset::new([7.0, 8.0])],
    });

    let config = handle.config();
    assert_eq!(config["data"]["labels"], json!(["Apr", "May"]));
    assert_eq!(config["data"]["datasets"][0]["data"], json!([7.0, 8.0]));
    // The second dataset keeps its original data.
    assert_eq!(config["data"]["datasets"][1]["data"], json!([5.0, 15.0, 25.0]));

    // The mount carries the serialized latest config.
    let mounted = document.mount("viz").expect("mounted");
    let parked: Value =
        serde_json::from_str(mounted.get_data("config").expect("config attr")).expect("json");
    assert_eq!(parked["data"]["labels"], json!(["Apr", "May"]));
}

#[test]
fn test_destroy_clears_mount() {
    let (document, charts) = charts();
    let handle = charts.line("viz", &series(), Value::Null).expect("chart");
    handle.destroy();

    let mounted = document.mount("viz").expect("mounted");
    assert!(!mounted.has_class("chart"));
    assert!(mounted.content.is_empty());
}
