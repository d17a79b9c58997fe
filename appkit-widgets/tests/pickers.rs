use std::sync::{Arc, Mutex};

use appkit_dom::{find_all_by_class, find_element, Document, Event};
use appkit_widgets::widgets::datepicker::format_date;
use appkit_widgets::widgets::timepicker::to_12_hour;
use appkit_widgets::{
    Clock, DatePicker, DatePickerConfig, DateRangePicker, TimePicker, TimePickerConfig,
};
use chrono::{NaiveDate, NaiveTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn date_picker(document: &Document, config: DatePickerConfig) -> DatePicker {
    document.register_mount("when");
    DatePicker::new(document, "when", config)
}

// ============================================================================
// DatePicker
// ============================================================================

#[test]
fn test_format_date_tokens() {
    let d = date(2024, 6, 5);
    assert_eq!(format_date(d, "YYYY-MM-DD"), "2024-06-05");
    assert_eq!(format_date(d, "DD/MM/YYYY"), "05/06/2024");
}

#[test]
fn test_missing_mount_yields_disabled_picker() {
    let document = Document::new();
    let picker = DatePicker::new(&document, "nowhere", DatePickerConfig::new());
    assert!(!picker.is_enabled());
    picker.set_value(Some(date(2024, 6, 5)));
    assert_eq!(picker.value(), None);
}

#[test]
fn test_calendar_grid_for_known_month() {
    let document = Document::new();
    let picker = date_picker(&document, DatePickerConfig::new());

    // June 2024: 30 days, the 1st is a Saturday (6 leading pads).
    picker.set_value(Some(date(2024, 6, 15)));

    let mounted = document.mount("when").expect("mounted");
    let cells = find_all_by_class(&mounted, "datepicker-day");
    let pads = find_all_by_class(&mounted, "empty");
    assert_eq!(pads.len(), 6);
    assert_eq!(cells.len() - pads.len(), 30);

    let selected = find_all_by_class(&mounted, "selected");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].text_content(), "15");
}

#[test]
fn test_click_day_selects_and_notifies() {
    let document = Document::new();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    let picker = date_picker(
        &document,
        DatePickerConfig::new().on_change(move |d, display| {
            sink.lock().expect("lock").push((d, display.to_string()));
        }),
    );
    picker.set_value(Some(date(2024, 6, 15)));
    let prefix = picker.id_string();

    document.dispatch(&Event::click(format!("{prefix}-input")));
    assert!(picker.is_open());

    document.dispatch(&Event::click(format!("{prefix}-day-20")));
    assert_eq!(picker.value(), Some(date(2024, 6, 20)));
    assert!(!picker.is_open());

    let calls = changes.lock().expect("lock");
    assert_eq!(
        calls.as_slice(),
        &[(Some(date(2024, 6, 20)), "2024-06-20".to_string())]
    );
}

#[test]
fn test_month_navigation() {
    let document = Document::new();
    let picker = date_picker(&document, DatePickerConfig::new());
    picker.set_value(Some(date(2024, 6, 15)));
    let prefix = picker.id_string();

    document.dispatch(&Event::click(format!("{prefix}-next")));
    let mounted = document.mount("when").expect("mounted");
    let title = find_element(&mounted, &format!("{prefix}-title")).expect("title");
    assert_eq!(title.text_content(), "July 2024");

    document.dispatch(&Event::click(format!("{prefix}-prev")));
    document.dispatch(&Event::click(format!("{prefix}-prev")));
    let mounted = document.mount("when").expect("mounted");
    let title = find_element(&mounted, &format!("{prefix}-title")).expect("title");
    assert_eq!(title.text_content(), "May 2024");
}

#[test]
fn test_min_max_disable_days() {
    let document = Document::new();
    let picker = date_picker(
        &document,
        DatePickerConfig::new()
            .min_date(date(2024, 6, 10))
            .max_date(date(2024, 6, 20)),
    );
    picker.set_value(Some(date(2024, 6, 15)));
    let prefix = picker.id_string();

    let mounted = document.mount("when").expect("mounted");
    let day5 = find_element(&mounted, &format!("{prefix}-day-5")).expect("cell");
    assert!(day5.has_class("disabled"));
    let day25 = find_element(&mounted, &format!("{prefix}-day-25")).expect("cell");
    assert!(day25.has_class("disabled"));
    let day15 = find_element(&mounted, &format!("{prefix}-day-15")).expect("cell");
    assert!(!day15.has_class("disabled"));

    // Clicking a disabled day changes nothing.
    document.dispatch(&Event::click(format!("{prefix}-day-5")));
    assert_eq!(picker.value(), Some(date(2024, 6, 15)));
}

#[test]
fn test_clear_button_notifies_with_empty_display() {
    let document = Document::new();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    let picker = date_picker(
        &document,
        DatePickerConfig::new().on_change(move |d, display| {
            sink.lock().expect("lock").push((d, display.to_string()));
        }),
    );
    picker.set_value(Some(date(2024, 6, 15)));
    let prefix = picker.id_string();

    document.dispatch(&Event::click(format!("{prefix}-clear")));
    assert_eq!(picker.value(), None);

    let calls = changes.lock().expect("lock");
    assert_eq!(calls.as_slice(), &[(None, String::new())]);
}

#[test]
fn test_outside_click_closes_calendar() {
    let document = Document::new();
    let picker = date_picker(&document, DatePickerConfig::new());
    let prefix = picker.id_string();

    document.dispatch(&Event::click(format!("{prefix}-input")));
    assert!(picker.is_open());

    document.dispatch(&Event::click("somewhere-else"));
    assert!(!picker.is_open());
}

#[test]
fn test_set_value_does_not_notify() {
    let document = Document::new();
    let changes = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&changes);

    let picker = date_picker(
        &document,
        DatePickerConfig::new().on_change(move |_, _| {
            *sink.lock().expect("lock") += 1;
        }),
    );
    picker.set_value(Some(date(2024, 6, 15)));
    picker.clear();
    assert_eq!(*changes.lock().expect("lock"), 0);
}

// ============================================================================
// TimePicker
// ============================================================================

#[test]
fn test_to_12_hour_conversion() {
    assert_eq!(to_12_hour(time(0, 0)), "12:00 AM");
    assert_eq!(to_12_hour(time(9, 5)), "9:05 AM");
    assert_eq!(to_12_hour(time(12, 0)), "12:00 PM");
    assert_eq!(to_12_hour(time(15, 30)), "3:30 PM");
    assert_eq!(to_12_hour(time(23, 59)), "11:59 PM");
}

#[test]
fn test_time_list_respects_step_and_bounds() {
    let document = Document::new();
    document.register_mount("at");
    let picker = TimePicker::new(
        &document,
        "at",
        TimePickerConfig::new()
            .min_time(time(9, 0))
            .max_time(time(17, 0))
            .step_minutes(30),
    );
    picker.set_value(None);

    let mounted = document.mount("at").expect("mounted");
    let options = find_all_by_class(&mounted, "timepicker-option");
    // 9:00 through 17:00 inclusive at 30-minute steps.
    assert_eq!(options.len(), 17);
    assert_eq!(options[0].text_content(), "09:00");
    assert_eq!(options[16].text_content(), "17:00");
}

#[test]
fn test_time_selection_via_click() {
    let document = Document::new();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    document.register_mount("at");
    let picker = TimePicker::new(
        &document,
        "at",
        TimePickerConfig::new()
            .clock(Clock::H12)
            .on_change(move |t, display| {
                sink.lock().expect("lock").push((t, display.to_string()));
            }),
    );
    let prefix = picker.id_string();

    document.dispatch(&Event::click(format!("{prefix}-input")));
    assert!(picker.is_open());

    // 13:30 is minute 810 of the day.
    document.dispatch(&Event::click(format!("{prefix}-opt-810")));
    assert_eq!(picker.value(), Some(time(13, 30)));
    assert!(!picker.is_open());

    let calls = changes.lock().expect("lock");
    assert_eq!(calls.as_slice(), &[(time(13, 30), "1:30 PM".to_string())]);
}

#[test]
fn test_zero_step_degrades_to_default() {
    let document = Document::new();
    document.register_mount("at");
    let picker = TimePicker::new(
        &document,
        "at",
        TimePickerConfig::new()
            .min_time(time(0, 0))
            .max_time(time(1, 0))
            .step_minutes(0),
    );
    picker.set_value(None);

    let mounted = document.mount("at").expect("mounted");
    // Degraded to 15-minute steps: 00:00, 00:15, 00:30, 00:45, 01:00.
    assert_eq!(find_all_by_class(&mounted, "timepicker-option").len(), 5);
}

// ============================================================================
// DateRangePicker
// ============================================================================

#[test]
fn test_range_picker_couples_both_sides() {
    let document = Document::new();
    document.register_mount("from");
    document.register_mount("to");

    let ranges = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ranges);
    let range = DateRangePicker::new(
        &document,
        "from",
        "to",
        DatePickerConfig::new(),
        Some(Arc::new(move |start, end| {
            sink.lock().expect("lock").push((start, end));
        })),
    );

    // Navigate the start picker to a known month, then click a day.
    range.start_picker().set_value(Some(date(2024, 6, 1)));
    let start_prefix = range.start_picker().id_string();
    document.dispatch(&Event::click(format!("{start_prefix}-day-10")));

    range.end_picker().set_value(Some(date(2024, 6, 1)));
    let end_prefix = range.end_picker().id_string();
    document.dispatch(&Event::click(format!("{end_prefix}-day-20")));

    assert_eq!(
        range.range(),
        (Some(date(2024, 6, 10)), Some(date(2024, 6, 20)))
    );

    let calls = ranges.lock().expect("lock");
    assert_eq!(
        calls.as_slice(),
        &[
            (Some(date(2024, 6, 10)), None),
            (Some(date(2024, 6, 10)), Some(date(2024, 6, 20))),
        ]
    );
}

#[test]
fn test_range_set_and_clear() {
    let document = Document::new();
    document.register_mount("from");
    document.register_mount("to");
    let range = DateRangePicker::new(&document, "from", "to", DatePickerConfig::new(), None);

    range.set_range(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)));
    assert_eq!(
        range.range(),
        (Some(date(2024, 1, 1)), Some(date(2024, 12, 31)))
    );

    range.clear();
    assert_eq!(range.range(), (None, None));
}
