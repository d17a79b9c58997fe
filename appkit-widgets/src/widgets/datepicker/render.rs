//! Calendar markup for the date picker.

use appkit_dom::Element;
use chrono::{Datelike, Local, NaiveDate};

use super::state::{format_date, DatePickerInner};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub(super) fn days_in_month(first: NaiveDate) -> u32 {
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first);
    next.pred_opt().map(|d| d.day()).unwrap_or(28)
}

pub(super) fn build(inner: &DatePickerInner, prefix: &str, mount_id: &str) -> Element {
    let display = inner
        .selected
        .map(|date| format_date(date, &inner.config.format))
        .unwrap_or_default();

    let input = Element::text_input(display)
        .id(format!("{prefix}-input"))
        .class("form-input")
        .placeholder(inner.config.placeholder.clone())
        .clickable(true);

    let mut calendar = Element::box_()
        .id(format!("{prefix}-calendar"))
        .class("datepicker-calendar");
    if inner.open {
        calendar = calendar.class("show");
    }
    calendar = calendar
        .child(build_calendar_header(inner, prefix))
        .child(build_weekdays(prefix))
        .child(build_days(inner, prefix));
    if inner.config.show_today_btn {
        calendar = calendar.child(build_footer(prefix));
    }

    Element::box_()
        .id(mount_id)
        .class("datepicker-wrapper")
        .child(input)
        .child(calendar)
}

fn build_calendar_header(inner: &DatePickerInner, prefix: &str) -> Element {
    let month = inner.visible_month;
    let title = format!(
        "{} {}",
        MONTH_NAMES[(month.month0()) as usize],
        month.year()
    );

    Element::box_()
        .class("datepicker-header")
        .child(
            Element::button("\u{2039}")
                .id(format!("{prefix}-prev"))
                .class("datepicker-prev"),
        )
        .child(
            Element::box_()
                .id(format!("{prefix}-title"))
                .class("datepicker-title")
                .child(Element::text(title)),
        )
        .child(
            Element::button("\u{203a}")
                .id(format!("{prefix}-next"))
                .class("datepicker-next"),
        )
}

fn build_weekdays(prefix: &str) -> Element {
    Element::box_().class("datepicker-weekdays").children(
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, day)| {
                Element::text(*day)
                    .id(format!("{prefix}-weekday-{i}"))
                    .class("datepicker-weekday")
            }),
    )
}

fn build_days(inner: &DatePickerInner, prefix: &str) -> Element {
    let first = inner.visible_month;
    let today = Local::now().date_naive();
    let lead = first.weekday().num_days_from_sunday();
    let days = days_in_month(first);

    let mut grid = Element::box_().class("datepicker-days");

    for i in 0..lead {
        grid = grid.child(
            Element::box_()
                .id(format!("{prefix}-pad-{i}"))
                .class("datepicker-day")
                .class("empty"),
        );
    }

    for day in 1..=days {
        let Some(date) = first.with_day(day) else {
            continue;
        };
        let disabled = inner.config.is_disabled(date);

        let mut cell = Element::box_()
            .id(format!("{prefix}-day-{day}"))
            .class("datepicker-day")
            .clickable(!disabled)
            .child(Element::text(day.to_string()));
        if date == today {
            cell = cell.class("today");
        }
        if inner.selected == Some(date) {
            cell = cell.class("selected");
        }
        if disabled {
            cell = cell.class("disabled").disabled(true);
        }
        grid = grid.child(cell);
    }

    grid
}

fn build_footer(prefix: &str) -> Element {
    Element::box_()
        .class("datepicker-footer")
        .child(
            Element::button("Clear")
                .id(format!("{prefix}-clear"))
                .class("datepicker-clear"),
        )
        .child(
            Element::button("Today")
                .id(format!("{prefix}-today"))
                .class("datepicker-today"),
        )
}
