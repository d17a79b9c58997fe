//! Date picker state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use appkit_dom::Document;
use chrono::{Datelike, Local, NaiveDate};

use super::render;

/// Called with the newly selected date (or `None` on clear) and its
/// formatted display value.
pub type DateCallback = Arc<dyn Fn(Option<NaiveDate>, &str) + Send + Sync>;

/// Unique identifier for a DatePicker widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatePickerId(usize);

impl DatePickerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for DatePickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__datepicker_{}", self.0)
    }
}

/// Format a date with `YYYY` / `MM` / `DD` tokens.
pub fn format_date(date: NaiveDate, format: &str) -> String {
    format
        .replace("YYYY", &format!("{:04}", date.year()))
        .replace("MM", &format!("{:02}", date.month()))
        .replace("DD", &format!("{:02}", date.day()))
}

/// Configuration for a [`DatePicker`].
#[derive(Clone)]
pub struct DatePickerConfig {
    /// Display format, `YYYY` / `MM` / `DD` tokens.
    pub format: String,
    /// Earliest selectable date.
    pub min_date: Option<NaiveDate>,
    /// Latest selectable date.
    pub max_date: Option<NaiveDate>,
    /// Render the Clear/Today footer.
    pub show_today_btn: bool,
    /// Input placeholder.
    pub placeholder: String,
    /// Invoked on every selection change.
    pub on_change: Option<DateCallback>,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            format: "YYYY-MM-DD".to_string(),
            min_date: None,
            max_date: None,
            show_today_btn: true,
            placeholder: "Select date".to_string(),
            on_change: None,
        }
    }
}

impl DatePickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn show_today_btn(mut self, show: bool) -> Self {
        self.show_today_btn = show;
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn on_change(mut self, f: impl Fn(Option<NaiveDate>, &str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Whether a date falls outside the configured min/max bounds.
    pub(super) fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min) || self.max_date.is_some_and(|max| date > max)
    }
}

pub(super) struct DatePickerInner {
    pub config: DatePickerConfig,
    /// First day of the month currently shown in the calendar.
    pub visible_month: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub open: bool,
}

/// A calendar popup tracking one selected date.
///
/// Renders a readonly input plus a calendar that opens on click; clicking
/// outside closes it. A picker constructed against a missing mount point is
/// a disabled no-op instance.
pub struct DatePicker {
    id: DatePickerId,
    pub(super) document: Document,
    pub(super) mount_id: String,
    pub(super) enabled: bool,
    pub(super) inner: Arc<RwLock<DatePickerInner>>,
}

impl DatePicker {
    pub fn new(document: &Document, mount_id: impl Into<String>, config: DatePickerConfig) -> Self {
        let mount_id = mount_id.into();
        let enabled = document.has_mount(&mount_id);
        if !enabled {
            log::warn!("DatePicker: mount point \"{mount_id}\" not found");
        }

        let today = Local::now().date_naive();
        let picker = Self {
            id: DatePickerId::new(),
            document: document.clone(),
            mount_id,
            enabled,
            inner: Arc::new(RwLock::new(DatePickerInner {
                config,
                visible_month: first_of_month(today),
                selected: None,
                open: false,
            })),
        };

        if picker.enabled {
            let handler = picker.clone();
            document.add_listener(
                picker.id_string(),
                Arc::new(move |event| handler.handle_event(event)),
            );
            picker.render();
        }
        picker
    }

    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The currently selected date.
    pub fn value(&self) -> Option<NaiveDate> {
        self.inner.read().ok().and_then(|guard| guard.selected)
    }

    /// Set the selected date programmatically. Does not fire `on_change`.
    pub fn set_value(&self, date: Option<NaiveDate>) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = date;
            if let Some(date) = date {
                guard.visible_month = first_of_month(date);
            }
        }
        self.render();
    }

    /// Clear the selection. Does not fire `on_change`.
    pub fn clear(&self) {
        self.set_value(None);
    }

    /// Whether the calendar popup is open.
    pub fn is_open(&self) -> bool {
        self.inner.read().map(|guard| guard.open).unwrap_or(false)
    }

    /// Replace the change callback. Used by [`DateRangePicker`] to couple
    /// two pickers after construction.
    ///
    /// [`DateRangePicker`]: super::DateRangePicker
    pub fn set_on_change(&self, f: impl Fn(Option<NaiveDate>, &str) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.config.on_change = Some(Arc::new(f));
        }
    }

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

    /// Notify the configured callback of a selection change.
    pub(super) fn notify(&self, date: Option<NaiveDate>) {
        let notify = self.inner.read().ok().and_then(|guard| {
            let callback = guard.config.on_change.clone()?;
            let display = date
                .map(|d| format_date(d, &guard.config.format))
                .unwrap_or_default();
            Some((callback, display))
        });
        if let Some((callback, display)) = notify {
            callback(date, &display);
        }
    }
}

impl Clone for DatePicker {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            document: self.document.clone(),
            mount_id: self.mount_id.clone(),
            enabled: self.enabled,
            inner: Arc::clone(&self.inner),
        }
    }
}

/// The first day of a date's month.
pub(super) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
