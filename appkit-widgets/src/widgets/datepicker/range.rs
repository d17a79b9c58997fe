//! Date range picker - two coupled date pickers.

use std::sync::Arc;

use appkit_dom::Document;
use chrono::NaiveDate;

use super::state::{DatePicker, DatePickerConfig};

/// Called with the `(start, end)` pair whenever either side changes.
pub type RangeCallback = Arc<dyn Fn(Option<NaiveDate>, Option<NaiveDate>) + Send + Sync>;

/// Two [`DatePicker`]s reporting a combined range.
pub struct DateRangePicker {
    start: DatePicker,
    end: DatePicker,
}

impl DateRangePicker {
    /// Create a range picker over two mount points.
    ///
    /// The given config is applied to both sides (with Start/End
    /// placeholders when the config still carries the default one); any
    /// `on_change` on it is replaced by the range coupling.
    pub fn new(
        document: &Document,
        start_mount: impl Into<String>,
        end_mount: impl Into<String>,
        config: DatePickerConfig,
        on_change: Option<RangeCallback>,
    ) -> Self {
        let default_placeholder = DatePickerConfig::default().placeholder;

        let mut start_config = config.clone();
        if start_config.placeholder == default_placeholder {
            start_config.placeholder = "Start date".to_string();
        }
        let mut end_config = config;
        if end_config.placeholder == default_placeholder {
            end_config.placeholder = "End date".to_string();
        }

        let start = DatePicker::new(document, start_mount, start_config);
        let end = DatePicker::new(document, end_mount, end_config);

        if let Some(callback) = on_change {
            let (s, e, cb) = (start.clone(), end.clone(), callback.clone());
            start.set_on_change(move |_, _| cb(s.value(), e.value()));
            let (s, e) = (start.clone(), end.clone());
            end.set_on_change(move |_, _| callback(s.value(), e.value()));
        }

        Self { start, end }
    }

    /// The selected `(start, end)` pair.
    pub fn range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.start.value(), self.end.value())
    }

    /// Set both sides programmatically. Does not fire the range callback.
    pub fn set_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.start.set_value(start);
        self.end.set_value(end);
    }

    pub fn clear(&self) {
        self.start.clear();
        self.end.clear();
    }

    pub fn start_picker(&self) -> &DatePicker {
        &self.start
    }

    pub fn end_picker(&self) -> &DatePicker {
        &self.end
    }
}
