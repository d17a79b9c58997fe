//! Time picker widget - a stepped time-of-day list bound to a text input.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use appkit_dom::element::find_element;
use appkit_dom::{Document, Element, Event};
use chrono::{NaiveTime, Timelike};

/// Called with the selected time and its display value.
pub type TimeCallback = Arc<dyn Fn(NaiveTime, &str) + Send + Sync>;

/// Clock face used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    H24,
    H12,
}

/// Convert a time to a 12-hour display string.
pub fn to_12_hour(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

fn display_time(time: NaiveTime, clock: Clock) -> String {
    match clock {
        Clock::H24 => format!("{:02}:{:02}", time.hour(), time.minute()),
        Clock::H12 => to_12_hour(time),
    }
}

/// Unique identifier for a TimePicker widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimePickerId(usize);

impl TimePickerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TimePickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__timepicker_{}", self.0)
    }
}

/// Configuration for a [`TimePicker`].
#[derive(Clone)]
pub struct TimePickerConfig {
    pub clock: Clock,
    /// Minutes between listed times. 0 degrades to 15.
    pub step_minutes: u32,
    pub min_time: NaiveTime,
    pub max_time: NaiveTime,
    pub placeholder: String,
    pub on_change: Option<TimeCallback>,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            clock: Clock::H24,
            step_minutes: 15,
            min_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default(),
            max_time: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default(),
            placeholder: "Select time".to_string(),
            on_change: None,
        }
    }
}

impl TimePickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn step_minutes(mut self, step: u32) -> Self {
        self.step_minutes = step;
        self
    }

    pub fn min_time(mut self, time: NaiveTime) -> Self {
        self.min_time = time;
        self
    }

    pub fn max_time(mut self, time: NaiveTime) -> Self {
        self.max_time = time;
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn on_change(mut self, f: impl Fn(NaiveTime, &str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    fn normalized(mut self) -> Self {
        if self.step_minutes == 0 {
            self.step_minutes = 15;
        }
        self
    }

    /// Total minutes of every listed time, min to max inclusive.
    pub(crate) fn listed_minutes(&self) -> Vec<u32> {
        let min = self.min_time.hour() * 60 + self.min_time.minute();
        let max = self.max_time.hour() * 60 + self.max_time.minute();
        (min..=max).step_by(self.step_minutes as usize).collect()
    }
}

struct TimePickerInner {
    config: TimePickerConfig,
    selected: Option<NaiveTime>,
    open: bool,
}

/// A dropdown list of times at a fixed step, tracking one selected value.
pub struct TimePicker {
    id: TimePickerId,
    document: Document,
    mount_id: String,
    enabled: bool,
    inner: Arc<RwLock<TimePickerInner>>,
}

impl TimePicker {
    pub fn new(document: &Document, mount_id: impl Into<String>, config: TimePickerConfig) -> Self {
        let mount_id = mount_id.into();
        let enabled = document.has_mount(&mount_id);
        if !enabled {
            log::warn!("TimePicker: mount point \"{mount_id}\" not found");
        }

        let picker = Self {
            id: TimePickerId::new(),
            document: document.clone(),
            mount_id,
            enabled,
            inner: Arc::new(RwLock::new(TimePickerInner {
                config: config.normalized(),
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

    pub fn value(&self) -> Option<NaiveTime> {
        self.inner.read().ok().and_then(|guard| guard.selected)
    }

    /// Set the selected time programmatically. Does not fire `on_change`.
    pub fn set_value(&self, time: Option<NaiveTime>) {
        if !self.enabled {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = time;
        }
        self.render();
    }

    pub fn clear(&self) {
        self.set_value(None);
    }

    pub fn is_open(&self) -> bool {
        self.inner.read().map(|guard| guard.open).unwrap_or(false)
    }

    pub fn handle_event(&self, event: &Event) {
        if !self.enabled {
            return;
        }
        let prefix = self.id_string();

        let Event::Click { target } = event else {
            return;
        };

        let Some(target) = target else {
            self.close();
            return;
        };

        if *target == format!("{prefix}-input") {
            if let Ok(mut guard) = self.inner.write() {
                guard.open = !guard.open;
            }
            self.render();
        } else if let Some(minutes) = target.strip_prefix(&format!("{prefix}-opt-")) {
            if let Ok(minutes) = minutes.parse::<u32>() {
                self.pick(minutes);
            }
        } else if !self.contains(target) {
            self.close();
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.document
            .mount(&self.mount_id)
            .map(|root| find_element(&root, id).is_some())
            .unwrap_or(false)
    }

    fn close(&self) {
        let was_open = self
            .inner
            .write()
            .map(|mut guard| std::mem::replace(&mut guard.open, false))
            .unwrap_or(false);
        if was_open {
            self.render();
        }
    }

    fn pick(&self, minutes: u32) {
        let picked = self.inner.write().ok().and_then(|mut guard| {
            let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)?;
            guard.selected = Some(time);
            guard.open = false;
            Some((time, display_time(time, guard.config.clock)))
        });
        let Some((time, display)) = picked else {
            return;
        };
        self.render();

        let callback = self
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.config.on_change.clone());
        if let Some(callback) = callback {
            callback(time, &display);
        }
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }
        let element = match self.inner.read() {
            Ok(guard) => build(&guard, &self.id_string(), &self.mount_id),
            Err(_) => return,
        };
        self.document.set_mount(&self.mount_id, element);
    }
}

impl Clone for TimePicker {
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

fn build(inner: &TimePickerInner, prefix: &str, mount_id: &str) -> Element {
    let display = inner
        .selected
        .map(|time| display_time(time, inner.config.clock))
        .unwrap_or_default();

    let input = Element::text_input(display)
        .id(format!("{prefix}-input"))
        .class("form-input")
        .placeholder(inner.config.placeholder.clone())
        .clickable(true);

    let mut dropdown = Element::box_()
        .id(format!("{prefix}-dropdown"))
        .class("timepicker-dropdown");
    if inner.open {
        dropdown = dropdown.class("show");
    }

    let selected_minutes = inner
        .selected
        .map(|time| time.hour() * 60 + time.minute());
    let mut list = Element::box_().class("timepicker-list");
    for minutes in inner.config.listed_minutes() {
        let Some(time) = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) else {
            continue;
        };
        let mut option = Element::box_()
            .id(format!("{prefix}-opt-{minutes}"))
            .class("timepicker-option")
            .clickable(true)
            .data("time", format!("{:02}:{:02}", minutes / 60, minutes % 60))
            .child(Element::text(display_time(time, inner.config.clock)));
        if selected_minutes == Some(minutes) {
            option = option.class("selected");
        }
        list = list.child(option);
    }
    dropdown = dropdown.child(list);

    Element::box_()
        .id(mount_id)
        .class("timepicker-wrapper")
        .child(input)
        .child(dropdown)
}
