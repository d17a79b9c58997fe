//! Event routing for the date picker.

use appkit_dom::element::find_element;
use appkit_dom::Event;
use chrono::{Datelike, Local};

use super::state::{first_of_month, DatePicker};

impl DatePicker {
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
            self.toggle_open();
        } else if *target == format!("{prefix}-prev") {
            self.shift_month(-1);
        } else if *target == format!("{prefix}-next") {
            self.shift_month(1);
        } else if let Some(day) = target.strip_prefix(&format!("{prefix}-day-")) {
            if let Ok(day) = day.parse::<u32>() {
                self.pick_day(day);
            }
        } else if *target == format!("{prefix}-today") {
            self.pick_today();
        } else if *target == format!("{prefix}-clear") {
            self.pick_clear();
        } else if !self.contains(target) {
            // Click landed outside this picker entirely.
            self.close();
        }
    }

    /// Whether an element id lives inside this picker's mount.
    fn contains(&self, id: &str) -> bool {
        self.document
            .mount(&self.mount_id)
            .map(|root| find_element(&root, id).is_some())
            .unwrap_or(false)
    }

    fn toggle_open(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.open = !guard.open;
        }
        self.render();
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

    fn shift_month(&self, delta: i32) {
        if let Ok(mut guard) = self.inner.write() {
            let month = guard.visible_month;
            let shifted = if delta < 0 {
                month.checked_sub_months(chrono::Months::new(1))
            } else {
                month.checked_add_months(chrono::Months::new(1))
            };
            if let Some(shifted) = shifted {
                guard.visible_month = shifted;
            }
        }
        self.render();
    }

    fn pick_day(&self, day: u32) {
        let picked = self.inner.write().ok().and_then(|mut guard| {
            let date = guard.visible_month.with_day(day)?;
            if guard.config.is_disabled(date) {
                return None;
            }
            guard.selected = Some(date);
            guard.open = false;
            Some(date)
        });
        if let Some(date) = picked {
            self.render();
            self.notify(Some(date));
        }
    }

    fn pick_today(&self) {
        let today = Local::now().date_naive();
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = Some(today);
            guard.visible_month = first_of_month(today);
            guard.open = false;
        }
        self.render();
        self.notify(Some(today));
    }

    fn pick_clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = None;
            guard.open = false;
        }
        self.render();
        self.notify(None);
    }
}
