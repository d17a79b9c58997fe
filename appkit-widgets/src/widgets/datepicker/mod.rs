//! Date picker widget - calendar popup bound to a text input.

mod events;
mod range;
mod render;
mod state;

pub use range::{DateRangePicker, RangeCallback};
pub use state::{format_date, DateCallback, DatePicker, DatePickerConfig};
