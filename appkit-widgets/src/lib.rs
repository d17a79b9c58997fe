//! Application starter-kit widgets.
//!
//! Independent UI widgets that render [`appkit_dom::Element`] trees into
//! named mount points of a shared [`appkit_dom::Document`] and react to
//! dispatched events. Widgets are self-contained: each owns its view state
//! behind an `Arc` and re-renders wholesale on every state change.

pub mod chart;
pub mod debounce;
pub mod widgets;

pub use chart::{ChartHandle, Charts, Dataset, SeriesData, SliceData};
pub use debounce::Debouncer;
pub use widgets::datatable::{Column, DataTable, DataTableConfig, Row, SortDirection};
pub use widgets::datepicker::{DatePicker, DatePickerConfig, DateRangePicker};
pub use widgets::dropdown::Dropdown;
pub use widgets::modal::{ConfirmOptions, Modal};
pub use widgets::timepicker::{Clock, TimePicker, TimePickerConfig};
pub use widgets::toast::{Toast, ToastLevel};
