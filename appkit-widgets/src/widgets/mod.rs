pub mod datatable;
pub mod datepicker;
pub mod dropdown;
pub mod modal;
pub mod selection;
pub mod timepicker;
pub mod toast;
