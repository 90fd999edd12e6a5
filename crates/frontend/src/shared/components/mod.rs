pub mod data_table;
pub mod form_modal;
pub mod pagination_controls;
pub mod print_modal;
pub mod ui;
