pub mod api;
pub mod date_format;
pub mod error;
pub mod form;
pub mod number_format;
pub mod pagination;
pub mod request_seq;
pub mod select;
pub mod table;
