//! Generic department CRUD page, parameterised by a `ResourceDef`.

pub mod ui;
