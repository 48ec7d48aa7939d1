//! Application services - Use case implementations

mod sheet_service;

pub use sheet_service::{SheetError, SheetService};
