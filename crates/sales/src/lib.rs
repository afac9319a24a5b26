//! Sales domain module: sales notes, listing and reporting.
//!
//! This crate contains business rules for sales notes, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod note;
pub mod query;
pub mod report;

pub use note::{OrderStatus, PaymentStatus, SalesNote, SalesNoteLine, round_currency};
pub use query::{PAGE_SIZE, SalesNotePage, SalesNoteQuery, paginate};
pub use report::{ReportFilter, ReportedSale, SalesReport, build_report};
