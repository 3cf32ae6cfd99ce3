//! Audit logging for budget writes
//!
//! Records every budget create, update and delete with before/after values
//! in an append-only audit log.
//!
//! - `AuditEntry`: one operation on one budget, tagged with what caused it
//!   (manual edit, carry-forward, spend-seeded).
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, WriteOrigin};
pub use logger::AuditLogger;
