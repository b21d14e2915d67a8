//! Domain types for opstrack
//!
//! - Record: one logged business update
//! - Status / Priority: the closed value sets for the editable columns

pub mod record;

pub use record::{Priority, Record, Status, UnknownLabel};
