//! opstrack - a single-user business operations tracker
//!
//! Updates are logged through a form, merged in from CSV files, and edited as
//! a whole table. The store lives in memory for one session; the dashboard
//! summarises it by status and category.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod id;
pub mod import;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod stats;
pub mod store;

pub use error::{Result, TrackerError};
