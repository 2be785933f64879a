//! worldreport-rs
//!
//! Umbrella crate over [`worldreport_core`]; it hosts the runnable demos
//! (`cargo run --example basic_usage`).

pub use worldreport_core::*;
