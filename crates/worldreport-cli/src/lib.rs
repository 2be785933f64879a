//! worldreport-cli
//! ===============
//!
//! Command-line front-end for the `worldreport-core` report viewer.
//!
//! This crate primarily provides a binary (`worldreport`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install worldreport-cli
//! worldreport --help
//! worldreport report countries --scope Continent --name Europe
//! worldreport browse cities --scope Country --name BRA
//! ```
//!
//! For programmatic access use [`worldreport-core`] directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
