//! tssync - keeps Qt `.ts` translation catalogs in sync with a mapping table
//!
//! tssync is a CLI tool and library for C++/Qt projects. It extracts the
//! string literals passed to translation markers such as `tr("...")`, reports
//! the ones that still lack a translation, and fills a Qt Linguist catalog
//! from a tab-separated source-to-translation table.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, mapping and catalog synchronization
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
