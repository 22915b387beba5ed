//! Extraction and reconciliation pipeline.
//!
//! ## Module Structure
//!
//! - `scan`: source tree enumeration
//! - `extract`: tokenizer-based literal extraction and escape decoding
//! - `filter`: needs-translation predicate
//! - `mapping`: tab-separated mapping table loader
//! - `catalog`: `.ts` catalog document and synchronizer
//! - `missing`: missing-translation report
//! - `error`: fatal error kinds

pub mod catalog;
pub mod error;
pub mod extract;
pub mod filter;
pub mod mapping;
pub mod missing;
pub mod scan;

pub use catalog::{Catalog, CatalogEntry, SyncOutcome, TranslationStatus, sync_catalog};
pub use error::SyncError;
pub use extract::{LiteralExtractor, SourceLiteral};
pub use filter::{NeedsTranslation, ScriptFilter};
pub use mapping::MappingTable;
pub use missing::{MissingReport, find_missing};
pub use scan::SourceScanner;
