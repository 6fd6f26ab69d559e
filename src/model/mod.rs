//! Core data types for lookups, scraped rows, and run reports.
//!
//! - [`Query`] - The package and version being looked up
//! - [`VulnerabilityRow`] - One vulnerability entry from the listing page
//! - [`CveId`] - An identifier read from a detail page
//! - [`DetailPage`] - Identifiers and skipped elements of one detail page
//! - [`LookupReport`] - Counters and failures collected over a run
//!
//! # Example
//!
//! ```
//! use snyklookup::Query;
//!
//! let query = Query::new("lodash", "4.17.20");
//! assert_eq!(query.to_string(), "lodash@4.17.20");
//! ```

mod query;
mod report;

pub use query::*;
pub use report::*;
