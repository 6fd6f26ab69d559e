pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod lookup;
pub mod model;
pub mod output;

pub use config::Config;
pub use error::LookupError;
pub use lookup::{Lookup, LookupOptions};
pub use model::{CveId, LookupReport, Query, VulnerabilityRow};
