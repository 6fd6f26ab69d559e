use std::fmt;

/// A package/version pair supplied once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub package: String,
    pub version: String,
}

impl Query {
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.package, self.version)
    }
}

/// One vulnerability entry scraped from the listing page.
///
/// Both lists keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VulnerabilityRow {
    /// Plain-text description paragraphs.
    pub descriptions: Vec<String>,
    /// Relative paths to detail pages.
    pub links: Vec<String>,
}

/// A vulnerability identifier, e.g. `CVE-2021-23337`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CveId(String);

impl CveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
