use super::CveId;
use crate::error::LookupError;
use std::fmt;

/// Why a CVE element on a detail page produced no identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The element has no nested anchor carrying an `href`.
    NoAnchor,
    /// The anchor has no `id` attribute.
    MissingId,
    /// The anchor's `id` attribute is blank.
    EmptyId,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoAnchor => "no anchor",
            SkipReason::MissingId => "missing id",
            SkipReason::EmptyId => "empty id",
        }
    }

    /// A span without any anchor is an ordinary "no CVE" case. The other
    /// reasons mean the page no longer matches the expected markup.
    pub fn is_markup_drift(&self) -> bool {
        !matches!(self, SkipReason::NoAnchor)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers found on one detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub cves: Vec<CveId>,
    pub skipped: Vec<SkipReason>,
}

/// A detail page that could not be fetched while running with keep-going.
#[derive(Debug)]
pub struct LinkFailure {
    pub link: String,
    pub error: LookupError,
}

/// Summary of a completed lookup.
#[derive(Debug, Default)]
pub struct LookupReport {
    /// Vulnerability rows on the listing page.
    pub rows: usize,
    /// Identifiers written to the output.
    pub printed: usize,
    /// Identifiers suppressed because they were already printed.
    pub duplicates: usize,
    /// CVE elements that yielded no identifier.
    pub skipped: Vec<SkipReason>,
    /// Detail pages that failed; only populated with keep-going.
    pub failures: Vec<LinkFailure>,
}

impl LookupReport {
    pub fn found_nothing(&self) -> bool {
        self.rows == 0
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|r| **r == reason).count()
    }

    pub fn markup_drift_count(&self) -> usize {
        self.skipped.iter().filter(|r| r.is_markup_drift()).count()
    }
}
