//! Plain-text output: one item per line on the given writer.

use crate::model::CveId;
use std::collections::HashSet;
use std::io::{self, Write};

/// Line printed when the listing page has no vulnerability rows.
pub const NO_VULNERABILITIES: &str = "No known vulnerabilities";

/// Writes descriptions and identifiers, suppressing repeated identifiers
/// when deduplication is enabled.
pub struct LinePrinter<W: Write> {
    out: W,
    seen: Option<HashSet<CveId>>,
    printed: usize,
    duplicates: usize,
}

impl<W: Write> LinePrinter<W> {
    pub fn new(out: W, deduplicate: bool) -> Self {
        Self {
            out,
            seen: deduplicate.then(HashSet::new),
            printed: 0,
            duplicates: 0,
        }
    }

    pub fn description(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Prints an identifier unless it was already printed. Returns whether
    /// a line was written.
    pub fn cve(&mut self, id: &CveId) -> io::Result<bool> {
        if let Some(seen) = &mut self.seen {
            if !seen.insert(id.clone()) {
                self.duplicates += 1;
                return Ok(false);
            }
        }

        writeln!(self.out, "{}", id)?;
        self.out.flush()?;
        self.printed += 1;
        Ok(true)
    }

    pub fn no_vulnerabilities(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", NO_VULNERABILITIES)?;
        self.out.flush()
    }

    pub fn printed(&self) -> usize {
        self.printed
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
