//! The fetch → extract → fetch-per-link → print pipeline.
//!
//! [`Lookup`] drives a [`PageFetcher`] and a [`Markup`] extractor and writes
//! results through a [`LinePrinter`] as soon as they are known, so output
//! printed before a fatal failure stays on the terminal.
//!
//! # Example
//!
//! ```no_run
//! use snyklookup::{Config, Lookup, Query};
//! use snyklookup::output::LinePrinter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let lookup = Lookup::from_config(&config)?;
//!     let mut printer = LinePrinter::new(std::io::stdout(), config.deduplicate);
//!
//!     let report = lookup.run(&Query::new("lodash", "4.17.20"), &mut printer).await?;
//!     eprintln!("{} identifiers", report.printed);
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::LookupError;
use crate::extract::Markup;
use crate::fetch::{Endpoints, HttpFetcher, PageFetcher};
use crate::model::{DetailPage, LinkFailure, LookupReport, Query, VulnerabilityRow};
use crate::output::LinePrinter;
use futures::stream::{self, StreamExt};
use std::io::Write;
use tracing::{debug, info, warn};

/// Behaviour switches for a lookup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub include_descriptions: bool,
    pub keep_going: bool,
    pub parallel: bool,
    pub max_concurrency: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            include_descriptions: false,
            keep_going: false,
            parallel: false,
            max_concurrency: 4,
        }
    }
}

impl LookupOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            include_descriptions: config.include_descriptions,
            keep_going: config.keep_going,
            parallel: config.parallel,
            max_concurrency: config.max_concurrency,
        }
    }
}

pub struct Lookup<F> {
    fetcher: F,
    endpoints: Endpoints,
    markup: Markup,
    options: LookupOptions,
}

impl Lookup<HttpFetcher> {
    /// Builds an HTTP-backed lookup from configuration.
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Ok(Self::new(
            HttpFetcher::from_config(config)?,
            Endpoints::new(&config.base_url)?,
            Markup::new(&config.selectors)?,
            LookupOptions::from_config(config),
        ))
    }
}

impl<F: PageFetcher> Lookup<F> {
    pub fn new(fetcher: F, endpoints: Endpoints, markup: Markup, options: LookupOptions) -> Self {
        Self {
            fetcher,
            endpoints,
            markup,
            options,
        }
    }

    /// Looks up `query` and prints its rows as they are resolved.
    pub async fn run<W: Write>(
        &self,
        query: &Query,
        printer: &mut LinePrinter<W>,
    ) -> Result<LookupReport, LookupError> {
        let rows = self.fetch_listing(query).await?;
        self.resolve(&rows, printer).await
    }

    /// Fetches the listing page for `query` and extracts its rows.
    pub async fn fetch_listing(&self, query: &Query) -> Result<Vec<VulnerabilityRow>, LookupError> {
        let url = self.endpoints.listing(query)?;
        info!(%query, %url, "looking up package");

        let body = self.fetcher.fetch(&url).await?;
        let rows = self.markup.parse_listing(&body);

        info!(%query, rows = rows.len(), "listing parsed");
        Ok(rows)
    }

    /// Prints descriptions and identifiers for each row, in row order and
    /// then in-page order.
    ///
    /// Without keep-going, the first failing detail page is returned as the
    /// error; lines already printed stay printed.
    pub async fn resolve<W: Write>(
        &self,
        rows: &[VulnerabilityRow],
        printer: &mut LinePrinter<W>,
    ) -> Result<LookupReport, LookupError> {
        let mut report = LookupReport {
            rows: rows.len(),
            ..Default::default()
        };

        if rows.is_empty() {
            printer.no_vulnerabilities()?;
            return Ok(report);
        }

        let mut prefetched = if self.options.parallel {
            Some(self.prefetch(rows).await.into_iter())
        } else {
            None
        };

        for row in rows {
            if self.options.include_descriptions {
                for text in &row.descriptions {
                    printer.description(text)?;
                }
            }

            for link in &row.links {
                let page = match prefetched.as_mut().and_then(Iterator::next) {
                    Some(page) => page,
                    None => self.fetch_detail(link).await,
                };

                match page {
                    Ok(page) => self.record(link, page, printer, &mut report)?,
                    Err(error) if self.options.keep_going => {
                        warn!(link = %link, %error, "detail page failed, continuing");
                        report.failures.push(LinkFailure {
                            link: link.clone(),
                            error,
                        });
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        report.printed = printer.printed();
        report.duplicates = printer.duplicates();
        Ok(report)
    }

    async fn fetch_detail(&self, link: &str) -> Result<DetailPage, LookupError> {
        let url = self.endpoints.detail(link)?;
        let body = self.fetcher.fetch(&url).await?;
        Ok(self.markup.parse_detail(&body))
    }

    /// Fetches every detail page of every row, at most `max_concurrency` at
    /// a time. Results come back in link order.
    async fn prefetch(&self, rows: &[VulnerabilityRow]) -> Vec<Result<DetailPage, LookupError>> {
        let links = rows.iter().flat_map(|row| row.links.iter());
        debug!(
            links = rows.iter().map(|row| row.links.len()).sum::<usize>(),
            "prefetching detail pages"
        );

        stream::iter(links)
            .map(|link| self.fetch_detail(link))
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await
    }

    fn record<W: Write>(
        &self,
        link: &str,
        page: DetailPage,
        printer: &mut LinePrinter<W>,
        report: &mut LookupReport,
    ) -> Result<(), LookupError> {
        for reason in page.skipped {
            if reason.is_markup_drift() {
                warn!(link, %reason, "CVE element without identifier");
            } else {
                debug!(link, %reason, "CVE element without identifier");
            }
            report.skipped.push(reason);
        }

        for id in &page.cves {
            printer.cve(id)?;
        }

        Ok(())
    }
}
