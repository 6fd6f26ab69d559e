use super::Markup;
use crate::model::{CveId, DetailPage, SkipReason};
use scraper::Html;

impl Markup {
    /// Extracts CVE identifiers from a detail page.
    ///
    /// Each CVE element contributes the `id` of its first identifier-bearing
    /// anchor. Elements that yield nothing are recorded in
    /// [`DetailPage::skipped`] with the reason.
    pub fn parse_detail(&self, html: &str) -> DetailPage {
        let document = Html::parse_document(html);
        let mut page = DetailPage::default();

        for element in document.select(&self.cve) {
            let Some(anchor) = element.select(&self.cve_anchor).next() else {
                page.skipped.push(SkipReason::NoAnchor);
                continue;
            };

            match anchor.value().attr("id").map(str::trim) {
                None => page.skipped.push(SkipReason::MissingId),
                Some("") => page.skipped.push(SkipReason::EmptyId),
                Some(id) => page.cves.push(CveId::new(id)),
            }
        }

        page
    }
}
