//! HTML extraction for the vulnerability database pages.
//!
//! Everything that knows about the site's markup lives here: given raw HTML,
//! [`Markup`] returns [`VulnerabilityRow`]s for a listing page and a
//! [`DetailPage`] for a vulnerability detail page. The fetch and print
//! stages never touch the DOM.
//!
//! # Example
//!
//! ```
//! use snyklookup::config::SelectorConfig;
//! use snyklookup::extract::Markup;
//!
//! let markup = Markup::new(&SelectorConfig::default()).unwrap();
//! let rows = markup.parse_listing("<table></table>");
//! assert!(rows.is_empty());
//! ```
//!
//! [`VulnerabilityRow`]: crate::model::VulnerabilityRow
//! [`DetailPage`]: crate::model::DetailPage

mod detail;
mod listing;

use crate::config::SelectorConfig;
use crate::error::LookupError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for the listing and detail pages.
#[derive(Debug, Clone)]
pub struct Markup {
    row: Selector,
    link: Selector,
    description: Selector,
    cve: Selector,
    cve_anchor: Selector,
}

impl Markup {
    /// Compiles the configured selectors.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidSelector`] naming the first selector
    /// that fails to parse.
    pub fn new(selectors: &SelectorConfig) -> Result<Self, LookupError> {
        Ok(Self {
            row: compile("row", &selectors.row)?,
            link: compile("link", &selectors.link)?,
            description: compile("description", &selectors.description)?,
            cve: compile("cve", &selectors.cve)?,
            cve_anchor: compile("cve_anchor", &selectors.cve_anchor)?,
        })
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, LookupError> {
    Selector::parse(selector).map_err(|e| LookupError::InvalidSelector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Strips all markup from an HTML fragment and trims the result.
///
/// Entities are decoded; inner whitespace is kept as-is.
///
/// ```
/// use snyklookup::extract::strip_markup;
///
/// assert_eq!(strip_markup("  <b>Prototype</b> Pollution "), "Prototype Pollution");
/// assert_eq!(strip_markup("plain text"), "plain text");
/// ```
pub fn strip_markup(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    element_text(html.root_element())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_plain_text_unchanged() {
        assert_eq!(
            strip_markup("Regular Expression Denial of Service"),
            "Regular Expression Denial of Service"
        );
        assert_eq!(strip_markup("\n  Command Injection\t"), "Command Injection");
    }

    #[test]
    fn test_strip_markup_nested_tags() {
        let fragment = "<p>Affected versions of <code>lodash</code> are <em>vulnerable</em>.</p>";
        assert_eq!(strip_markup(fragment), "Affected versions of lodash are vulnerable.");
    }

    #[test]
    fn test_strip_markup_decodes_entities() {
        assert_eq!(strip_markup("a &amp; b"), "a & b");
    }

    #[test]
    fn test_strip_markup_empty() {
        assert_eq!(strip_markup(""), "");
        assert_eq!(strip_markup("<br/>"), "");
    }

    #[test]
    fn test_markup_new_with_defaults() {
        assert!(Markup::new(&SelectorConfig::default()).is_ok());
    }

    #[test]
    fn test_markup_new_rejects_bad_selector() {
        let selectors = SelectorConfig {
            cve: "span[".to_string(),
            ..SelectorConfig::default()
        };

        match Markup::new(&selectors) {
            Err(LookupError::InvalidSelector { field, selector, .. }) => {
                assert_eq!(field, "cve");
                assert_eq!(selector, "span[");
            }
            other => panic!("expected InvalidSelector, got {:?}", other),
        }
    }
}
