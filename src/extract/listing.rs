use super::{element_text, Markup};
use crate::model::VulnerabilityRow;
use scraper::Html;

impl Markup {
    /// Extracts the vulnerability rows of a listing page in document order.
    ///
    /// Links are trimmed; anchors whose `href` is blank are dropped. Empty
    /// description paragraphs are dropped too.
    pub fn parse_listing(&self, html: &str) -> Vec<VulnerabilityRow> {
        let document = Html::parse_document(html);

        document
            .select(&self.row)
            .map(|row| {
                let descriptions = row
                    .select(&self.description)
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect();

                let links = row
                    .select(&self.link)
                    .filter_map(|anchor| anchor.value().attr("href"))
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .map(str::to_string)
                    .collect();

                VulnerabilityRow {
                    descriptions,
                    links,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SelectorConfig;
    use crate::extract::Markup;
    use crate::model::VulnerabilityRow;

    fn markup() -> Markup {
        Markup::new(&SelectorConfig::default()).unwrap()
    }

    const LISTING: &str = r#"
<html><body>
<table>
  <tr class="vue--table__row">
    <td>
      <a class="vue--anchor" href=" /vuln/SNYK-JS-LODASH-1040724 ">Command Injection</a>
      <p>Affected versions of <strong>lodash</strong> are vulnerable.</p>
    </td>
  </tr>
  <tr class="vue--table__row">
    <td>
      <a class="vue--anchor" href="/vuln/SNYK-JS-LODASH-1018905">ReDoS</a>
      <a class="vue--anchor" href="/vuln/SNYK-JS-LODASH-1018906">ReDoS (trim)</a>
      <p>First paragraph.</p>
      <p>   </p>
      <p>Second paragraph.</p>
    </td>
  </tr>
  <tr class="other-row">
    <td><a class="vue--anchor" href="/vuln/IGNORED">ignored</a></td>
  </tr>
</table>
</body></html>
"#;

    #[test]
    fn test_parse_listing_rows_in_order() {
        let rows = markup().parse_listing(LISTING);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            VulnerabilityRow {
                descriptions: vec!["Affected versions of lodash are vulnerable.".to_string()],
                links: vec!["/vuln/SNYK-JS-LODASH-1040724".to_string()],
            }
        );
        assert_eq!(
            rows[1].links,
            vec![
                "/vuln/SNYK-JS-LODASH-1018905".to_string(),
                "/vuln/SNYK-JS-LODASH-1018906".to_string(),
            ]
        );
        assert_eq!(
            rows[1].descriptions,
            vec!["First paragraph.".to_string(), "Second paragraph.".to_string()]
        );
    }

    #[test]
    fn test_parse_listing_no_rows() {
        let html = r#"<html><body><p>No known vulnerabilities</p></body></html>"#;
        assert!(markup().parse_listing(html).is_empty());
    }

    #[test]
    fn test_parse_listing_ignores_anchor_without_class_or_href() {
        let html = r#"
<table>
  <tr class="vue--table__row">
    <td>
      <a href="/vuln/PLAIN">plain anchor</a>
      <a class="vue--anchor">no href</a>
      <a class="vue--anchor" href="   ">blank href</a>
    </td>
  </tr>
</table>"#;

        let rows = markup().parse_listing(html);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].links.is_empty());
        assert!(rows[0].descriptions.is_empty());
    }

    #[test]
    fn test_parse_listing_with_custom_selectors() {
        let selectors = SelectorConfig {
            row: "li.issue".to_string(),
            link: "a.issue-link[href]".to_string(),
            ..SelectorConfig::default()
        };
        let markup = Markup::new(&selectors).unwrap();
        let html = r#"<ul><li class="issue"><a class="issue-link" href="/vuln/X">x</a></li></ul>"#;

        let rows = markup.parse_listing(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].links, vec!["/vuln/X".to_string()]);
    }
}
