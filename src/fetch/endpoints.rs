use crate::error::LookupError;
use crate::model::Query;
use url::Url;

/// URL templates for the listing and detail pages.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parses the site root. A trailing slash is added when missing so that
    /// a base with a path prefix keeps it for every page built from it.
    pub fn new(base_url: &str) -> Result<Self, LookupError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base = Url::parse(&normalized).map_err(|source| LookupError::InvalidUrl {
            input: base_url.to_string(),
            source,
        })?;

        Ok(Self { base })
    }

    /// `{base}/package/npm/{package}/{version}`
    pub fn listing(&self, query: &Query) -> Result<Url, LookupError> {
        let path = format!("package/npm/{}/{}", query.package, query.version);
        self.join(&path)
    }

    /// `{base}/{link}` for a link scraped from a listing row.
    ///
    /// A leading `/` does not escape the base path. Links carrying their own
    /// scheme or host are rejected with [`LookupError::ForeignLink`].
    pub fn detail(&self, link: &str) -> Result<Url, LookupError> {
        let link = link.trim();

        if link.starts_with("//") || Url::parse(link).is_ok() {
            return Err(LookupError::ForeignLink {
                link: link.to_string(),
            });
        }

        self.join(link.trim_start_matches('/'))
    }

    fn join(&self, path: &str) -> Result<Url, LookupError> {
        self.base
            .join(path)
            .map_err(|source| LookupError::InvalidUrl {
                input: path.to_string(),
                source,
            })
    }
}
