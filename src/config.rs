//! Configuration file handling.
//!
//! This module loads snyklookup configuration from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/snyklookup/config.toml`
//! - macOS: `~/Library/Application Support/snyklookup/config.toml`
//! - Windows: `%APPDATA%\snyklookup\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! base_url = "https://security.snyk.io"
//! timeout_secs = 30
//! include_descriptions = true
//! deduplicate = true
//! keep_going = false
//! parallel = false
//! max_concurrency = 4
//!
//! [selectors]
//! row = "tr.vue--table__row"
//! link = "a.vue--anchor[href]"
//! description = "p"
//! cve = "span.cve"
//! cve_anchor = "a[href]"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Host queried when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://security.snyk.io";

/// Application configuration.
///
/// Loaded from a TOML file or created with default values. Command-line
/// flags are applied on top by the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the vulnerability database site.
    ///
    /// Default: `https://security.snyk.io`
    pub base_url: String,

    /// Per-request timeout, in seconds.
    ///
    /// Default: 30
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Whether to print the description paragraphs of each row.
    ///
    /// Default: false
    pub include_descriptions: bool,

    /// Print each identifier only once per run.
    ///
    /// Default: true
    pub deduplicate: bool,

    /// Continue past failing detail pages and report them at the end.
    ///
    /// Default: false (the first failure aborts the run)
    pub keep_going: bool,

    /// Fetch detail pages concurrently.
    ///
    /// Default: false
    pub parallel: bool,

    /// Upper bound on in-flight detail requests when `parallel` is set.
    ///
    /// Default: 4
    pub max_concurrency: usize,

    /// CSS selectors describing the site's markup.
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// CSS selectors for the listing and detail pages.
///
/// Override these when the site changes its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Vulnerability rows on the listing page.
    pub row: String,
    /// Detail links inside a row.
    pub link: String,
    /// Description paragraphs inside a row.
    pub description: String,
    /// CVE elements on a detail page.
    pub cve: String,
    /// Identifier-bearing anchor inside a CVE element.
    pub cve_anchor: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: "tr.vue--table__row".to_string(),
            link: "a.vue--anchor[href]".to_string(),
            description: "p".to_string(),
            cve: "span.cve".to_string(),
            cve_anchor: "a[href]".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
            include_descriptions: false,
            deduplicate: true,
            keep_going: false,
            parallel: false,
            max_concurrency: 4,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use snyklookup::Config;
    ///
    /// let config = Config::load_from("snyklookup.toml".as_ref())?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Returns the path to the default configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use snyklookup::Config;
    ///
    /// let path = Config::config_path();
    /// println!("Config file: {}", path.display());
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snyklookup")
            .join("config.toml")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
