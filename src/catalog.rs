#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use anyhow::{Context, Result};
use itertools::Itertools;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    constants::{DEFAULT_CLASS_VERSIONS, LISTING_ENTRY_REGEX},
    toolchain::CompilerRange,
    version::{Version, sort_ascending},
};

/// `href` attribute values of anchors in a directory listing, double
/// quoted, single quoted or bare.
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid href regex")
});

/// Listing entries naming a version metadata file.
static LISTING_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LISTING_ENTRY_REGEX).expect("valid listing regex"));

/// Errors raised while interpreting catalog content.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The metadata document is not the expected JSON shape.
    #[error("Could not parse metadata for version {version}")]
    InvalidMetadata {
        /// Version whose metadata was requested.
        version: String,
        /// Underlying JSON error.
        #[source]
        source:  serde_json::Error,
    },
    /// `javaVersions` does not hold exactly two entries.
    #[error("Unexpected javaVersions format for version {version}: {found:?}")]
    UnexpectedRange {
        /// Version whose metadata was requested.
        version: String,
        /// Values that were published.
        found:   Vec<u32>,
    },
    /// A class-file version too small to name a Java release.
    #[error("javaVersions for version {version} contains a class version below 44: {found:?}")]
    ClassVersionTooLow {
        /// Version whose metadata was requested.
        version: String,
        /// Values that were published.
        found:   Vec<u32>,
    },
}

/// Shape of `<version>.json`; only the compiler range is of interest.
#[derive(Debug, Deserialize)]
struct VersionMetadata {
    /// Supported class-file versions, oldest and newest.
    #[serde(rename = "javaVersions")]
    java_versions: Option<Vec<u32>>,
}

/// Source of releases and their compiler requirements.
pub trait VersionCatalog {
    /// All published versions, deduplicated and sorted oldest first.
    fn versions(&self) -> Result<Vec<Version>>;

    /// Java releases able to build `version`.
    fn compiler_range(&self, version: &Version) -> Result<CompilerRange>;
}

/// Catalog backed by the Spigot versions endpoint.
pub struct RemoteCatalog<'a> {
    /// Shared blocking HTTP client.
    client: Client,
    /// Run configuration holding the endpoints.
    config: &'a Config,
}

impl<'a> RemoteCatalog<'a> {
    /// Creates a catalog reading from the endpoints configured in `config`.
    pub fn new(client: Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// GETs `url` and returns the body, failing on non-success statuses.
    fn get_text(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .send()
            .with_context(|| format!("Cannot get url: {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected status from {url}"))?
            .text()
            .with_context(|| format!("Could not parse the response from {url} to text."))
    }
}

impl VersionCatalog for RemoteCatalog<'_> {
    fn versions(&self) -> Result<Vec<Version>> {
        let listing = self.get_text(self.config.versions_url())?;
        Ok(parse_listing(&listing))
    }

    fn compiler_range(&self, version: &Version) -> Result<CompilerRange> {
        let body = self.get_text(&self.config.metadata_url(version.as_str()))?;
        Ok(parse_metadata(version.as_str(), &body)?)
    }
}

/// Extracts version identifiers from a directory listing.
///
/// Only anchors whose `href` is `<major>.<minor>[.<patch>].json` count. The
/// result is deduplicated and sorted oldest first.
pub fn parse_listing(html: &str) -> Vec<Version> {
    let mut versions = HREF
        .captures_iter(html)
        .filter_map(|caps| {
            let href = (1..=3).find_map(|i| caps.get(i))?.as_str();
            let entry = LISTING_ENTRY.captures(href)?;
            entry.get(1)?.as_str().parse::<Version>().ok()
        })
        .unique()
        .collect::<Vec<_>>();

    sort_ascending(&mut versions);
    versions
}

/// Reads the compiler range out of a version's metadata document.
///
/// A missing `javaVersions` field means class versions 51..=52.
pub fn parse_metadata(version: &str, json: &str) -> Result<CompilerRange, CatalogError> {
    let metadata: VersionMetadata =
        serde_json::from_str(json).map_err(|source| CatalogError::InvalidMetadata {
            version: version.to_string(),
            source,
        })?;

    let found = metadata
        .java_versions
        .unwrap_or_else(|| DEFAULT_CLASS_VERSIONS.to_vec());

    let [min, max] = found[..] else {
        return Err(CatalogError::UnexpectedRange {
            version: version.to_string(),
            found,
        });
    };

    CompilerRange::from_class_versions(min, max).ok_or_else(|| {
        CatalogError::ClassVersionTooLow {
            version: version.to_string(),
            found,
        }
    })
}
