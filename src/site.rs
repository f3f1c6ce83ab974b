#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use regex::Regex;

use crate::{
    config::Config,
    constants::{COLLECTED_JAR_PATTERN, COLLECTED_JAR_REGEX, SITE_TITLE},
    util::{dir_is_non_empty, find_files},
    version::{Version, sort_descending},
};

/// Version captured from a collected jar's file name.
static COLLECTED_JAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLLECTED_JAR_REGEX).expect("valid collected jar regex"));

/// Format of `<lastmod>` entries.
const LASTMOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// What [`generate_site`] produced.
#[derive(Debug, Default, Clone)]
pub struct SiteReport {
    /// Every version listed on the index page, newest first.
    pub versions:     Vec<Version>,
    /// Versions whose jar was unpacked by this run.
    pub extracted:    Vec<Version>,
    /// Whether any sitemap file was written by this run.
    pub new_sitemaps: bool,
}

/// Unpacks every collected jar into `<site>/<version>/` and renders the
/// overview page. With sitemaps enabled, also writes the per-version
/// sitemaps, the main sitemap, the sitemap index and robots.txt.
///
/// `now` stamps `<lastmod>` of newly written sitemaps.
pub fn generate_site(config: &Config, now: DateTime<Utc>) -> Result<SiteReport> {
    let site = config.site_dir();
    std::fs::create_dir_all(site).with_context(|| format!("Could not create {}", site.display()))?;

    let mut report = SiteReport::default();

    for jar in find_files(config.output_dir(), COLLECTED_JAR_PATTERN)? {
        let Some(version) = jar
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(version_from_filename)
        else {
            tracing::debug!("Ignoring {}", jar.display());
            continue;
        };

        let version_dir = site.join(version.as_str());
        if extract_jar(&jar, &version_dir)? {
            report.extracted.push(version.clone());
        }
        report.versions.push(version);
    }

    report.versions = report.versions.into_iter().unique().collect();
    sort_descending(&mut report.versions);

    let index = site.join("index.html");
    std::fs::write(&index, render_index(&report.versions))
        .with_context(|| format!("Could not write {}", index.display()))?;
    tracing::info!("Wrote {} with {} versions", index.display(), report.versions.len());

    if config.emit_sitemaps() {
        let lastmod = now.format(LASTMOD_FORMAT).to_string();
        report.new_sitemaps = write_sitemaps(site, config.base_url(), &report.versions, &lastmod)?;
        write_if_absent(&site.join("robots.txt"), &render_robots(config.base_url()))?;

        if report.new_sitemaps {
            tracing::info!("New sitemaps were generated");
        } else {
            tracing::info!("Sitemaps are up to date");
        }
    }

    Ok(report)
}

/// Version of a collected jar named `spigot-api-<version>.jar`.
pub fn version_from_filename(name: &str) -> Option<Version> {
    COLLECTED_JAR.captures(name)?.get(1)?.as_str().parse().ok()
}

/// Unpacks `jar` into `dest` unless `dest` already has content.
///
/// Returns whether anything was extracted.
pub fn extract_jar(jar: &Path, dest: &Path) -> Result<bool> {
    if dir_is_non_empty(dest) {
        return Ok(false);
    }

    tracing::info!(" > Extracting '{}'", jar.display());
    std::fs::create_dir_all(dest).with_context(|| format!("Could not create {}", dest.display()))?;

    let file = File::open(jar).with_context(|| format!("Could not open {}", jar.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid jar", jar.display()))?;
    archive
        .extract(dest)
        .with_context(|| format!("Could not extract {} to {}", jar.display(), dest.display()))?;

    Ok(true)
}

/// Writes the version sitemaps, `sitemap_main.xml` and `sitemap_index.xml`.
///
/// Existing files are kept as they are so search engines are not told about
/// changes that did not happen. The index is rewritten only when a version
/// sitemap was added or it does not exist yet.
fn write_sitemaps(
    site: &Path,
    base_url: &str,
    versions: &[Version],
    lastmod: &str,
) -> Result<bool> {
    let mut new_sitemaps = false;

    for version in versions {
        let path = site.join(format!("sitemap_{version}.xml"));
        new_sitemaps |= write_if_absent(&path, &render_version_sitemap(base_url, version, lastmod))?;
    }

    new_sitemaps |= write_if_absent(
        &site.join("sitemap_main.xml"),
        &render_main_sitemap(base_url, lastmod),
    )?;

    let index: PathBuf = site.join("sitemap_index.xml");
    let index_contents = render_sitemap_index(base_url, versions, lastmod);
    if new_sitemaps {
        std::fs::write(&index, index_contents)
            .with_context(|| format!("Could not write {}", index.display()))?;
    } else {
        new_sitemaps |= write_if_absent(&index, &index_contents)?;
    }

    Ok(new_sitemaps)
}

/// Writes `contents` to `path` unless it exists. Returns whether it wrote.
fn write_if_absent(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    tracing::debug!("Writing {}", path.display());
    std::fs::write(path, contents).with_context(|| format!("Could not write {}", path.display()))?;
    Ok(true)
}

/// The overview page, linking each version's javadoc in the given order.
pub fn render_index(versions: &[Version]) -> String {
    let items = versions
        .iter()
        .map(|v| format!("            <li><a href=\"{v}/index.html\">Version {v}</a></li>"))
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{SITE_TITLE}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
        h1 {{ color: #333; }}
        ul {{ list-style-type: none; padding: 0; }}
        li {{ margin-bottom: 10px; }}
        a {{ color: #0066cc; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
    </style>
</head>
<body>
    <h1>{SITE_TITLE}</h1>
    <ul>
{items}
    </ul>
</body>
</html>
"#
    )
}

/// Sitemap of a single version's javadoc.
pub fn render_version_sitemap(base_url: &str, version: &Version, lastmod: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
    <url>
        <loc>{base_url}/{version}/index.html</loc>
        <lastmod>{lastmod}</lastmod>
        <changefreq>monthly</changefreq>
        <priority>0.8</priority>
    </url>
</urlset>
"#
    )
}

/// Sitemap of the overview page.
pub fn render_main_sitemap(base_url: &str, lastmod: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
    <url>
        <loc>{base_url}/</loc>
        <lastmod>{lastmod}</lastmod>
        <changefreq>weekly</changefreq>
        <priority>1.0</priority>
    </url>
</urlset>
"#
    )
}

/// Index referencing the main sitemap and every version sitemap.
pub fn render_sitemap_index(base_url: &str, versions: &[Version], lastmod: &str) -> String {
    let entries = std::iter::once(format!("{base_url}/sitemap_main.xml"))
        .chain(versions.iter().map(|v| format!("{base_url}/sitemap_{v}.xml")))
        .map(|loc| {
            format!(
                "    <sitemap>\n        <loc>{loc}</loc>\n        <lastmod>{lastmod}</lastmod>\n    \
                 </sitemap>"
            )
        })
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{entries}
</sitemapindex>
"#
    )
}

/// robots.txt allowing everything and pointing at the sitemap index.
pub fn render_robots(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap_index.xml\n")
}
