#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use typed_builder::TypedBuilder;

use crate::{
    constants::{
        BUILD_TOOLS_JAR, BUILD_TOOLS_URL, SITE_BASE_URL, SPIGOT_API_MODULE, SPIGOT_PROJECT_DIR,
        VERSIONS_URL,
    },
    toolchain::ToolchainMap,
};

/// Paths, endpoints and toolchains for one run.
///
/// Built once at start-up and handed to every component by reference.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Config {
    /// Listing of published versions; per-version metadata lives at
    /// `<versions_url><version>.json`.
    #[builder(default = VERSIONS_URL.to_string(), setter(into))]
    versions_url:    String,
    /// Where BuildTools.jar is downloaded from when missing.
    #[builder(default = BUILD_TOOLS_URL.to_string(), setter(into))]
    build_tools_url: String,
    /// Working directory of BuildTools; holds the jar and the generated
    /// project.
    #[builder(setter(into))]
    build_tools_dir: PathBuf,
    /// Collected javadoc jars, one per version.
    #[builder(setter(into))]
    output_dir:      PathBuf,
    /// Root of the generated static site.
    #[builder(setter(into))]
    site_dir:        PathBuf,
    /// Public URL of [`Config::site_dir`], used in sitemaps and robots.txt.
    #[builder(default = SITE_BASE_URL.to_string(), setter(into))]
    base_url:        String,
    /// Whether the site generator also writes sitemaps and robots.txt.
    #[builder(default = true)]
    emit_sitemaps:   bool,
    /// Installed Java toolchains.
    #[builder(default = ToolchainMap::from_env())]
    toolchains:      ToolchainMap,
}

impl Config {
    /// Reads the configuration from the environment, falling back to the
    /// standard locations.
    pub fn from_env() -> Result<Self> {
        let build_tools_dir = match std::env::var_os("SPIGOT_BUILD_TOOLS_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("Could not determine the home directory for BuildTools")?
                .join("BuildTools"),
        };

        let output_dir = std::env::var_os("SPIGOT_JAR_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("jar_files"));
        let site_dir = std::env::var_os("SPIGOT_SITE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        // Relative paths are anchored at the launch directory.
        let cwd = std::env::current_dir().context("Could not read the current directory")?;

        Ok(Self::builder()
            .versions_url(read_string("SPIGOT_VERSIONS_URL", VERSIONS_URL))
            .build_tools_url(read_string("SPIGOT_BUILD_TOOLS_URL", BUILD_TOOLS_URL))
            .build_tools_dir(cwd.join(build_tools_dir))
            .output_dir(cwd.join(output_dir))
            .site_dir(cwd.join(site_dir))
            .base_url(read_string("SPIGOT_SITE_BASE_URL", SITE_BASE_URL))
            .emit_sitemaps(read_bool("SPIGOT_SITEMAPS", true))
            .toolchains(ToolchainMap::from_env())
            .build())
    }

    /// Listing endpoint for published versions.
    pub fn versions_url(&self) -> &str {
        &self.versions_url
    }

    /// Metadata endpoint for a single version.
    pub fn metadata_url(&self, version: &str) -> String {
        format!("{}/{version}.json", self.versions_url.trim_end_matches('/'))
    }

    /// Download location of BuildTools.jar.
    pub fn build_tools_url(&self) -> &str {
        &self.build_tools_url
    }

    /// BuildTools working directory.
    pub fn build_tools_dir(&self) -> &Path {
        &self.build_tools_dir
    }

    /// Path to BuildTools.jar.
    pub fn build_tools_jar(&self) -> PathBuf {
        self.build_tools_dir.join(BUILD_TOOLS_JAR)
    }

    /// Maven project BuildTools generates.
    pub fn spigot_dir(&self) -> PathBuf {
        self.build_tools_dir.join(SPIGOT_PROJECT_DIR)
    }

    /// Generated build descriptor.
    pub fn pom_path(&self) -> PathBuf {
        self.spigot_dir().join("pom.xml")
    }

    /// Maven output directory of the API module.
    pub fn api_target_dir(&self) -> PathBuf {
        self.spigot_dir().join(SPIGOT_API_MODULE).join("target")
    }

    /// Directory collected jars are copied into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Root of the generated site.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Public URL of the site.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Whether sitemaps and robots.txt are generated.
    pub fn emit_sitemaps(&self) -> bool {
        self.emit_sitemaps
    }

    /// Installed toolchains.
    pub fn toolchains(&self) -> &ToolchainMap {
        &self.toolchains
    }
}

/// Reads a non-empty string variable, or `default`.
fn read_string(env: &str, default: &str) -> String {
    std::env::var(env)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads a boolean variable (`1`/`true`/`yes`/`on` vs `0`/`false`/`no`/`off`),
/// falling back to `default` when unset or unrecognised.
fn read_bool(env: &str, default: bool) -> bool {
    match std::env::var(env)
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        Ok("1" | "true" | "yes" | "on") => true,
        Ok("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
