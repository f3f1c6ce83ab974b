#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use reqwest::blocking::Client;
use walkdir::WalkDir;

/// Files directly inside `dir` whose name matches the glob `pattern`, sorted
/// by path.
///
/// * `dir`: directory to search; a missing directory yields no matches
/// * `pattern`: file-name glob such as `spigot-api-*.jar`
pub fn find_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir
        .to_str()
        .context("Could not convert search directory to string")?;
    let pattern = Path::new(&Pattern::escape(dir)).join(pattern);
    let pattern = pattern
        .to_str()
        .context("Could not convert glob pattern to string")?;

    let mut found: Vec<PathBuf> = glob(pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    found.sort();
    Ok(found)
}

/// True if `dir` exists and holds at least one entry.
pub fn dir_is_non_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Every regular file below `root`, for diagnostics.
pub fn list_files_recursive(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Downloads `url` into `dest`, creating parent directories as needed.
pub fn download(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let bytes = client
        .get(url)
        .send()
        .with_context(|| format!("Cannot get url: {url}"))?
        .error_for_status()
        .with_context(|| format!("Unexpected status from {url}"))?
        .bytes()
        .with_context(|| format!("Could not read the response body from {url}"))?;

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    std::fs::write(dest, &bytes).with_context(|| format!("Could not write {}", dest.display()))
}
