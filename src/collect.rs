#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use anyhow::Context;

use crate::{config::Config, constants::JAVADOC_JAR_PATTERN, util, version::Version};

/// Errors raised while collecting a version's javadoc jar.
#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    /// Maven produced no javadoc jar.
    #[error("Javadoc jar file for version '{version}' wasn't found in {}", .searched.display())]
    ArtifactNotFound {
        /// Version being collected.
        version:  String,
        /// Directory that was searched.
        searched: PathBuf,
    },
    /// Searching the target directory or copying the jar failed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Where the javadoc jar of `version` is kept.
pub fn collected_jar(config: &Config, version: &Version) -> PathBuf {
    config
        .output_dir()
        .join(format!("spigot-api-{version}.jar"))
}

/// Whether `version` has already been collected by an earlier run.
pub fn is_processed(config: &Config, version: &Version) -> bool {
    collected_jar(config, version).is_file()
}

/// Copies the javadoc jar maven produced for `version` into the output
/// directory, replacing any previous copy.
///
/// When no jar is found every file of the generated project is logged before
/// failing.
pub fn collect_javadoc(config: &Config, version: &Version) -> Result<PathBuf, CollectError> {
    let target_dir = config.api_target_dir();
    let found = util::find_files(&target_dir, JAVADOC_JAR_PATTERN)?;

    let Some(src) = found.first() else {
        tracing::warn!("No javadoc jar for {version}; contents of the generated project follow");
        for file in util::list_files_recursive(&config.spigot_dir()) {
            tracing::warn!("  {}", file.display());
        }
        return Err(CollectError::ArtifactNotFound {
            version:  version.to_string(),
            searched: target_dir,
        });
    };

    let dest = collected_jar(config, version);
    std::fs::create_dir_all(config.output_dir())
        .with_context(|| format!("Could not create {}", config.output_dir().display()))?;
    std::fs::copy(src, &dest)
        .with_context(|| format!("Could not copy {} to {}", src.display(), dest.display()))?;

    tracing::info!("Collected {}", dest.display());
    Ok(dest)
}
