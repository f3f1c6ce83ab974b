#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, path::Path};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use which::which;

use crate::{
    config::Config,
    constants::DOC_GOALS,
    process::{CommandRunner, CommandSpec},
    util::download,
    version::Version,
};

/// Downloads BuildTools.jar unless it is already present.
pub fn ensure_build_tools(config: &Config, client: &Client) -> Result<()> {
    let jar = config.build_tools_jar();
    if jar.is_file() {
        tracing::debug!("Using {}", jar.display());
        return Ok(());
    }

    tracing::info!("Downloading BuildTools.jar...");
    download(client, config.build_tools_url(), &jar)
        .with_context(|| format!("Could not download BuildTools to {}", jar.display()))
}

/// `<java_home>/bin/java -jar BuildTools.jar --rev <version>`, run from the
/// BuildTools directory.
pub fn build_tools_command(config: &Config, java_home: &Path, version: &Version) -> CommandSpec {
    CommandSpec::new(java_home.join("bin").join("java"))
        .arg("-jar")
        .arg(config.build_tools_jar())
        .arg("--rev")
        .arg(version.as_str())
        .current_dir(config.build_tools_dir())
}

/// Runs BuildTools for `version`.
///
/// The API module's `target/` is removed first so jars from an earlier
/// version can never be collected for this one.
pub fn run_build_tools(
    runner: &mut dyn CommandRunner,
    config: &Config,
    java_home: &Path,
    version: &Version,
) -> Result<bool> {
    let target = config.api_target_dir();
    if target.exists() {
        std::fs::remove_dir_all(&target)
            .with_context(|| format!("Could not delete {}", target.display()))?;
    }

    runner.run(&build_tools_command(config, java_home, version))
}

/// The maven executable paired with `java_home`: `<java_home>/../bin/mvn` if
/// it exists, else `mvn` from `PATH`, else the bare name.
pub fn maven_executable(java_home: &Path) -> OsString {
    if let Some(parent) = java_home.parent() {
        let bundled = parent.join("bin").join("mvn");
        if bundled.is_file() {
            return bundled.into_os_string();
        }
    }

    which("mvn")
        .map(|p| p.into_os_string())
        .unwrap_or_else(|_| OsString::from("mvn"))
}

/// `mvn javadoc:jar source:jar` in the generated project with `JAVA_HOME`
/// pointing at the resolved toolchain.
pub fn doc_command(config: &Config, java_home: &Path) -> CommandSpec {
    DOC_GOALS
        .iter()
        .fold(CommandSpec::new(maven_executable(java_home)), |cmd, goal| {
            cmd.arg(*goal)
        })
        .current_dir(config.spigot_dir())
        .env("JAVA_HOME", java_home)
}

/// Builds the javadoc and source jars of the generated project.
pub fn generate_docs(
    runner: &mut dyn CommandRunner,
    config: &Config,
    java_home: &Path,
) -> Result<bool> {
    runner.run(&doc_command(config, java_home))
}
