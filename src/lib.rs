//! # spigot-javadocs
//!
//! Builds every published Spigot release with BuildTools, collects the
//! javadoc jar of each, and publishes them as a static documentation site.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Running BuildTools and maven for a version
pub mod buildtools;
/// Discovering published versions and their Java requirements
pub mod catalog;
/// Collecting javadoc jars out of the generated project
pub mod collect;
/// Run configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Per-version processing and the batch loop
pub mod pipeline;
/// Patching the generated pom.xml
pub mod pom;
/// Launching external commands
pub mod process;
/// Rendering the documentation site
pub mod site;
/// Picking an installed Java toolchain
pub mod toolchain;
/// Utility functions for convenience
pub mod util;
/// Release identifiers
pub mod version;

pub use config::Config;
pub use pipeline::{BatchReport, VersionOutcome, build_all, process_version, run_batch};
pub use site::{SiteReport, generate_site};
pub use version::Version;
