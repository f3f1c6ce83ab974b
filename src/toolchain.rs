#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::constants::{CLASS_VERSION_OFFSET, DEFAULT_TOOLCHAINS};

/// Inclusive bounds on the Java releases able to build a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerRange {
    /// Oldest usable Java release.
    pub min: u32,
    /// Newest usable Java release.
    pub max: u32,
}

impl CompilerRange {
    /// Converts a pair of class-file major versions (`52` is Java 8) into Java
    /// releases. Returns `None` for values below the class-version offset.
    pub fn from_class_versions(min: u32, max: u32) -> Option<Self> {
        Some(Self {
            min: min.checked_sub(CLASS_VERSION_OFFSET)?,
            max: max.checked_sub(CLASS_VERSION_OFFSET)?,
        })
    }

    /// Whether `major` lies within the range.
    pub fn contains(&self, major: u32) -> bool {
        self.min <= major && major <= self.max
    }
}

/// No installed toolchain satisfies a [`CompilerRange`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ToolchainError {
    /// Nothing in the map falls inside the range.
    #[error("No suitable Java version found for range {min}-{max}")]
    NoSuitableToolchain {
        /// Lower bound that was requested.
        min: u32,
        /// Upper bound that was requested.
        max: u32,
    },
}

/// Installed Java toolchains keyed by major version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainMap(BTreeMap<u32, PathBuf>);

impl ToolchainMap {
    /// The standard toolchain locations, each overridable through
    /// `JAVA_HOME_<major>_X64`.
    pub fn from_env() -> Self {
        DEFAULT_TOOLCHAINS
            .iter()
            .map(|(major, default)| {
                let path = std::env::var_os(format!("JAVA_HOME_{major}_X64"))
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(default));
                (*major, path)
            })
            .collect()
    }

    /// Picks the newest toolchain inside `range`.
    pub fn resolve(&self, range: CompilerRange) -> Result<&Path, ToolchainError> {
        self.0
            .iter()
            .rev()
            .find(|(major, _)| range.contains(**major))
            .map(|(_, path)| path.as_path())
            .ok_or(ToolchainError::NoSuitableToolchain {
                min: range.min,
                max: range.max,
            })
    }

    /// Configured major versions, ascending.
    pub fn majors(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(u32, PathBuf)> for ToolchainMap {
    fn from_iter<T: IntoIterator<Item = (u32, PathBuf)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
