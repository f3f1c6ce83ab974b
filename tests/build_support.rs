#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use spigot_javadocs::{
    Config, Version,
    catalog::VersionCatalog,
    process::{CommandRunner, CommandSpec},
    toolchain::{CompilerRange, ToolchainMap},
};
use uuid::Uuid;

pub const MINIMAL_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.spigotmc</groupId>
    <artifactId>spigot-parent</artifactId>
</project>
"#;

pub fn temp_root(prefix: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

pub fn toolchains() -> ToolchainMap {
    [
        (8, PathBuf::from("/opt/jdk8")),
        (17, PathBuf::from("/opt/jdk17")),
        (21, PathBuf::from("/opt/jdk21")),
    ]
    .into_iter()
    .collect()
}

pub fn test_config(root: &Path) -> Config {
    Config::builder()
        .build_tools_dir(root.join("BuildTools"))
        .output_dir(root.join("jar_files"))
        .site_dir(root.join("site"))
        .base_url("https://docs.example.org")
        .toolchains(toolchains())
        .build()
}

pub fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create jar parent");
    }
    let file = fs::File::create(path).expect("create jar");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(contents.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish jar");
}

/// Catalog serving a fixed list of versions. Versions listed in `broken`
/// fail when their range is requested.
pub struct FakeCatalog {
    pub versions: Vec<String>,
    pub ranges:   HashMap<String, CompilerRange>,
    pub broken:   Vec<String>,
}

impl FakeCatalog {
    pub fn new(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            ranges:   HashMap::new(),
            broken:   Vec::new(),
        }
    }

    pub fn with_range(mut self, version: &str, min: u32, max: u32) -> Self {
        self.ranges
            .insert(version.to_string(), CompilerRange { min, max });
        self
    }
}

impl VersionCatalog for FakeCatalog {
    fn versions(&self) -> Result<Vec<Version>> {
        let mut versions = self
            .versions
            .iter()
            .map(|v| v.parse::<Version>())
            .collect::<Result<Vec<_>, _>>()?;
        versions.sort();
        Ok(versions)
    }

    fn compiler_range(&self, version: &Version) -> Result<CompilerRange> {
        if self.broken.iter().any(|b| b == version.as_str()) {
            return Err(anyhow!("Unexpected javaVersions format for version {version}"));
        }
        Ok(self
            .ranges
            .get(version.as_str())
            .copied()
            .unwrap_or(CompilerRange { min: 8, max: 21 }))
    }
}

/// Stands in for BuildTools and maven: BuildTools writes a pom, maven writes
/// the javadoc jar for the last revision built. Revisions in `skip_pom`
/// build successfully but leave no pom behind.
pub struct FakeRunner {
    pub config:     Config,
    pub commands:   Vec<CommandSpec>,
    pub fail_build: Vec<String>,
    pub skip_pom:   Vec<String>,
    pub fail_docs:  bool,
    pub skip_jar:   bool,
    last_rev:       Option<String>,
}

impl FakeRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            config:     config.clone(),
            commands:   Vec::new(),
            fail_build: Vec::new(),
            skip_pom:   Vec::new(),
            fail_docs:  false,
            skip_jar:   false,
            last_rev:   None,
        }
    }

    pub fn count(&self, arg: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| c.args().iter().any(|a| a == arg))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, command: &CommandSpec) -> Result<bool> {
        self.commands.push(command.clone());
        let args = command.args();

        if let Some(idx) = args.iter().position(|a| a == "--rev") {
            let rev = args[idx + 1].to_string_lossy().to_string();
            if self.fail_build.contains(&rev) {
                return Ok(false);
            }
            fs::create_dir_all(self.config.spigot_dir())?;
            if self.skip_pom.contains(&rev) {
                let _ = fs::remove_file(self.config.pom_path());
            } else {
                fs::write(self.config.pom_path(), MINIMAL_POM)?;
            }
            self.last_rev = Some(rev);
            return Ok(true);
        }

        if args.iter().any(|a| a == "javadoc:jar") {
            if self.fail_docs {
                return Ok(false);
            }
            if !self.skip_jar {
                let rev = self.last_rev.clone().unwrap_or_default();
                let jar = self
                    .config
                    .api_target_dir()
                    .join(format!("spigot-api-{rev}-R0.1-SNAPSHOT-javadoc.jar"));
                write_jar(
                    &jar,
                    &[(
                        "index.html",
                        format!("<html><body>Spigot {rev}</body></html>").as_str(),
                    )],
                );
            }
            return Ok(true);
        }

        Err(anyhow!("unexpected command: {command}"))
    }
}
