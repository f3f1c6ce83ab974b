#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Directory listing that publishes one `<version>.json` per Spigot release.
pub const VERSIONS_URL: &str = "https://hub.spigotmc.org/versions/";

/// Latest successful BuildTools build.
pub const BUILD_TOOLS_URL: &str =
    "https://hub.spigotmc.org/jenkins/job/BuildTools/lastSuccessfulBuild/artifact/target/BuildTools.jar";

/// File name of the BuildTools jar inside the BuildTools directory.
pub const BUILD_TOOLS_JAR: &str = "BuildTools.jar";

/// Directory BuildTools generates the Spigot maven project into.
pub const SPIGOT_PROJECT_DIR: &str = "Spigot";

/// API module of the generated project, relative to [`SPIGOT_PROJECT_DIR`].
pub const SPIGOT_API_MODULE: &str = "Spigot-API";

/// Glob for the javadoc jar maven leaves in `Spigot-API/target`.
pub const JAVADOC_JAR_PATTERN: &str = "spigot-api-*-R0.1-SNAPSHOT-javadoc.jar";

/// Glob for collected jars in the output directory.
pub const COLLECTED_JAR_PATTERN: &str = "spigot-api-*.jar";

/// Extracts the version from a collected jar's file name.
pub const COLLECTED_JAR_REGEX: &str = r"spigot-api-([\d.]+)\.jar";

/// Matches listing entries: `<major>.<minor>[.<patch>].json`.
pub const LISTING_ENTRY_REGEX: &str = r"(?i)^(\d+\.\d+(?:\.\d+)?)\.json$";

/// Class-file major version minus this offset is the Java release number.
pub const CLASS_VERSION_OFFSET: u32 = 44;

/// Class-file range assumed when a release does not publish `javaVersions`.
pub const DEFAULT_CLASS_VERSIONS: [u32; 2] = [51, 52];

/// Namespace of maven build descriptors.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Coordinates of the javadoc plugin inserted into the generated pom.
pub const JAVADOC_PLUGIN_GROUP: &str = "org.apache.maven.plugins";
/// Artifact id of the javadoc plugin, also used to detect an existing
/// declaration.
pub const JAVADOC_PLUGIN_ARTIFACT: &str = "maven-javadoc-plugin";
/// Pinned javadoc plugin version.
pub const JAVADOC_PLUGIN_VERSION: &str = "3.8.0";

/// `<configuration>` children of the inserted javadoc plugin, in order.
pub const JAVADOC_PLUGIN_OPTIONS: [(&str, &str); 4] = [
    ("source", "1.8"),
    ("quiet", "true"),
    ("detectLinks", "false"),
    ("doclint", "none"),
];

/// Maven goals producing the javadoc and source jars.
pub const DOC_GOALS: [&str; 2] = ["javadoc:jar", "source:jar"];

/// Base URL the generated site is published under.
pub const SITE_BASE_URL: &str = "https://dev.avarion.org";

/// Title of the generated overview page.
pub const SITE_TITLE: &str = "Spigot API JavaDoc Overview";

/// Default toolchain locations, keyed by Java major version. Each can be
/// overridden through `JAVA_HOME_<major>_X64`.
pub const DEFAULT_TOOLCHAINS: [(u32, &str); 7] = [
    (8, "/usr/lib/jvm/java-8-openjdk-amd64"),
    (11, "/usr/lib/jvm/java-11-openjdk-amd64"),
    (16, "/usr/lib/jvm/jdk-16.0.2"),
    (17, "/usr/lib/jvm/java-17-openjdk-amd64"),
    (18, "/usr/lib/jvm/java-18-openjdk-amd64"),
    (19, "/usr/lib/jvm/java-19-openjdk-amd64"),
    (21, "/usr/lib/jvm/java-21-openjdk-amd64"),
];
