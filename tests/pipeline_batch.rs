use std::{fs, path::PathBuf};

use chrono::Utc;
use spigot_javadocs::{
    Version, VersionOutcome, collect::collected_jar, generate_site, process_version, run_batch,
};

#[path = "build_support.rs"]
mod build_support;

use build_support::{FakeCatalog, FakeRunner};

fn version(raw: &str) -> Version {
    raw.parse().expect("valid version")
}

#[test]
fn full_run_collects_every_version_and_renders_the_index() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.10", "1.8", "1.9"])
        .with_range("1.8", 7, 8)
        .with_range("1.9", 8, 8)
        .with_range("1.10", 8, 17);
    let mut runner = FakeRunner::new(&config);

    let report = run_batch(&config, &catalog, &mut runner).expect("batch runs");

    let order: Vec<&str> = report.outcomes().iter().map(|(v, _)| v.as_str()).collect();
    assert_eq!(order, ["1.8", "1.9", "1.10"]);
    assert_eq!(report.built(), 3);
    assert_eq!(report.failed(), 0);

    let mut jars: Vec<_> = fs::read_dir(config.output_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    jars.sort();
    assert_eq!(jars, ["spigot-api-1.10.jar", "spigot-api-1.8.jar", "spigot-api-1.9.jar"]);

    // 1.10 accepts 8..=17, so the newest toolchain in range is used.
    let java_for_1_10 = runner
        .commands
        .iter()
        .find(|c| c.args().iter().any(|a| a == "1.10"))
        .map(|c| PathBuf::from(c.program()))
        .unwrap();
    assert_eq!(java_for_1_10, PathBuf::from("/opt/jdk17/bin/java"));

    // BuildTools leaves the pom patched for the documentation build.
    let pom = fs::read_to_string(config.pom_path()).unwrap();
    assert!(pom.contains("<artifactId>maven-javadoc-plugin</artifactId>"));

    let site = generate_site(&config, Utc::now()).unwrap();
    let listed: Vec<&str> = site.versions.iter().map(Version::as_str).collect();
    assert_eq!(listed, ["1.10", "1.9", "1.8"]);
    let index = fs::read_to_string(config.site_dir().join("index.html")).unwrap();
    assert_eq!(index.matches("<li>").count(), 3);
    let first = index.find("1.10/index.html").unwrap();
    let second = index.find("1.9/index.html").unwrap();
    let third = index.find("1.8/index.html").unwrap();
    assert!(first < second && second < third);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn second_run_skips_without_invoking_build_tools() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.8", "1.9"]);

    let mut runner = FakeRunner::new(&config);
    run_batch(&config, &catalog, &mut runner).unwrap();
    let first: Vec<Vec<u8>> = ["1.8", "1.9"]
        .iter()
        .map(|v| fs::read(collected_jar(&config, &version(v))).unwrap())
        .collect();

    let mut again = FakeRunner::new(&config);
    let report = run_batch(&config, &catalog, &mut again).unwrap();

    assert!(again.commands.is_empty());
    assert_eq!(report.skipped(), 2);
    let second: Vec<Vec<u8>> = ["1.8", "1.9"]
        .iter()
        .map(|v| fs::read(collected_jar(&config, &version(v))).unwrap())
        .collect();
    assert_eq!(first, second);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_toolchain_fails_only_that_version() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.8", "1.17", "1.18"]).with_range("1.17", 16, 16);
    let mut runner = FakeRunner::new(&config);

    let report = run_batch(&config, &catalog, &mut runner).unwrap();

    match report.outcome("1.17") {
        Some(VersionOutcome::Failed(reason)) => {
            assert!(reason.contains("No suitable Java version found for range 16-16"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(report.outcome("1.8"), Some(&VersionOutcome::Built));
    assert_eq!(report.outcome("1.18"), Some(&VersionOutcome::Built));
    assert!(!runner.commands.iter().any(|c| c.args().iter().any(|a| a == "1.17")));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn failed_build_skips_docs_and_collection() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.12"]);
    let mut runner = FakeRunner::new(&config);
    runner.fail_build.push("1.12".to_string());

    let outcome = process_version(&config, &catalog, &mut runner, &version("1.12")).unwrap();

    assert!(matches!(outcome, VersionOutcome::Failed(_)));
    assert_eq!(runner.count("--rev"), 1);
    assert_eq!(runner.count("javadoc:jar"), 0);
    assert!(!collected_jar(&config, &version("1.12")).exists());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn failed_doc_build_and_missing_jar_are_contained() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.13", "1.14"]);

    let mut runner = FakeRunner::new(&config);
    runner.fail_docs = true;
    let outcome = process_version(&config, &catalog, &mut runner, &version("1.13")).unwrap();
    assert!(matches!(outcome, VersionOutcome::Failed(_)));

    let mut runner = FakeRunner::new(&config);
    runner.skip_jar = true;
    let outcome = process_version(&config, &catalog, &mut runner, &version("1.14")).unwrap();
    match outcome {
        VersionOutcome::Failed(reason) => assert!(reason.contains("wasn't found")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let _ = fs::remove_dir_all(root);
}

#[test]
fn catalog_errors_abort_the_batch() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let mut catalog = FakeCatalog::new(&["1.8", "1.9", "1.10"]);
    catalog.broken.push("1.9".to_string());
    let mut runner = FakeRunner::new(&config);

    assert!(run_batch(&config, &catalog, &mut runner).is_err());
    // 1.8 ran before the failure, 1.10 was never attempted.
    assert!(collected_jar(&config, &version("1.8")).exists());
    assert!(!runner.commands.iter().any(|c| c.args().iter().any(|a| a == "1.10")));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn report_renders_a_table() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.8"]);
    let mut runner = FakeRunner::new(&config);

    let report = run_batch(&config, &catalog, &mut runner).unwrap();
    let table = report.table();
    assert!(table.contains("1.8"));
    assert!(table.contains("built"));
    assert!(table.contains("1 built, 0 skipped, 0 failed"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_pom_fails_only_that_version() {
    let root = build_support::temp_root("spigot-batch");
    let config = build_support::test_config(&root);
    let catalog = FakeCatalog::new(&["1.11", "1.12"]);
    let mut runner = FakeRunner::new(&config);
    runner.skip_pom.push("1.11".to_string());

    let report = run_batch(&config, &catalog, &mut runner).unwrap();

    match report.outcome("1.11") {
        Some(VersionOutcome::Failed(reason)) => assert!(reason.contains("pom.xml not found")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(report.outcome("1.12"), Some(&VersionOutcome::Built));
    // Only 1.12 reached the documentation build.
    assert_eq!(runner.count("javadoc:jar"), 1);
    assert!(!collected_jar(&config, &version("1.11")).exists());
    assert!(collected_jar(&config, &version("1.12")).exists());

    let _ = fs::remove_dir_all(root);
}
