#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # spigot-javadocs
//!
//! `spigot-javadocs build` runs BuildTools for every release not collected
//! yet and stores its javadoc jar; `spigot-javadocs site` unpacks the
//! collected jars and renders the overview page, sitemaps and robots.txt.
//!
//! Paths and endpoints come from the environment (a `.env` file is honoured),
//! see [`spigot_javadocs::Config::from_env`].

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use spigot_javadocs::{Config, build_all, generate_site};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Build and collect javadoc jars
    Build,
    /// Generate the documentation site
    Site,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let build = pure(Cmd::Build)
        .to_options()
        .command("build")
        .help("Build every Spigot release with BuildTools and collect its javadoc jar");

    let site = pure(Cmd::Site)
        .to_options()
        .command("site")
        .help("Unpack collected javadoc jars and render the overview site");

    let cmd = construct!([build, site]);

    cmd.to_options()
        .descr("Spigot API javadoc builder")
        .run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();
    let config = Config::from_env().context("Could not read configuration")?;

    match cmd {
        Cmd::Build => {
            let report = build_all(&config)?;
            println!("{}", report.table());
        }
        Cmd::Site => {
            let report = generate_site(&config, chrono::Utc::now())?;
            println!(
                "Generated overview for {} versions ({} newly extracted)",
                report.versions.len(),
                report.extracted.len()
            );
        }
    };

    Ok(())
}
