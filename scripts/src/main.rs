#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::feature_init::{Outcome, create_feature};
use crate::models::args::Cli;
use crate::models::draft::FeatureDraft;
use crate::services::layout::ProjectLayout;
use crate::services::logger::Logger;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = Logger::builder().name("feature-init").level(LevelFilter::WARN).init()?;
    tracing::debug!(logger = logger.name(), ?cli, "Parsed arguments");

    let layout = ProjectLayout::discover()?;
    let draft = FeatureDraft::new(cli.spec, cli.caniuse);

    let mut stdout = std::io::stdout().lock();
    let outcome = create_feature(&layout, &cli.feature_identifier, &draft, cli.dry_run, &mut stdout)?;

    if let Outcome::Written(path) = outcome {
        tracing::info!("Created feature '{}' at {}", cli.feature_identifier, path.display());
    }

    Ok(())
}
