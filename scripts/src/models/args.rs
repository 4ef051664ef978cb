//! # CLI Argument Definitions
//!
//! Command-line surface of `feature-init`, defined with `clap`.

use clap::Parser;

/// Start a new feature YAML file.
#[derive(Debug, Parser)]
#[command(name = "feature-init")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Start a new feature YAML file")]
pub struct Cli {
    /// The feature key (i.e., the filename without `.yml`)
    #[arg(value_name = "feature-identifier")]
    pub feature_identifier: String,

    /// Print instead of writing to a file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Set the Can I use…? ID
    #[arg(long, value_name = "ID", default_value = "")]
    pub caniuse: String,

    /// A specification URL
    #[arg(long, value_name = "URL", default_value = "")]
    pub spec: String,
}
