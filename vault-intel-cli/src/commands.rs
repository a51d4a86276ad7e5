//! Command enum definitions
//!
//! This module contains the top-level parser and the command structure.

use crate::args::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vault-intel-cli")]
#[command(about = "Categorize vault items and discover cross-collection relationships", long_about = None)]
#[command(version = vault_intel::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Standalone categorization schema file; replaces the categorization section
    #[arg(long, global = true)]
    pub categorization_config: Option<PathBuf>,

    /// Standalone relationship schema file; replaces the relationship section
    #[arg(long, global = true)]
    pub relationship_config: Option<PathBuf>,

    /// Start from the built-in knowledge vault categories and rules
    #[arg(long, global = true)]
    pub preset: bool,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Assign categories to items of one collection
    #[command(
        long_about = r#"
Assign categories from the configured vocabulary to every item in a JSON file.

The file may hold a single item object or an array of items. Each item has
an id, a name (or title), a description, a url and tags; missing fields are
treated as empty.

EXAMPLES:
  # Categorize bookmarks of the tools collection
  vault-intel-cli --preset categorize --database tools_services items.json

  # Parallel scoring with statistics, as JSON
  vault-intel-cli --preset -o json categorize -d notes_ideas notes.json --parallel --stats
"#
    )]
    Categorize(CategorizeArgs),

    /// Discover relationships from one item to candidates in other collections
    #[command(
        long_about = r#"
Compare a source item with candidate items and list the relationships that
clear their type threshold and the minimum relationship strength.

EXAMPLES:
  vault-intel-cli --preset relate --source-db business_ideas \
      --target-db tools_services idea.json tools.json
"#
    )]
    Relate(RelateArgs),

    /// Analyze every configured collection pair
    #[command(
        long_about = r#"
Read a JSON object mapping collection ids to item arrays and analyze every
pair of collections covered by a cross-database rule.

EXAMPLES:
  vault-intel-cli --preset cross vault.json --top 20
"#
    )]
    Cross(CrossArgs),

    /// Load and validate the configuration, then print a summary
    CheckConfig,
}
