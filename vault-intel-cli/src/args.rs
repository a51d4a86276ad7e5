//! Command argument structures
//!
//! This module contains the argument structs of every subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CategorizeArgs {
    /// JSON file holding one item or an array of items
    pub items: PathBuf,

    /// Collection the items belong to (selects the collection rules)
    #[arg(long, short)]
    pub database: String,

    /// Print categorization statistics after the results
    #[arg(long)]
    pub stats: bool,

    /// Score items in parallel
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args, Debug)]
pub struct RelateArgs {
    /// JSON file holding the source item
    pub source: PathBuf,

    /// JSON file holding the candidate items
    pub targets: PathBuf,

    /// Collection of the source item
    #[arg(long)]
    pub source_db: String,

    /// Collection of the candidates; repeat for several. Candidates carrying
    /// their own `database_id` keep it.
    #[arg(long = "target-db", required = true)]
    pub target_dbs: Vec<String>,

    /// Print discovery statistics after the relationships
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args, Debug)]
pub struct CrossArgs {
    /// JSON object mapping each collection to its items
    pub items_by_database: PathBuf,

    /// Number of strongest relationships to list
    #[arg(long)]
    pub top: Option<usize>,

    /// Cap on items read per collection
    #[arg(long)]
    pub max_items: Option<usize>,
}
