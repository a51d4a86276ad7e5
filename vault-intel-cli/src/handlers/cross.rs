//! Cross-collection analysis command handler

use crate::args::CrossArgs;
use crate::context::VaultCliContext;
use crate::output::*;
use crate::utils::read_items_by_database;
use vault_intel::prelude::*;

/// Analyze every collection pair of the input file.
pub fn analyze_collections(
    args: &CrossArgs,
    ctx: &mut VaultCliContext,
) -> vault_intel::Result<CrossDatabaseReport> {
    let items_by_database = read_items_by_database(&args.items_by_database)?;

    let mut config = ctx.config.relationships.clone();
    if let Some(top) = args.top {
        config.analysis.top_relationships = top;
    }
    if let Some(max_items) = args.max_items {
        config.analysis.max_items_per_database = max_items;
    }

    let discovery = RelationshipDiscovery::new(config);
    Ok(discovery.analyze_cross_database(&items_by_database, &mut ctx.store))
}

pub fn handle_cross_command(
    args: CrossArgs,
    ctx: &mut VaultCliContext,
    output_format: &str,
) -> vault_intel::Result<()> {
    let report = analyze_collections(&args, ctx)?;

    if output_format == "json" {
        print_json(&report);
    } else {
        print_cross_database_report(&report);
    }

    Ok(())
}
