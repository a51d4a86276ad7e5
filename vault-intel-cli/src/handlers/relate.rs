//! Relate command handler

use crate::args::RelateArgs;
use crate::context::VaultCliContext;
use crate::output::*;
use crate::utils::{read_item, read_items};
use serde_json::json;
use vault_intel::prelude::*;

/// Discover relationships from the source item to the candidate items.
pub fn relate_items(
    args: &RelateArgs,
    ctx: &mut VaultCliContext,
) -> vault_intel::Result<Vec<RelationshipResult>> {
    let source = read_item(&args.source)?;
    let targets = read_items(&args.targets)?;

    let discovery = RelationshipDiscovery::new(ctx.config.relationships.clone());
    Ok(discovery.discover_relationships(
        &source,
        &args.source_db,
        &targets,
        &args.target_dbs,
        &mut ctx.store,
    ))
}

pub fn handle_relate_command(
    args: RelateArgs,
    ctx: &mut VaultCliContext,
    output_format: &str,
) -> vault_intel::Result<()> {
    let relationships = relate_items(&args, ctx)?;
    let statistics = args.stats.then(|| {
        RelationshipDiscovery::new(ctx.config.relationships.clone()).statistics(&ctx.store)
    });

    if output_format == "json" {
        match statistics {
            Some(statistics) => print_json(&json!({
                "relationships": relationships,
                "statistics": statistics,
            })),
            None => print_json(&relationships),
        }
    } else {
        print_relationship_list(&relationships);
        if let Some(statistics) = statistics {
            println!();
            print_discovery_statistics(&statistics);
        }
    }

    Ok(())
}
