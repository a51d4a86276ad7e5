//! Categorize command handler

use crate::args::CategorizeArgs;
use crate::context::VaultCliContext;
use crate::output::*;
use crate::utils::read_items;
use serde_json::json;
use tracing::debug;
use vault_intel::prelude::*;

/// Categorize every item of the input file and record the results.
pub fn categorize_items(
    args: &CategorizeArgs,
    ctx: &mut VaultCliContext,
) -> vault_intel::Result<Vec<CategorizationResult>> {
    let items = read_items(&args.items)?;
    debug!("Read {} item(s) from {}", items.len(), args.items.display());

    let categorizer = ContentCategorizer::new(ctx.config.categorization.clone());
    let results = if args.parallel {
        categorizer.par_batch_categorize(&items, &args.database, &mut ctx.store)
    } else {
        categorizer.batch_categorize(&items, &args.database, &mut ctx.store)
    };

    Ok(results)
}

pub fn handle_categorize_command(
    args: CategorizeArgs,
    ctx: &mut VaultCliContext,
    output_format: &str,
) -> vault_intel::Result<()> {
    let results = categorize_items(&args, ctx)?;
    let statistics = args
        .stats
        .then(|| CategorizationStatistics::from_history(&ctx.store.history()));

    if output_format == "json" {
        match statistics {
            Some(statistics) => print_json(&json!({
                "results": results,
                "statistics": statistics,
            })),
            None => print_json(&results),
        }
    } else {
        print_categorization_list(&results);
        if let Some(statistics) = statistics {
            println!();
            print_categorization_statistics(&statistics);
        }
    }

    Ok(())
}
