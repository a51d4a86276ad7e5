//! Configuration check command handler

use crate::context::VaultCliContext;
use crate::output::*;

pub fn handle_check_config_command(
    ctx: &VaultCliContext,
    output_format: &str,
) -> vault_intel::Result<()> {
    vault_intel::config::validate_config(&ctx.config)?;

    if output_format == "json" {
        print_json(&ctx.config);
    } else {
        print_config_summary(&ctx.config);
    }

    Ok(())
}
