use clap::Parser;
use is_terminal::IsTerminal;
use std::process::ExitCode;
use tracing::Level;
use vault_intel_cli::handlers::*;
use vault_intel_cli::{Cli, Commands, VaultCliContext, output_error};

fn main() -> ExitCode {
    let cli_args = Cli::parse();

    // Priority: env var > cli arg > default
    let output_format = std::env::var("VAULT_INTEL_OUTPUT").unwrap_or_else(|_| cli_args.output.clone());

    let is_quiet = cli_args.quiet
        || std::env::var("VAULT_INTEL_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // JSON output implies quiet logging so stdout stays machine-readable
    let log_level = if is_quiet || output_format == "json" {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli_args, &output_format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

fn run(cli_args: Cli, output_format: &str) -> vault_intel::Result<()> {
    if matches!(cli_args.command, Commands::Version) {
        println!("Vault Intel CLI v{}", vault_intel::VERSION);
        return Ok(());
    }

    let mut ctx = VaultCliContext::new(
        cli_args.config.as_deref(),
        cli_args.categorization_config.as_deref(),
        cli_args.relationship_config.as_deref(),
        cli_args.preset,
    )?;

    match cli_args.command {
        Commands::Version => Ok(()),
        Commands::Categorize(args) => handle_categorize_command(args, &mut ctx, output_format),
        Commands::Relate(args) => handle_relate_command(args, &mut ctx, output_format),
        Commands::Cross(args) => handle_cross_command(args, &mut ctx, output_format),
        Commands::CheckConfig => handle_check_config_command(&ctx, output_format),
    }
}
