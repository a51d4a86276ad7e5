pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use commands::{Cli, Commands};
pub use context::VaultCliContext;
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error,
    print_categorization, print_categorization_list, print_categorization_statistics,
    print_config_summary, print_cross_database_report, print_discovery_statistics,
    print_relationship_list,
};
pub use utils::{read_item, read_items, read_items_by_database};
