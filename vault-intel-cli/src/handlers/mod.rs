//! Command handlers for the Vault Intel CLI

pub mod categorize;
pub mod config;
pub mod cross;
pub mod relate;

pub use categorize::handle_categorize_command;
pub use config::handle_check_config_command;
pub use cross::handle_cross_command;
pub use relate::handle_relate_command;
