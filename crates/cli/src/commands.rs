/// Pull request checking commands
pub mod check;
/// Configuration management commands
pub mod config_cmd;
