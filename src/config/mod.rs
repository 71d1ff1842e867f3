pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args;

#[cfg(feature = "cli")]
pub use args::CliConfig;

pub const DEFAULT_ICON_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/homarr-labs/dashboard-icons/svg";
