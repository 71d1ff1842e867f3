use crate::config::DEFAULT_ICON_BASE_URL;
use crate::core::template::DEFAULT_PLACEHOLDER;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "svc-configgen")]
#[command(about = "Generate per-service configuration records from service identifiers")]
pub struct CliConfig {
    /// Services to include, in output order
    #[arg(long, short = 's', value_delimiter = ',')]
    pub services: Vec<String>,

    /// JSON tree listing used as the service catalog
    #[arg(long)]
    pub catalog_endpoint: Option<String>,

    /// Directory inside the listing that holds one file per service
    #[arg(long, default_value = "rules")]
    pub catalog_prefix: String,

    #[arg(long, default_value = "yaml")]
    pub catalog_extension: String,

    #[arg(long, default_value = DEFAULT_ICON_BASE_URL)]
    pub icon_base_url: String,

    #[arg(long, default_value = "svg")]
    pub icon_extension: String,

    /// Template file containing the placeholder; built-in template when omitted
    #[arg(long)]
    pub template: Option<String>,

    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    pub placeholder: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "services.js")]
    pub output_file: String,

    #[arg(long, default_value = "8")]
    pub concurrent_probes: usize,

    /// List catalog entries matching the query and exit
    #[arg(long)]
    pub search: Option<String>,

    /// Print the rendered output instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn services(&self) -> &[String] {
        &self.services
    }

    fn icon_base_url(&self) -> &str {
        &self.icon_base_url
    }

    fn icon_extension(&self) -> &str {
        &self.icon_extension
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn template_path(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn concurrent_probes(&self) -> usize {
        self.concurrent_probes
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("icon_base_url", &self.icon_base_url)?;
        validation::validate_extension("icon_extension", &self.icon_extension)?;
        if let Some(endpoint) = &self.catalog_endpoint {
            validation::validate_url("catalog_endpoint", endpoint)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_path("output_file", &self.output_file)?;
        validation::validate_non_empty_string("placeholder", &self.placeholder)?;
        validation::validate_positive_number("concurrent_probes", self.concurrent_probes, 1)?;
        Ok(())
    }
}
