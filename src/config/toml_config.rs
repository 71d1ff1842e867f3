use crate::config::DEFAULT_ICON_BASE_URL;
use crate::core::batch::DEFAULT_CONCURRENT_PROBES;
use crate::core::template::DEFAULT_PLACEHOLDER;
use crate::core::ConfigProvider;
use crate::utils::error::{GenError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub selection: SelectionConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub icons: IconsConfig,
    #[serde(default)]
    pub template: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub prefix: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsConfig {
    #[serde(default = "default_icon_base_url")]
    pub base_url: String,
    #[serde(default = "default_icon_extension")]
    pub extension: String,
    pub concurrent_probes: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: default_icon_base_url(),
            extension: default_icon_extension(),
            concurrent_probes: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_output_file")]
    pub filename: String,
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

fn default_icon_extension() -> String {
    "svg".to_string()
}

fn default_output_file() -> String {
    "services.js".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ICON_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GenError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("icons.base_url", &self.icons.base_url)?;
        validation::validate_extension("icons.extension", &self.icons.extension)?;

        if let Some(concurrent) = self.icons.concurrent_probes {
            validation::validate_positive_number("icons.concurrent_probes", concurrent, 1)?;
        }

        if let Some(catalog) = &self.catalog {
            validation::validate_url("catalog.endpoint", &catalog.endpoint)?;
            if let Some(extension) = &catalog.extension {
                validation::validate_extension("catalog.extension", extension)?;
            }
        }

        if let Some(placeholder) = &self.template.placeholder {
            validation::validate_non_empty_string("template.placeholder", placeholder)?;
        }
        if let Some(path) = &self.template.path {
            validation::validate_path("template.path", path)?;
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_path("output.filename", &self.output.filename)?;

        for service in &self.selection.services {
            validation::validate_non_empty_string("selection.services", service)?;
        }

        Ok(())
    }

    pub fn catalog_prefix(&self) -> &str {
        self.catalog
            .as_ref()
            .and_then(|c| c.prefix.as_deref())
            .unwrap_or("rules")
    }

    pub fn catalog_extension(&self) -> &str {
        self.catalog
            .as_ref()
            .and_then(|c| c.extension.as_deref())
            .unwrap_or("yaml")
    }

    pub fn probe_timeout(&self) -> Option<std::time::Duration> {
        self.icons
            .timeout_seconds
            .map(std::time::Duration::from_secs)
    }
}

impl ConfigProvider for TomlConfig {
    fn services(&self) -> &[String] {
        &self.selection.services
    }

    fn icon_base_url(&self) -> &str {
        &self.icons.base_url
    }

    fn icon_extension(&self) -> &str {
        &self.icons.extension
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file(&self) -> &str {
        &self.output.filename
    }

    fn template_path(&self) -> Option<&str> {
        self.template.path.as_deref()
    }

    fn placeholder(&self) -> &str {
        self.template
            .placeholder
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER)
    }

    fn concurrent_probes(&self) -> usize {
        self.icons
            .concurrent_probes
            .unwrap_or(DEFAULT_CONCURRENT_PROBES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
