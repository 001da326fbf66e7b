/// CLI configuration
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use spendwise_client::{ApiConfig, DEFAULT_BASE_URL};
use spendwise_core::budget::{DEFAULT_CURRENCY, DEFAULT_WARNING_RATIO};
use spendwise_core::BudgetPolicy;
use spendwise_expenses::DEFAULT_PAGE_SIZE;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "spendwise.toml";

/// Prefix for environment overrides, e.g. `SPENDWISE_API__BASE_URL`
pub const ENV_PREFIX: &str = "SPENDWISE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_expenses")]
    pub expenses: ExpenseSettings,

    #[serde(default = "default_budget")]
    pub budget: BudgetSettings,

    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExpenseSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BudgetSettings {
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,

    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Stored credentials; command-line flags take precedence
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct AuthSettings {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, env_source())
    }

    /// Load with a custom environment source
    pub fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SPENDWISE_)
        settings = settings.add_source(env);

        let config: Self = settings
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("API base URL is required (set SPENDWISE_API__BASE_URL)");
        }

        if self.expenses.page_size == 0 {
            bail!("expenses.page_size must be at least 1");
        }

        let ratio = self.budget.warning_ratio;
        let in_range = ratio > 0.0 && ratio <= 1.0;
        if !in_range {
            bail!("budget.warning_ratio must be in (0, 1], got {}", ratio);
        }

        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone()).timeouts(
            Duration::from_secs(self.api.timeout_secs),
            Duration::from_secs(self.api.connect_timeout_secs),
        )
    }

    pub fn budget_policy(&self) -> BudgetPolicy {
        BudgetPolicy {
            warning_ratio: self.budget.warning_ratio,
            currency: self.budget.currency.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            expenses: default_expenses(),
            budget: default_budget(),
            auth: AuthSettings::default(),
        }
    }
}

/// `SPENDWISE_` variables with `__` between nested keys
pub fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_expenses() -> ExpenseSettings {
    ExpenseSettings {
        page_size: default_page_size(),
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_budget() -> BudgetSettings {
    BudgetSettings {
        warning_ratio: default_warning_ratio(),
        currency: default_currency(),
    }
}

fn default_warning_ratio() -> f64 {
    DEFAULT_WARNING_RATIO
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.expenses.page_size, 10);
        assert_eq!(config.budget.currency, "RWF");
        assert_eq!(config.api_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut config = AppConfig::default();
        config.expenses.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn warning_ratio_bounds() {
        let mut config = AppConfig::default();
        config.budget.warning_ratio = 1.0;
        assert!(config.validate().is_ok());
        config.budget.warning_ratio = 0.0;
        assert!(config.validate().is_err());
        config.budget.warning_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_hides_password() {
        let auth = AuthSettings {
            email: Some("a@b.co".into()),
            password: Some("hunter2".into()),
        };
        let shown = format!("{:?}", auth);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("a@b.co"));
    }
}
