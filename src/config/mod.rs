use crate::domain::model::Address;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GOODS_TAX_CODE: &str = "P0000000";
pub const DEFAULT_SHIPPING_TAX_CODE: &str = "FR020100";

const SANDBOX_BASE_URL: &str = "https://sandbox-rest.avatax.com";
const PRODUCTION_BASE_URL: &str = "https://rest.avatax.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

/// Connector settings, passed explicitly into the components that need them.
/// `tax_calculation_enabled` is exposed for the caller's gating; the client
/// itself does not consult it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    pub account: String,
    pub license_key: String,
    pub environment: Environment,
    pub company_code: String,
    /// Ship-from address stamped on every transaction.
    pub origin_address: Address,
    #[serde(default = "default_goods_tax_code")]
    pub goods_tax_code: String,
    #[serde(default = "default_shipping_tax_code")]
    pub shipping_tax_code: String,
    /// Escalation switch: raise on service-flagged errors instead of
    /// returning the error-flagged response.
    #[serde(default)]
    pub raise_exceptions: bool,
    #[serde(default = "default_true")]
    pub tax_calculation_enabled: bool,
    /// Test hook: overrides the environment-derived service URL.
    #[serde(default)]
    pub base_url_override: Option<String>,
}

fn default_goods_tax_code() -> String {
    DEFAULT_GOODS_TAX_CODE.to_string()
}

fn default_shipping_tax_code() -> String {
    DEFAULT_SHIPPING_TAX_CODE.to_string()
}

fn default_true() -> bool {
    true
}

impl TaxConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TaxConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

impl Validate for TaxConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("account", &self.account)?;
        validate_non_empty("license_key", &self.license_key)?;
        validate_non_empty("company_code", &self.company_code)?;
        if let Some(url) = &self.base_url_override {
            validate_url("base_url_override", url)?;
        }
        Ok(())
    }
}
