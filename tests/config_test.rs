use anyhow::Result;
use taxlink::{Environment, TaxConfig};
use tempfile::TempDir;

#[test]
fn loads_and_validates_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("taxlink.toml");

    std::fs::write(
        &config_path,
        r#"
account = "2000000000"
license_key = "1A2B3C4D5E6F7G8"
environment = "sandbox"
company_code = "DEFAULT"
raise_exceptions = true

[origin_address]
line1 = "915 S Jackson St"
city = "Montgomery"
region = "AL"
postalCode = "36104"
country = "US"
"#,
    )?;

    let config = TaxConfig::from_file(&config_path)?;
    assert_eq!(config.environment, Environment::Sandbox);
    assert_eq!(config.base_url(), "https://sandbox-rest.avatax.com");
    assert!(config.raise_exceptions);
    assert!(config.tax_calculation_enabled);
    assert_eq!(config.goods_tax_code, "P0000000");
    assert_eq!(config.origin_address.postal_code, "36104");
    Ok(())
}

#[test]
fn rejects_config_file_with_empty_account() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("taxlink.toml");

    std::fs::write(
        &config_path,
        r#"
account = ""
license_key = "1A2B3C4D5E6F7G8"
environment = "production"
company_code = "DEFAULT"

[origin_address]
line1 = "915 S Jackson St"
city = "Montgomery"
region = "AL"
postalCode = "36104"
country = "US"
"#,
    )?;

    assert!(TaxConfig::from_file(&config_path).is_err());
    Ok(())
}
