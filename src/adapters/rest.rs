use crate::config::TaxConfig;
use crate::domain::model::{Address, TaxRequest};
use crate::domain::ports::TaxApi;
use crate::utils::error::{Result, TaxError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// Identifies this connector to the service on every call.
const CLIENT_HEADER_NAME: &str = "X-Avalara-Client";
const CLIENT_HEADER_VALUE: &str = "taxlink; 0.1.0; rest; v2";

/// REST implementation of the transport port, basic-auth against an
/// AvaTax-style v2 API. Non-2xx replies with a JSON body are decoded as-is:
/// the service reports failures in-band and the response layer flags them.
/// Only connect/decode failures surface as transport errors.
pub struct RestTaxApi {
    client: Client,
    base_url: Url,
    account: String,
    license_key: String,
}

impl RestTaxApi {
    pub fn new(base_url: &str, account: &str, license_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| TaxError::Config {
            message: format!("invalid base URL {}: {}", base_url, e),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            account: account.to_string(),
            license_key: license_key.to_string(),
        })
    }

    pub fn from_config(config: &TaxConfig) -> Result<Self> {
        Self::new(config.base_url(), &config.account, &config.license_key)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| TaxError::Config {
            message: format!("invalid endpoint path {}: {}", path, e),
        })
    }

    async fn post(&self, url: Url, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .basic_auth(&self.account, Some(&self.license_key))
            .header(CLIENT_HEADER_NAME, CLIENT_HEADER_VALUE)
            .json(body)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TaxApi for RestTaxApi {
    async fn create_or_adjust_transaction(&self, request: &TaxRequest) -> Result<Value> {
        let url = self.endpoint("/api/v2/transactions/createoradjust")?;
        self.post(url, &json!({ "createTransactionModel": request }))
            .await
    }

    async fn void_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
    ) -> Result<Value> {
        let url = self.endpoint(&format!(
            "/api/v2/companies/{}/transactions/{}/void",
            company_code, transaction_code
        ))?;
        self.post(url, &json!({ "code": "DocVoided" })).await
    }

    async fn tax_rates_by_postal_code(&self, country: &str, postal_code: &str) -> Result<Value> {
        let url = self.endpoint("/api/v2/taxrates/bypostalcode")?;
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .basic_auth(&self.account, Some(&self.license_key))
            .header(CLIENT_HEADER_NAME, CLIENT_HEADER_VALUE)
            .query(&[("country", country), ("postalCode", postal_code)])
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        Ok(response.json().await?)
    }

    async fn validate_address(&self, address: &Address) -> Result<Value> {
        let url = self.endpoint("/api/v2/addresses/resolve")?;
        self.post(url, &serde_json::to_value(address)?).await
    }
}
