use crate::domain::model::{Address, TaxRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transport seam to the external tax service. The wire protocol is the
/// collaborator's business; this crate only sees decoded JSON replies.
#[async_trait]
pub trait TaxApi: Send + Sync {
    async fn create_or_adjust_transaction(&self, request: &TaxRequest)
        -> Result<serde_json::Value>;

    async fn void_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
    ) -> Result<serde_json::Value>;

    async fn tax_rates_by_postal_code(
        &self,
        country: &str,
        postal_code: &str,
    ) -> Result<serde_json::Value>;

    async fn validate_address(&self, address: &Address) -> Result<serde_json::Value>;
}
