use crate::config::TaxConfig;
use crate::core::lines::LineBuilder;
use crate::core::request::assemble;
use crate::core::response::{interpret, Response};
use crate::domain::model::{Address, Order, Refund, TransactionType};
use crate::domain::ports::TaxApi;
use crate::utils::error::Result;
use serde_json::json;

/// Reference query used by `ping` to verify credentials and connectivity.
const PING_COUNTRY: &str = "US";
const PING_POSTAL_CODE: &str = "07801";

/// Front door of the connector. Owns the transport and the settings; one
/// outbound request and one response per call, nothing cached between calls.
pub struct TaxServiceClient<A: TaxApi> {
    api: A,
    config: TaxConfig,
}

impl<A: TaxApi> TaxServiceClient<A> {
    pub fn new(api: A, config: TaxConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Submits a create-or-adjust transaction for the order. Transport
    /// failures propagate unmodified; service-flagged errors follow the
    /// `raise_exceptions` policy.
    pub async fn compute_tax(
        &self,
        order: &Order,
        transaction_type: TransactionType,
        refund: Option<&Refund>,
    ) -> Result<Response> {
        let lines = LineBuilder::new(order, transaction_type, refund, &self.config).build()?;
        let request = assemble(order, transaction_type, lines, &self.config)?;

        self.log_request("compute_tax", &serde_json::to_value(&request)?);
        let reply = self.api.create_or_adjust_transaction(&request).await?;

        interpret(Response::get_tax(reply), self.config.raise_exceptions)
    }

    /// Voids a previously committed transaction by document code. No line
    /// data is needed.
    pub async fn cancel_tax(&self, transaction_code: &str) -> Result<Response> {
        self.log_request("cancel_tax", &json!({ "transactionCode": transaction_code }));
        let reply = self
            .api
            .void_transaction(&self.config.company_code, transaction_code)
            .await?;

        interpret(Response::cancel_tax(reply), self.config.raise_exceptions)
    }

    /// Best-effort convenience call: a transport failure is converted into a
    /// synthetic error-flagged response instead of aborting the caller.
    pub async fn validate_address(&self, address: &Address) -> Result<Response> {
        self.log_request("validate_address", &serde_json::to_value(address)?);

        let result = match self.api.validate_address(address).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("address validation transport failure: {}", e);
                json!({ "error": { "message": e.to_string() } })
            }
        };

        interpret(
            Response::address_validation(result),
            self.config.raise_exceptions,
        )
    }

    /// Connectivity/credential self-test against a fixed rate lookup. The
    /// reply is returned uninterpreted.
    pub async fn ping(&self) -> Result<serde_json::Value> {
        tracing::info!("Ping Call");
        self.api
            .tax_rates_by_postal_code(PING_COUNTRY, PING_POSTAL_CODE)
            .await
    }

    fn log_request(&self, operation: &str, payload: &serde_json::Value) {
        tracing::debug!("{} request payload: {}", operation, payload);
    }
}
