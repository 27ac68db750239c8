use crate::utils::error::{Result, TaxError};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    GetTax,
    CancelTax,
    AddressValidation,
}

impl ResponseKind {
    pub fn description(&self) -> &'static str {
        match self {
            ResponseKind::GetTax => "Get Tax",
            ResponseKind::CancelTax => "Cancel Tax",
            ResponseKind::AddressValidation => "Address Validation",
        }
    }
}

/// Decoded service reply plus the label used for logging. One instance per
/// call, discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub result: Value,
    kind: ResponseKind,
}

impl Response {
    pub fn get_tax(result: Value) -> Self {
        Self {
            result,
            kind: ResponseKind::GetTax,
        }
    }

    pub fn cancel_tax(result: Value) -> Self {
        Self {
            result,
            kind: ResponseKind::CancelTax,
        }
    }

    pub fn address_validation(result: Value) -> Self {
        Self {
            result,
            kind: ResponseKind::AddressValidation,
        }
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// The service reports failures in-band: either a top-level `error`
    /// object or a `messages` entry with Error/Exception severity.
    pub fn is_error(&self) -> bool {
        if self.result.get("error").is_some() {
            return true;
        }

        self.result
            .get("messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages.iter().any(|message| {
                    matches!(
                        message.get("severity").and_then(Value::as_str),
                        Some("Error") | Some("Exception")
                    )
                })
            })
            .unwrap_or(false)
    }
}

/// Response-handling policy: errors are always logged; whether they become
/// an `Err` is the caller's escalation choice, visible at the call site.
pub fn interpret(response: Response, escalate: bool) -> Result<Response> {
    if response.is_error() {
        tracing::error!("{} Error: {}", response.description(), response.result);
        if escalate {
            return Err(TaxError::ServiceRequest {
                result: response.result,
            });
        }
        return Ok(response);
    }

    tracing::debug!("{} Response: {}", response.description(), response.result);
    Ok(response)
}
