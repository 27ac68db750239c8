use crate::config::TaxConfig;
use crate::domain::model::{NormalizedLine, Order, RequestAddresses, TaxRequest, TransactionType};
use crate::utils::error::{Result, TaxError};

/// Combines built lines with order-level fields into the request payload.
/// Pure; never drops or duplicates lines. Transactions are submitted as
/// uncommitted estimates, committing happens on invoice outside this crate.
pub fn assemble(
    order: &Order,
    transaction_type: TransactionType,
    lines: Vec<NormalizedLine>,
    config: &TaxConfig,
) -> Result<TaxRequest> {
    let ship_to = order
        .ship_address
        .clone()
        .ok_or_else(|| TaxError::IncompleteOrderData {
            field: "ship_address".to_string(),
        })?;

    if order.currency.trim().is_empty() {
        return Err(TaxError::IncompleteOrderData {
            field: "currency".to_string(),
        });
    }
    if config.company_code.trim().is_empty() {
        return Err(TaxError::IncompleteOrderData {
            field: "company_code".to_string(),
        });
    }

    Ok(TaxRequest {
        transaction_type,
        company_code: config.company_code.clone(),
        code: order.number.clone(),
        date: order.date,
        customer_code: order.customer_code.clone(),
        currency_code: order.currency.clone(),
        commit: false,
        addresses: RequestAddresses {
            ship_from: config.origin_address.clone(),
            ship_to,
        },
        lines,
    })
}
