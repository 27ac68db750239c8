use crate::config::TaxConfig;
use crate::domain::model::{LineItem, LineKind, NormalizedLine, Order, Refund, TransactionType};
use crate::utils::error::{Result, TaxError};
use rust_decimal::{Decimal, RoundingStrategy};

/// Builds the ordered line sequence of a tax request from an order and, for
/// returns, a refund. Items first, then shipments, then refund lines; the
/// sequence is deterministic so re-submitting a document is idempotent.
pub struct LineBuilder<'a> {
    order: &'a Order,
    transaction_type: TransactionType,
    refund: Option<&'a Refund>,
    goods_tax_code: &'a str,
    shipping_tax_code: &'a str,
}

impl<'a> LineBuilder<'a> {
    pub fn new(
        order: &'a Order,
        transaction_type: TransactionType,
        refund: Option<&'a Refund>,
        config: &'a TaxConfig,
    ) -> Self {
        Self {
            order,
            transaction_type,
            refund,
            goods_tax_code: &config.goods_tax_code,
            shipping_tax_code: &config.shipping_tax_code,
        }
    }

    pub fn build(&self) -> Result<Vec<NormalizedLine>> {
        match self.transaction_type {
            TransactionType::SalesOrder => {
                let mut lines = self.item_lines()?;
                lines.extend(self.shipment_lines());
                Ok(lines)
            }
            TransactionType::ReturnOrder => {
                let refund = self.refund.ok_or_else(|| TaxError::InvalidLineInput {
                    message: format!(
                        "ReturnOrder for order {} requires a refund",
                        self.order.number
                    ),
                })?;
                self.refund_lines(refund)
            }
            // A void references the prior transaction by code only.
            TransactionType::VoidTransaction => Ok(Vec::new()),
        }
    }

    fn item_lines(&self) -> Result<Vec<NormalizedLine>> {
        self.order
            .line_items
            .iter()
            .map(|item| self.item_line(item))
            .collect()
    }

    fn item_line(&self, item: &LineItem) -> Result<NormalizedLine> {
        if item.quantity == 0 {
            return Err(TaxError::InvalidLineInput {
                message: format!(
                    "line item {} on order {} has zero quantity",
                    item.id, self.order.number
                ),
            });
        }

        Ok(NormalizedLine {
            number: format!("{}-LI", item.id),
            item_code: item.sku.clone(),
            description: item.name.clone(),
            quantity: item.quantity,
            amount: item.taxable_amount(),
            tax_code: item
                .tax_code
                .clone()
                .unwrap_or_else(|| self.goods_tax_code.to_string()),
            discounted: !item.promo_total.is_zero(),
            kind: LineKind::Item,
        })
    }

    fn shipment_lines(&self) -> Vec<NormalizedLine> {
        self.order
            .shipments
            .iter()
            .map(|shipment| NormalizedLine {
                number: format!("{}-FR", shipment.number),
                item_code: shipment.number.clone(),
                description: "Shipping charge".to_string(),
                quantity: 1,
                amount: shipment.cost,
                tax_code: shipment
                    .tax_code
                    .clone()
                    .unwrap_or_else(|| self.shipping_tax_code.to_string()),
                discounted: false,
                kind: LineKind::Shipment,
            })
            .collect()
    }

    /// A whole-order refund becomes a single adjustment line. A refund that
    /// references original line items becomes one line per referenced item,
    /// split pro-rata by the items' taxable amounts; the last line absorbs
    /// the rounding remainder so the lines sum to exactly -amount.
    fn refund_lines(&self, refund: &Refund) -> Result<Vec<NormalizedLine>> {
        if refund.line_item_ids.is_empty() {
            return Ok(vec![NormalizedLine {
                number: format!("{}-RA", refund.id),
                item_code: format!("refund-{}", refund.id),
                description: refund
                    .reason
                    .clone()
                    .unwrap_or_else(|| "Refund".to_string()),
                quantity: 1,
                amount: -refund.amount,
                tax_code: self.goods_tax_code.to_string(),
                discounted: false,
                kind: LineKind::Refund,
            }]);
        }

        let mut affected = Vec::with_capacity(refund.line_item_ids.len());
        let mut seen = std::collections::HashSet::new();
        for id in &refund.line_item_ids {
            if !seen.insert(*id) {
                return Err(TaxError::InvalidLineInput {
                    message: format!(
                        "refund {} references line item {} more than once",
                        refund.id, id
                    ),
                });
            }
            let item = self
                .order
                .line_items
                .iter()
                .find(|li| li.id == *id)
                .ok_or_else(|| TaxError::InvalidLineInput {
                    message: format!(
                        "refund {} references line item {} absent from order {}",
                        refund.id, id, self.order.number
                    ),
                })?;
            affected.push(item);
        }

        let total: Decimal = affected.iter().map(|li| li.taxable_amount()).sum();
        if total <= Decimal::ZERO {
            return Err(TaxError::InvalidLineInput {
                message: format!(
                    "refund {} cannot be split: referenced lines have no taxable amount",
                    refund.id
                ),
            });
        }

        let mut remaining = refund.amount;
        let last = affected.len() - 1;
        let lines = affected
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let share = if idx == last {
                    remaining
                } else {
                    (refund.amount * item.taxable_amount() / total)
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
                };
                remaining -= share;

                NormalizedLine {
                    number: format!("{}-RA{}", refund.id, idx + 1),
                    item_code: item.sku.clone(),
                    description: item.name.clone(),
                    quantity: 1,
                    amount: -share,
                    tax_code: item
                        .tax_code
                        .clone()
                        .unwrap_or_else(|| self.goods_tax_code.to_string()),
                    discounted: false,
                    kind: LineKind::Refund,
                }
            })
            .collect();

        Ok(lines)
    }
}
