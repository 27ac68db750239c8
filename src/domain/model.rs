use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Postal address as the tax service expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    /// State/province code, e.g. "NJ".
    pub region: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// One purchasable line of an order, as handed over by the order-management
/// system. Read-only input to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price before promotions.
    pub price: Decimal,
    /// Promotion total applied to this line; zero or negative.
    #[serde(default)]
    pub promo_total: Decimal,
    /// Product tax classification; falls back to the configured default.
    #[serde(default)]
    pub tax_code: Option<String>,
}

impl LineItem {
    /// Extended amount submitted for taxation: price × quantity plus the
    /// (negative) promotion total.
    pub fn taxable_amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity) + self.promo_total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub number: String,
    pub cost: Decimal,
    #[serde(default)]
    pub tax_code: Option<String>,
}

/// Order snapshot consumed by the line builder and request assembler.
/// Owned by the order-management system; never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: String,
    pub date: NaiveDate,
    /// ISO 4217 code, e.g. "USD".
    pub currency: String,
    /// Customer identifier the tax service scopes exemptions by.
    pub customer_code: String,
    pub ship_address: Option<Address>,
    pub bill_address: Option<Address>,
    pub line_items: Vec<LineItem>,
    pub shipments: Vec<Shipment>,
}

/// Refund reference used for ReturnOrder transactions. An empty
/// `line_item_ids` means the refund applies to the order as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub id: u64,
    /// Refunded amount as entered, always positive.
    pub amount: Decimal,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub line_item_ids: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    SalesOrder,
    ReturnOrder,
    VoidTransaction,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::SalesOrder => "SalesOrder",
            TransactionType::ReturnOrder => "ReturnOrder",
            TransactionType::VoidTransaction => "VoidTransaction",
        }
    }
}

/// What a normalized line represents. Internal tag, not part of the wire
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Item,
    Shipment,
    Refund,
}

/// One taxable unit of a tax request: an item, a shipment, or a refund
/// adjustment. `number` is unique within a request and stable across
/// rebuilds so re-submissions are idempotent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLine {
    pub number: String,
    pub item_code: String,
    pub description: String,
    pub quantity: u32,
    /// Signed: positive for sales lines, negative for refund lines.
    pub amount: Decimal,
    pub tax_code: String,
    pub discounted: bool,
    #[serde(skip)]
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAddresses {
    pub ship_from: Address,
    pub ship_to: Address,
}

/// Full payload for a create-or-adjust transaction call. Built fresh per
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub company_code: String,
    /// Document code, the order number.
    pub code: String,
    pub date: NaiveDate,
    pub customer_code: String,
    pub currency_code: String,
    pub commit: bool,
    pub addresses: RequestAddresses,
    pub lines: Vec<NormalizedLine>,
}
