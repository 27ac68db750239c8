pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::rest::RestTaxApi;
pub use config::{Environment, TaxConfig};
pub use core::client::TaxServiceClient;
pub use core::lines::LineBuilder;
pub use core::response::Response;
pub use domain::model::{
    Address, LineItem, LineKind, NormalizedLine, Order, Refund, Shipment, TaxRequest,
    TransactionType,
};
pub use domain::ports::TaxApi;
pub use utils::error::{Result, TaxError};
