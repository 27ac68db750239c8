pub mod client;
pub mod lines;
pub mod request;
pub mod response;

pub use crate::domain::model::{NormalizedLine, Order, Refund, TaxRequest, TransactionType};
pub use crate::domain::ports::TaxApi;
pub use crate::utils::error::Result;
