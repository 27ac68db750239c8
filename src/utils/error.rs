use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxError {
    #[error("Invalid line input: {message}")]
    InvalidLineInput { message: String },

    #[error("Incomplete order data: missing {field}")]
    IncompleteOrderData { field: String },

    /// The tax service answered but flagged the transaction as an error.
    /// Display renders the decoded result payload verbatim.
    #[error("{result}")]
    ServiceRequest { result: serde_json::Value },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, TaxError>;
