use thiserror::Error;

/// Errors that can occur while reading inputs, simulating decay, or writing results.
#[derive(Error, Debug)]
pub enum DecayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing input: {0}")]
    MissingInput(String),
}

impl From<calamine::Error> for DecayError {
    fn from(e: calamine::Error) -> Self {
        DecayError::Excel(e.to_string())
    }
}

impl From<calamine::XlsxError> for DecayError {
    fn from(e: calamine::XlsxError) -> Self {
        DecayError::Excel(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DecayError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        DecayError::Excel(e.to_string())
    }
}
