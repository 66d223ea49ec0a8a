//! Error types for Dompet

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unable to parse string \"{0}\" as a number")]
    InvalidNumber(String),

    #[error("Unable to parse \"{0}\" as a date")]
    InvalidDate(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Insufficient data: need at least {required} daily observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Forecast error: {0}")]
    Forecast(String),
}

impl Error {
    /// Short name of the error kind, echoed to API callers next to the message
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Csv(_) => "Csv",
            Error::Io(_) => "Io",
            Error::Json(_) => "Json",
            Error::Config(_) => "Config",
            Error::MissingColumn(_) => "MissingColumn",
            Error::InvalidNumber(_) => "InvalidNumber",
            Error::InvalidDate(_) => "InvalidDate",
            Error::InvalidData(_) => "InvalidData",
            Error::Training(_) => "Training",
            Error::ModelNotFound(_) => "ModelNotFound",
            Error::InsufficientData { .. } => "InsufficientData",
            Error::Forecast(_) => "Forecast",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_names() {
        assert_eq!(Error::InvalidNumber("abc".into()).kind(), "InvalidNumber");
        assert_eq!(
            Error::InsufficientData {
                required: 17,
                actual: 3
            }
            .kind(),
            "InsufficientData"
        );
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = Error::InsufficientData {
            required: 17,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 17 daily observations, got 3"
        );
    }
}
