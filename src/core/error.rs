use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid country data: {field} {message}")]
    InvalidCountry {
        field: &'static str,
        message: String,
    },

    #[error("invalid query: {field} {message}")]
    InvalidQuery {
        field: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
