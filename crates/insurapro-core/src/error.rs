use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid first name: {0}")]
    InvalidFirstName(String),
    #[error("invalid last name: {0}")]
    InvalidLastName(String),
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("invalid phone number (expected 10-15 digits): {0}")]
    InvalidPhone(String),
    #[error("invalid customer id: {0}")]
    InvalidCustomerId(String),
    #[error("{field} cannot contain commas or line breaks: {value:?}")]
    UnstorableField { field: &'static str, value: String },
    #[error("interaction {field} cannot contain '|', ',Date:' or line breaks: {value:?}")]
    UnstorableInteraction { field: &'static str, value: String },
}
