use crate::error::CoreError;
use regex::Regex;
use std::sync::LazyLock;

/// Letters, optionally joined by single `'`, `,`, `.`, `-` or `_` separators.
pub const NAME_PATTERN: &str = r"^[A-Za-z]+(?:[',.\-_][A-Za-z]+)*$";
pub const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_+&*-]+(?:\.[A-Za-z0-9_+&*-]+)*@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,7}$";
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{10,15}$";

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("invalid name regex pattern"));
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("invalid email regex pattern"));
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("invalid phone regex pattern"));

/// Delimiters of the customers file that no customer field may contain.
const RECORD_DELIMITERS: [char; 3] = [',', '\n', '\r'];
const INTERACTION_DELIMITERS: [char; 3] = ['|', '\n', '\r'];
const INTERACTION_DATE_MARKER: &str = ",Date:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_REGEX.is_match(value)
}

/// True when `value` can be written as one field of a customer record.
pub fn is_record_field(value: &str) -> bool {
    !value.contains(RECORD_DELIMITERS)
}

/// True when `value` can be written as an interaction type or date without
/// splitting the entry or the line.
pub fn is_interaction_field(value: &str) -> bool {
    !value.contains(INTERACTION_DELIMITERS) && !value.contains(INTERACTION_DATE_MARKER)
}

/// A valid name that also fits in a record. The name pattern allows inner
/// commas, which the file format cannot hold.
pub fn is_storable_name(value: &str) -> bool {
    is_valid_name(value) && is_record_field(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

pub fn validate_name(field: NameField, value: &str) -> Result<(), CoreError> {
    if is_storable_name(value) {
        return Ok(());
    }
    Err(match field {
        NameField::First => CoreError::InvalidFirstName(value.to_string()),
        NameField::Last => CoreError::InvalidLastName(value.to_string()),
    })
}

pub fn validate_email(value: &str) -> Result<(), CoreError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(CoreError::InvalidEmail(value.to_string()))
    }
}

pub fn validate_phone(value: &str) -> Result<(), CoreError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(CoreError::InvalidPhone(value.to_string()))
    }
}

/// Rejects values that would corrupt the line format, whatever else they are.
pub fn check_record_field(field: &'static str, value: &str) -> Result<(), CoreError> {
    if is_record_field(value) {
        Ok(())
    } else {
        Err(CoreError::UnstorableField {
            field,
            value: value.to_string(),
        })
    }
}

pub fn check_interaction_field(field: &'static str, value: &str) -> Result<(), CoreError> {
    if is_interaction_field(value) {
        Ok(())
    } else {
        Err(CoreError::UnstorableInteraction {
            field,
            value: value.to_string(),
        })
    }
}
