use super::{default_page, default_page_size};
use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

static CARD_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("static pattern"));

fn validate_card_number(card_number: &str) -> Result<(), ValidationError> {
    if CARD_NUMBER_PATTERN.is_match(card_number) {
        Ok(())
    } else {
        Err(ValidationError::new("card_number").with_message("Invalid card number format".into()))
    }
}

/// The card number arrives in plaintext from the caller and is encrypted
/// before it is stored or compared; it must never be logged as-is.
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct CreateCardRequest {
    pub user_id: i32,

    #[validate(custom(function = validate_card_number))]
    pub card_number: String,

    pub expiry_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct FindCardsByUser {
    pub user_id: i32,

    /// Optional status filter; an unknown value is a caller error.
    pub status: Option<String>,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}
