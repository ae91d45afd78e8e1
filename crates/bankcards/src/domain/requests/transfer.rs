use super::{default_page, default_page_size};
use serde::Deserialize;
use validator::Validate;

/// Transfer amounts are minor units (cents): 1 cent up to 1,000,000.00.
pub const MIN_TRANSFER_AMOUNT: i64 = 1;
pub const MAX_TRANSFER_AMOUNT: i64 = 100_000_000;
pub const MAX_DESCRIPTION_LENGTH: u64 = 500;

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct CreateTransferRequest {
    pub from_card_id: i32,

    pub to_card_id: i32,

    #[validate(range(
        min = 1,
        max = 100_000_000,
        message = "Amount must be between 0.01 and 1,000,000.00"
    ))]
    pub amount: i64,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct FindTransfersByCard {
    pub card_id: i32,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct FindTransfersByUser {
    pub user_id: i32,

    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}
