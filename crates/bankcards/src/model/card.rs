use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// `card_number` holds the hex ciphertext of the PAN, never the plaintext.
/// Balances are minor units (cents).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardModel {
    pub card_id: i32,
    pub user_id: i32,
    pub card_number: String,
    pub status: String,
    pub balance: i64,
    pub expiry_date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl CardModel {
    pub fn card_status(&self) -> Option<CardStatus> {
        CardStatus::from_str(&self.status).ok()
    }

    pub fn is_active(&self) -> bool {
        self.card_status() == Some(CardStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "ACTIVE",
            CardStatus::Blocked => "BLOCKED",
            CardStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(CardStatus::Active),
            "BLOCKED" => Ok(CardStatus::Blocked),
            "EXPIRED" => Ok(CardStatus::Expired),
            other => Err(format!(
                "Invalid card status: {other}. Valid values: ACTIVE, BLOCKED, EXPIRED"
            )),
        }
    }
}
