use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A committed ledger entry. Rows are append-only: once written they are
/// never updated, so a row's existence is the receipt of a completed
/// transfer attempt.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransferModel {
    pub transfer_id: i32,
    pub transfer_no: Uuid,
    pub from_card_id: i32,
    pub to_card_id: i32,
    pub amount: i64,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Success,
    // Schema-compatible, but the validated path never records it:
    // rejected attempts abort before any row is written.
    Failed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Success => "SUCCESS",
            TransferStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUCCESS" => Ok(TransferStatus::Success),
            "FAILED" => Ok(TransferStatus::Failed),
            other => Err(format!("Invalid transfer status: {other}")),
        }
    }
}
