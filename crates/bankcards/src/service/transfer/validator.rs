use crate::{
    domain::requests::transfer::CreateTransferRequest,
    errors::{
        DESTINATION_CARD_NOT_ACTIVE, INSUFFICIENT_BALANCE, ServiceError, SOURCE_CARD_NOT_ACTIVE,
        TRANSFER_SAME_CARD, UNAUTHORIZED_TRANSFER_FROM, UNAUTHORIZED_TRANSFER_TO,
    },
    model::card::CardModel,
};

/// Business checks for a transfer, in a fixed order so a request failing
/// several of them always gets the same error: distinct cards, ownership
/// of the source, ownership of the destination, source status,
/// destination status, then balance. Shape validation and card loading
/// happen before this runs; the status and balance checks are repeated
/// under lock at commit time.
pub(crate) fn validate_transfer(
    req: &CreateTransferRequest,
    caller_id: i32,
    from: &CardModel,
    to: &CardModel,
) -> Result<(), ServiceError> {
    if from.card_id == to.card_id {
        return Err(ServiceError::BadRequest(TRANSFER_SAME_CARD.to_string()));
    }

    if from.user_id != caller_id {
        return Err(ServiceError::Forbidden(UNAUTHORIZED_TRANSFER_FROM.to_string()));
    }

    if to.user_id != caller_id {
        return Err(ServiceError::Forbidden(UNAUTHORIZED_TRANSFER_TO.to_string()));
    }

    if !from.is_active() {
        return Err(ServiceError::BadRequest(SOURCE_CARD_NOT_ACTIVE.to_string()));
    }

    if !to.is_active() {
        return Err(ServiceError::BadRequest(DESTINATION_CARD_NOT_ACTIVE.to_string()));
    }

    if from.balance < req.amount {
        return Err(ServiceError::InsufficientBalance(
            INSUFFICIENT_BALANCE.to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card(card_id: i32, user_id: i32, status: &str, balance: i64) -> CardModel {
        CardModel {
            card_id,
            user_id,
            card_number: "deadbeef".to_string(),
            status: status.to_string(),
            balance,
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    fn request(amount: i64) -> CreateTransferRequest {
        CreateTransferRequest {
            from_card_id: 1,
            to_card_id: 2,
            amount,
            description: None,
        }
    }

    #[test]
    fn rejects_same_card_regardless_of_balance() {
        let source = card(1, 7, "ACTIVE", 1_000_000);
        let err = validate_transfer(&request(1), 7, &source, &source).unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(msg) if msg == TRANSFER_SAME_CARD));
    }

    #[test]
    fn accepts_transfer_between_own_active_cards() {
        let result = validate_transfer(
            &request(500),
            7,
            &card(1, 7, "ACTIVE", 1_000),
            &card(2, 7, "ACTIVE", 0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn exact_balance_is_sufficient() {
        let result = validate_transfer(
            &request(1_000),
            7,
            &card(1, 7, "ACTIVE", 1_000),
            &card(2, 7, "ACTIVE", 0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_foreign_source_before_anything_else() {
        // Source is foreign AND blocked AND short on funds; ownership wins.
        let err = validate_transfer(
            &request(500),
            7,
            &card(1, 8, "BLOCKED", 0),
            &card(2, 7, "ACTIVE", 0),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(msg) if msg == UNAUTHORIZED_TRANSFER_FROM));
    }

    #[test]
    fn rejects_foreign_destination() {
        let err = validate_transfer(
            &request(500),
            7,
            &card(1, 7, "ACTIVE", 1_000),
            &card(2, 8, "ACTIVE", 0),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(msg) if msg == UNAUTHORIZED_TRANSFER_TO));
    }

    #[test]
    fn rejects_inactive_source() {
        let err = validate_transfer(
            &request(500),
            7,
            &card(1, 7, "BLOCKED", 1_000),
            &card(2, 7, "ACTIVE", 0),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(msg) if msg == SOURCE_CARD_NOT_ACTIVE));
    }

    #[test]
    fn rejects_inactive_destination() {
        let err = validate_transfer(
            &request(500),
            7,
            &card(1, 7, "ACTIVE", 1_000),
            &card(2, 7, "EXPIRED", 0),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(msg) if msg == DESTINATION_CARD_NOT_ACTIVE));
    }

    #[test]
    fn rejects_insufficient_balance() {
        let err = validate_transfer(
            &request(1_001),
            7,
            &card(1, 7, "ACTIVE", 1_000),
            &card(2, 7, "ACTIVE", 0),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientBalance(msg) if msg == INSUFFICIENT_BALANCE));
    }
}
