mod command;
mod query;

pub use self::command::CardCommandService;
pub use self::query::CardQueryService;

use crate::{
    domain::responses::CardResponse,
    errors::ServiceError,
    model::card::CardModel,
    utils::{CardCipher, mask_card_number},
};

/// Decrypts the stored ciphertext and masks the PAN before it leaves the
/// service layer. Plaintext card numbers exist only inside this function.
pub(crate) fn card_to_response(
    cipher: &CardCipher,
    card: &CardModel,
) -> Result<CardResponse, ServiceError> {
    let pan = cipher.decrypt(&card.card_number)?;

    Ok(CardResponse {
        id: card.card_id,
        user_id: card.user_id,
        card_number: mask_card_number(&pan),
        status: card.status.clone(),
        balance: card.balance,
        expiry_date: card.expiry_date.to_string(),
        created_at: card.created_at.map(|t| t.to_string()),
    })
}
