pub const TRANSFER_NOT_FOUND: &str = "Transfer not found";
pub const TRANSFER_SAME_CARD: &str = "Cannot transfer to the same card";
pub const SOURCE_CARD_NOT_FOUND: &str = "Source card not found";
pub const DESTINATION_CARD_NOT_FOUND: &str = "Destination card not found";
pub const INSUFFICIENT_BALANCE: &str = "Insufficient balance on source card";
pub const SOURCE_CARD_NOT_ACTIVE: &str = "Source card is not active";
pub const DESTINATION_CARD_NOT_ACTIVE: &str = "Destination card is not active";
pub const UNAUTHORIZED_TRANSFER_FROM: &str = "You can only transfer from your own cards";
pub const UNAUTHORIZED_TRANSFER_TO: &str = "You can only transfer to your own cards";
pub const UNAUTHORIZED_VIEW_TRANSFER: &str = "You don't have permission to view this transfer";
pub const UNAUTHORIZED_VIEW_USER_HISTORY: &str = "You can only view your own transfer history";

pub const CARD_NOT_FOUND: &str = "Card not found";
pub const USER_NOT_FOUND: &str = "User not found";
pub const CURRENT_USER_NOT_FOUND: &str = "Current user not found";
pub const CARD_NUMBER_EXISTS: &str = "Card number already exists";
pub const INVALID_CARD_NUMBER: &str = "Invalid card number format";
pub const UNAUTHORIZED_VIEW_CARDS: &str = "You don't have permission to view these cards";
pub const UNAUTHORIZED_CARD_ACTION: &str =
    "You don't have permission to perform this action on this card";

pub const USERNAME_EXISTS: &str = "Username already exists";
pub const EMAIL_EXISTS: &str = "Email already exists";
pub const ADMIN_ONLY: &str = "Access denied";
