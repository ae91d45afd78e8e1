mod encryption;
mod logs;
mod mask;

pub use self::encryption::{CardCipher, CodecError};
pub use self::logs::Logger;
pub use self::mask::{format_card_number, mask_card_number};
