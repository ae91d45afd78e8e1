const MASK_CHAR: char = '*';
const VISIBLE_DIGITS: usize = 4;

/// Masks a card number for display: only the last 4 characters stay
/// visible, everything before them becomes `*`. Groups of 4 are placed by
/// absolute position from the start of the string, so the visible tail
/// lands where the original digits would: `1234567890123456` becomes
/// `**** **** **** 3456`, a 15-digit number `**** **** ***2 345`.
///
/// Input shorter than 4 characters is returned unchanged.
pub fn mask_card_number(card_number: &str) -> String {
    let len = card_number.chars().count();
    if len < VISIBLE_DIGITS {
        return card_number.to_string();
    }

    let hidden = len - VISIBLE_DIGITS;
    let mut masked = String::new();

    for i in 0..hidden {
        if i > 0 && i % 4 == 0 {
            masked.push(' ');
        }
        masked.push(MASK_CHAR);
    }

    if !masked.is_empty() && hidden % 4 == 0 {
        masked.push(' ');
    }

    for (i, c) in card_number.chars().skip(hidden).enumerate() {
        if i > 0 && (hidden + i) % 4 == 0 {
            masked.push(' ');
        }
        masked.push(c);
    }

    masked
}

/// Groups a freshly entered card number by 4 without masking. Only for
/// not-yet-stored input in validation contexts, never for persisted PANs.
pub fn format_card_number(card_number: &str) -> String {
    let mut formatted = String::new();
    for (i, c) in card_number.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_sixteen_digit_pan() {
        assert_eq!(mask_card_number("1234567890123456"), "**** **** **** 3456");
    }

    #[test]
    fn masks_fifteen_digit_pan() {
        assert_eq!(mask_card_number("123456789012345"), "**** **** ***2 345");
    }

    #[test]
    fn short_input_returned_unchanged() {
        assert_eq!(mask_card_number("123"), "123");
        assert_eq!(mask_card_number(""), "");
    }

    #[test]
    fn exactly_four_digits_stay_visible() {
        assert_eq!(mask_card_number("1234"), "1234");
    }

    #[test]
    fn never_reveals_more_than_last_four() {
        let masked = mask_card_number("9999888877776666");
        let revealed: String = masked.chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(revealed, "6666");
    }

    #[test]
    fn formats_in_groups_of_four() {
        assert_eq!(format_card_number("1234567890123456"), "1234 5678 9012 3456");
        assert_eq!(format_card_number("12345"), "1234 5");
        assert_eq!(format_card_number(""), "");
    }
}
