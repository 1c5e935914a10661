//! Participant phone numbers.

/// Shortest accepted number: area code + 8-digit landline.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Longest accepted number: country code + area code + 9-digit mobile.
pub const MAX_PHONE_DIGITS: usize = 13;

/// Strip formatting from a phone number and check its length.
///
/// Accepts spaces, dashes, dots, parentheses and a leading `+`. Returns the
/// bare digits, or `None` if anything else is present or the digit count is
/// out of range.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits = String::with_capacity(raw.len());
    for (i, c) in raw.trim().char_indices() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            '+' if i == 0 => {}
            _ => return None,
        }
    }
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS)
        .contains(&digits.len())
        .then_some(digits)
}
