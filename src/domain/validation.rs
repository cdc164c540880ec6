//! Small predicates and normalizers shared by the card and transaction models.

/// True when `value` is non-empty and made only of ASCII digits.
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` is non-empty and made only of ASCII letters and digits.
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// True when `value` is `minimum` or more.
pub fn is_at_least<T: PartialOrd>(value: T, minimum: T) -> bool {
    value >= minimum
}

/// Drops every character that is not an ASCII digit.
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keeps at most `max` characters (not bytes) of `value`.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
