//! Phone number normalisation to E.164.

use crate::error::NotificationError;

const SEPARATORS: &[char] = &[' ', '-', '.', '(', ')'];

/// Normalises `raw` to `+<digits>`.
///
/// Spaces, dashes, dots and parentheses are dropped. A leading `+` must be followed by 8 to
/// 15 digits. Without it, ten digits are read as a North American number and eleven digits
/// starting with `1` as one with its country code.
///
/// # Errors
/// [`NotificationError::Validation`] for anything else.
pub fn normalize(raw: &str) -> Result<String, NotificationError> {
    let compact: String = raw.trim().chars().filter(|c| !SEPARATORS.contains(c)).collect();
    let invalid = || NotificationError::validation(format!("Invalid phone number '{}'", raw.trim()));

    let (international, digits) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match (international, digits.len()) {
        (true, 8..=15) => Ok(format!("+{digits}")),
        (false, 10) => Ok(format!("+1{digits}")),
        (false, 11) if digits.starts_with('1') => Ok(format!("+{digits}")),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_shapes() {
        assert_eq!(normalize("+44 20 7946 0958").unwrap(), "+442079460958");
        assert_eq!(normalize("(415) 555-0100").unwrap(), "+14155550100");
        assert_eq!(normalize("1.415.555.0100").unwrap(), "+14155550100");
        assert_eq!(normalize(" +33612345678 ").unwrap(), "+33612345678");
    }

    #[test]
    fn rejected_shapes() {
        for raw in ["", "+", "+1234567", "+1234567890123456", "555-0100", "21555501000", "415-555-01OO", "++14155550100"] {
            assert!(normalize(raw).is_err(), "{raw}");
        }
    }
}
