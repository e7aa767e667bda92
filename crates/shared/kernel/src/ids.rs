//! Human-facing identifiers.

use chrono::{DateTime, Utc};

/// Uppercase alphabet without `0`, `1`, `I` and `O`, safe to read out over the phone.
pub const REFERENCE_ALPHABET: &[char; 32] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub const QUOTE_REFERENCE_PREFIX: &str = "QR";
const SUFFIX_LEN: usize = 6;

/// Builds a quote reference such as `QR-261018-7KQ2ZD` for the given day.
#[must_use]
pub fn quote_reference(at: DateTime<Utc>) -> String {
    format!(
        "{QUOTE_REFERENCE_PREFIX}-{}-{}",
        at.format("%y%m%d"),
        nanoid::nanoid!(SUFFIX_LEN, REFERENCE_ALPHABET)
    )
}

/// Checks the `QR-YYMMDD-XXXXXX` shape without consulting the store.
#[must_use]
pub fn is_quote_reference(value: &str) -> bool {
    let mut parts = value.split('-');
    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == QUOTE_REFERENCE_PREFIX
        && date.len() == 6
        && date.bytes().all(|b| b.is_ascii_digit())
        && suffix.chars().count() == SUFFIX_LEN
        && suffix.chars().all(|c| REFERENCE_ALPHABET.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reference_embeds_the_day() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let reference = quote_reference(at);

        assert!(reference.starts_with("QR-261018-"), "{reference}");
        assert!(is_quote_reference(&reference), "{reference}");
    }

    #[test]
    fn malformed_references_are_rejected() {
        for bad in ["", "QR-261018", "QR-2610-ABCDEF", "QX-261018-ABCDEF", "QR-261018-ABCDE0", "QR-261018-abcdef", "QR-261018-ABCDEF-1"] {
            assert!(!is_quote_reference(bad), "{bad}");
        }
    }
}
