//! Input checks shared by every slice. Each helper returns the normalised value.

use std::borrow::Cow;

pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_EMAIL_CHARS: usize = 254;
pub const MAX_SLUG_CHARS: usize = 64;
pub const MAX_URL_CHARS: usize = 2048;

#[atelier_derive::atelier_error]
pub enum ValidationError {
    #[status(400)]
    #[error("{field} {message}")]
    Invalid {
        field: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

impl ValidationError {
    pub fn invalid(field: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid { field: field.into(), message: message.into(), context: None }
    }
}

/// Trims `value` and requires between 1 and `max` characters.
///
/// # Errors
/// Empty or oversized input.
pub fn required(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid(field, "must not be empty"));
    }
    check_len(field, trimmed, max)?;
    Ok(trimmed.to_owned())
}

/// Trims `value`; blank input becomes `None`.
///
/// # Errors
/// Oversized input.
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_len(field, trimmed, max)?;
            Ok(Some(trimmed.to_owned()))
        },
    }
}

/// Accepts `local@domain.tld` shaped addresses without whitespace.
///
/// # Errors
/// Anything that does not look like a deliverable address.
pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = required(field, value, MAX_EMAIL_CHARS)?;
    let valid = trimmed.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }) && !trimmed.chars().any(char::is_whitespace);

    if valid { Ok(trimmed) } else { Err(ValidationError::invalid(field, "must be a valid email address")) }
}

/// Lowercase letters, digits and single dashes, e.g. `footer-links`.
///
/// # Errors
/// Empty, oversized or out-of-alphabet keys.
pub fn slug(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let valid = !value.is_empty()
        && value.len() <= MAX_SLUG_CHARS
        && value.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--");

    if valid {
        Ok(value.to_owned())
    } else {
        Err(ValidationError::invalid(
            field,
            "must contain only lowercase letters, digits and single dashes",
        ))
    }
}

/// Absolute `http(s)` URLs or site-relative paths starting with `/`.
///
/// # Errors
/// Empty, oversized or unsupported links.
pub fn link(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = required(field, value, MAX_URL_CHARS)?;
    let supported = trimmed.starts_with('/')
        || trimmed.starts_with("https://")
        || trimmed.starts_with("http://");
    if !supported || trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid(field, "must be an http(s) URL or a path starting with /"));
    }
    Ok(trimmed)
}

/// Same as [`link`] for optional fields; blank input becomes `None`.
///
/// # Errors
/// See [`link`].
pub fn optional_link(field: &'static str, value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => link(field, trimmed).map(Some),
    }
}

/// # Errors
/// Lists longer than `max`.
pub fn max_items(field: &'static str, len: usize, max: usize) -> Result<(), ValidationError> {
    if len > max {
        return Err(ValidationError::invalid(field, format!("must contain at most {max} items")));
    }
    Ok(())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::invalid(field, format!("must be at most {max} characters")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_bounds() {
        assert_eq!(required("name", "  Ada  ", 10).unwrap(), "Ada");
        assert_eq!(required("name", "   ", 10).unwrap_err().to_string(), "name must not be empty");
        assert_eq!(
            required("name", "abcdefghijk", 10).unwrap_err().to_string(),
            "name must be at most 10 characters"
        );
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional("phone", Some("  "), 10).unwrap(), None);
        assert_eq!(optional("phone", None, 10).unwrap(), None);
        assert_eq!(optional("phone", Some(" 555 "), 10).unwrap().as_deref(), Some("555"));
    }

    #[test]
    fn email_shapes() {
        assert_eq!(email("email", " ada@example.com ").unwrap(), "ada@example.com");
        for bad in ["ada", "ada@", "@example.com", "ada@example", "ada@@example.com", "a da@example.com", "ada@example."] {
            assert!(email("email", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn slugs() {
        assert!(slug("key", "about-us").is_ok());
        assert!(slug("key", "faq2").is_ok());
        for bad in ["", "About", "-lead", "trail-", "dou--ble", "sp ace", "under_score"] {
            assert!(slug("key", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn links() {
        assert!(link("url", "/sale").is_ok());
        assert!(link("url", "https://atelier.example/bags").is_ok());
        assert!(link("url", "javascript:alert(1)").is_err());
        assert_eq!(optional_link("url", Some("")).unwrap(), None);
    }

    #[test]
    fn item_limits() {
        assert!(max_items("productIds", 12, 12).is_ok());
        assert!(max_items("productIds", 13, 12).is_err());
        assert_eq!(ValidationError::invalid("x", "bad").status_code(), 400);
    }
}
