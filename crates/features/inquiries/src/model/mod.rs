mod product_request;
mod quote_request;

pub use product_request::*;
pub use quote_request::*;

pub const MAX_PHONE_CHARS: usize = 32;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_NOTES_CHARS: usize = 5000;
/// Upper bound for budgets and quoted prices.
pub const MAX_AMOUNT_CENTS: u64 = 10_000_000_000;

use atelier_kernel::validation::{self, ValidationError};

/// Admin notes from a patch: absent keeps the stored notes, blank clears them.
pub(crate) fn patch_notes(
    current: Option<String>,
    patch: Option<&str>,
) -> Result<Option<String>, ValidationError> {
    match patch {
        None => Ok(current),
        Some(notes) => validation::optional("adminNotes", Some(notes), MAX_NOTES_CHARS),
    }
}

pub(crate) fn amount(field: &'static str, cents: Option<u64>) -> Result<Option<u64>, ValidationError> {
    match cents {
        Some(value) if value == 0 || value > MAX_AMOUNT_CENTS => {
            Err(ValidationError::invalid(field, "is out of range"))
        },
        other => Ok(other),
    }
}
