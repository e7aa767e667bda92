use std::borrow::Cow;

/// Longest record key accepted from clients.
pub const MAX_KEY_LEN: usize = 64;

#[atelier_derive::atelier_error]
pub enum ResourceGuardError {
    #[status(400)]
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Guards record keys that arrive from clients.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Normalises a client-supplied id into a bare record key of `expected_table`.
    ///
    /// Accepts both `key` and `table:key`; a prefix naming another table is rejected so an
    /// id copied from one collection cannot address another.
    ///
    /// # Errors
    /// Table mismatch, empty or oversized keys, and characters outside `[A-Za-z0-9_-]`.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref().trim();
        let table_ref = expected_table.as_ref();

        let key = match id_ref.split_once(':') {
            Some((table, key)) if table == table_ref => key,
            Some((table, _)) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            None => id_ref,
        };

        let well_formed = !key.is_empty()
            && key.len() <= MAX_KEY_LEN
            && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !well_formed {
            return Err(ResourceGuardError::Validation {
                message: format!("Malformed id '{key}'").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_prefix() {
        assert_eq!(ResourceGuard::verify("product:Ab3xYz", "product").unwrap(), "Ab3xYz");
        assert_eq!(ResourceGuard::verify("Ab3xYz", "product").unwrap(), "Ab3xYz");
    }

    #[test]
    fn rejects_foreign_tables_and_garbage() {
        assert!(ResourceGuard::verify("migration:contact", "product").is_err());
        assert!(ResourceGuard::verify("", "product").is_err());
        assert!(ResourceGuard::verify("a b", "product").is_err());
        assert!(ResourceGuard::verify("x".repeat(65), "product").is_err());
    }
}
