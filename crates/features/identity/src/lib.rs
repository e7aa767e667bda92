//! Identity feature slice: HS256 bearer tokens and role guards for Axum handlers.
//!
//! Handlers opt into authentication by taking an [`Authorized`] extractor:
//!
//! ```rust,ignore
//! async fn delete_product(auth: Authorized<AdminOnly>, Path(id): Path<String>) { .. }
//! ```

mod claims;
mod error;
#[cfg(feature = "server")]
mod guard;
mod keys;

pub use crate::claims::Claims;
pub use crate::error::{IdentityError, IdentityErrorExt};
#[cfg(feature = "server")]
pub use crate::guard::{AccessPolicy, AdminOnly, Authorized, Backoffice};
pub use crate::keys::JwtKeys;

use atelier_kernel::domain::config::ApiConfig;
use atelier_kernel::domain::registry::InitializedSlice;
use atelier_kernel::domain::roles::Role;
use tracing::info;

/// Name of the `OpenAPI` security scheme admin routes refer to.
pub const BEARER_SCHEME: &str = "bearer";

/// Identity feature state
#[atelier_derive::atelier_slice]
pub struct Identity {
    pub keys: JwtKeys,
}

impl Identity {
    /// Issues an access token with the configured lifetime.
    ///
    /// # Errors
    /// Fails only if the claims cannot be encoded.
    pub fn issue(&self, subject: impl Into<String>, role: Role) -> Result<String, IdentityError> {
        self.keys.issue(subject, role)
    }
}

/// Builds the signing keys from `security.identity.jwt`.
///
/// # Errors
/// Returns [`IdentityError::Config`] for unusable secrets or issuers.
pub fn build(config: &ApiConfig) -> Result<Identity, IdentityError> {
    let keys = JwtKeys::from_config(&config.security.identity.jwt)?;
    Ok(Identity::new(IdentityInner { keys }))
}

/// Initialize the identity feature.
///
/// # Errors
/// Returns [`IdentityError::Config`] for unusable secrets or issuers.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, IdentityError> {
    let slice = build(config)?;
    info!(issuer = %config.security.identity.jwt.issuer, "Identity slice initialized");
    Ok(InitializedSlice::new(slice))
}
