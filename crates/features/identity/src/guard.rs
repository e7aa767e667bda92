use crate::claims::Claims;
use crate::Identity;
use atelier_kernel::domain::roles::RoleSet;
use atelier_kernel::server::{ApiError, ApiState};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::marker::PhantomData;
use tracing::debug;

/// Roles admitted by an [`Authorized`] extractor.
pub trait AccessPolicy: Send + Sync + 'static {
    const ROLES: RoleSet;
    const DESCRIPTION: &'static str;
}

/// Admin only.
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl AccessPolicy for AdminOnly {
    const ROLES: RoleSet = RoleSet::ADMIN;
    const DESCRIPTION: &'static str = "Admin role required";
}

/// Staff or admin.
#[derive(Debug, Clone, Copy)]
pub struct Backoffice;

impl AccessPolicy for Backoffice {
    const ROLES: RoleSet = RoleSet::BACKOFFICE;
    const DESCRIPTION: &'static str = "Staff or admin role required";
}

/// Verified caller whose role satisfies `P`.
///
/// Rejects with 401 when the bearer token is missing or invalid and with 403 when the
/// role is not admitted.
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    pub claims: Claims,
    _policy: PhantomData<fn() -> P>,
}

impl<P> Authorized<P> {
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

impl<P: AccessPolicy> FromRequestParts<ApiState> for Authorized<P> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ApiState) -> Result<Self, ApiError> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let identity = state.try_get_slice::<Identity>()?;
        let claims = identity.keys.verify(token).map_err(|error| {
            debug!(%error, "Rejected access token");
            ApiError::unauthorized("Invalid or expired access token")
        })?;

        if !P::ROLES.allows(claims.role) {
            debug!(sub = %claims.sub, role = %claims.role, "Role not admitted");
            return Err(ApiError::forbidden(P::DESCRIPTION));
        }

        Ok(Self { claims, _policy: PhantomData })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("bearer  abc "))), Some("abc"));
    }

    #[test]
    fn other_schemes_and_blank_tokens_are_ignored() {
        assert_eq!(bearer_token(&parts(None)), None);
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer"))), None);
    }
}
