use std::borrow::Cow;

/// A specialized [`IdentityError`] enum of this crate.
#[atelier_derive::atelier_error(http)]
pub enum IdentityError {
    /// Signing configuration is unusable.
    #[error("Identity config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No usable bearer token on the request.
    #[status(401)]
    #[error("{message}")]
    Unauthenticated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token failed signature, expiry, issuer or audience checks.
    #[status(401)]
    #[error("Invalid access token")]
    Token { source: jsonwebtoken::errors::Error, context: Option<Cow<'static, str>> },

    /// Authenticated, but the role is not allowed here.
    #[status(403)]
    #[error("{message}")]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
