use crate::claims::Claims;
use crate::error::IdentityError;
use atelier_domain::config::JwtConfig;
use atelier_domain::roles::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;
use tracing::warn;

const DEV_SECRET: &str = "dev-only-change-me";
const MIN_SECRET_BYTES: usize = 16;

/// HS256 signing and verification bound to one issuer (and optionally one audience).
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: Option<String>,
    ttl_seconds: i64,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    /// # Errors
    /// Returns [`IdentityError::Config`] for empty or short secrets and blank issuers.
    pub fn from_config(config: &JwtConfig) -> Result<Self, IdentityError> {
        if config.secret.len() < MIN_SECRET_BYTES {
            return Err(IdentityError::Config {
                message: format!("JWT secret must be at least {MIN_SECRET_BYTES} bytes").into(),
                context: Some("security.identity.jwt.secret".into()),
            });
        }
        if config.issuer.trim().is_empty() {
            return Err(IdentityError::Config {
                message: "JWT issuer must not be empty".into(),
                context: Some("security.identity.jwt.issuer".into()),
            });
        }
        if config.secret == DEV_SECRET {
            warn!("Using the development JWT secret; set ATELIER__SECURITY__IDENTITY__JWT__SECRET");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.clock_skew_seconds;
        validation.set_issuer(&[config.issuer.as_str()]);
        match &config.audience {
            Some(audience) => {
                validation.set_audience(&[audience.as_str()]);
                validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
            },
            None => {
                validation.set_required_spec_claims(&["exp", "iss", "sub"]);
                validation.validate_aud = false;
            },
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_seconds: i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX),
        })
    }

    /// Signs a token for `subject` valid for the configured lifetime.
    ///
    /// # Errors
    /// Fails only if the claims cannot be encoded.
    pub fn issue(&self, subject: impl Into<String>, role: Role) -> Result<String, IdentityError> {
        let now = chrono::Utc::now().timestamp();
        self.sign(&Claims {
            sub: subject.into(),
            role,
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        })
    }

    /// Signs arbitrary claims.
    ///
    /// # Errors
    /// Fails only if the claims cannot be encoded.
    pub fn sign(&self, claims: &Claims) -> Result<String, IdentityError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// # Errors
    /// Returns [`IdentityError::Token`] for bad signatures, expired tokens and foreign
    /// issuers or audiences.
    pub fn verify(&self, token: &str) -> Result<Claims, IdentityError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig { secret: "unit-test-secret-0123456789".to_owned(), ..JwtConfig::default() }
    }

    #[test]
    fn issued_tokens_verify() {
        let keys = JwtKeys::from_config(&config()).unwrap();
        let token = keys.issue("ops@atelier", Role::Staff).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, "ops@atelier");
        assert_eq!(claims.role, Role::Staff);
        assert_eq!(claims.iss, "atelier");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_tokens_are_rejected_beyond_leeway() {
        let keys = JwtKeys::from_config(&config()).unwrap();
        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            sub: "ops".to_owned(),
            role: Role::Admin,
            iat: now - 7200,
            exp: now - 600,
            iss: "atelier".to_owned(),
            aud: None,
        };
        let token = keys.sign(&stale).unwrap();
        assert!(matches!(keys.verify(&token), Err(IdentityError::Token { .. })));

        let recent = Claims { exp: now - 10, ..stale };
        assert!(keys.verify(&keys.sign(&recent).unwrap()).is_ok(), "within clock skew");
    }

    #[test]
    fn foreign_issuer_secret_and_audience_are_rejected() {
        let keys = JwtKeys::from_config(&config()).unwrap();

        let other_issuer =
            JwtKeys::from_config(&JwtConfig { issuer: "elsewhere".to_owned(), ..config() }).unwrap();
        assert!(keys.verify(&other_issuer.issue("x", Role::Admin).unwrap()).is_err());

        let other_secret = JwtKeys::from_config(&JwtConfig {
            secret: "another-secret-0123456789".to_owned(),
            ..config()
        })
        .unwrap();
        assert!(keys.verify(&other_secret.issue("x", Role::Admin).unwrap()).is_err());

        let scoped =
            JwtKeys::from_config(&JwtConfig { audience: Some("admin-ui".to_owned()), ..config() })
                .unwrap();
        assert!(scoped.verify(&keys.issue("x", Role::Admin).unwrap()).is_err());
        assert!(scoped.verify(&scoped.issue("x", Role::Admin).unwrap()).is_ok());
    }

    #[test]
    fn scoped_keys_require_an_audience_claim() {
        let unscoped = JwtKeys::from_config(&config()).unwrap();
        let scoped =
            JwtKeys::from_config(&JwtConfig { audience: Some("admin-ui".to_owned()), ..config() })
                .unwrap();

        let token = unscoped.issue("intruder", Role::Admin).unwrap();
        assert!(matches!(scoped.verify(&token), Err(IdentityError::Token { .. })));

        let now = chrono::Utc::now().timestamp();
        let wrong_audience = Claims {
            sub: "ops".to_owned(),
            role: Role::Admin,
            iat: now,
            exp: now + 60,
            iss: "atelier".to_owned(),
            aud: Some("storefront".to_owned()),
        };
        assert!(scoped.verify(&scoped.sign(&wrong_audience).unwrap()).is_err());

        let claims = scoped.verify(&scoped.issue("ops", Role::Staff).unwrap()).unwrap();
        assert_eq!(claims.aud.as_deref(), Some("admin-ui"));
        assert!(unscoped.verify(&scoped.issue("ops", Role::Staff).unwrap()).is_ok());
    }

    #[test]
    fn weak_configuration_is_refused() {
        let short = JwtConfig { secret: "short".to_owned(), ..JwtConfig::default() };
        assert!(matches!(JwtKeys::from_config(&short), Err(IdentityError::Config { .. })));

        let blank = JwtConfig { issuer: " ".to_owned(), ..config() };
        assert!(matches!(JwtKeys::from_config(&blank), Err(IdentityError::Config { .. })));
    }
}
