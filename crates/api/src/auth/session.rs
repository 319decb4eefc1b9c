//! Platform session token verification.
//!
//! The platform signs every callback and every item-view request with
//! HS256 using the app's signing secret. Integration callbacks carry
//! `accountId`, `userId`, `backToUrl`, and the `shortLivedToken` used for
//! GraphQL calls on the caller's behalf. Item-view session tokens instead
//! nest account and user under `dat`.

use colcalc_core::error::CoreError;
use colcalc_core::types::flexible_id;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims nested under `dat` in item-view session tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewClaims {
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Decoded session token payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_to_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_lived_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dat: Option<ViewClaims>,
    /// Expiration time (UTC Unix timestamp), validated when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_id: Option<String>,
    pub user_id: Option<String>,
    pub back_to_url: Option<String>,
    /// Credential forwarded on every platform API call. May be empty for
    /// item-view tokens, which cannot call the platform.
    pub short_lived_token: String,
}

impl Session {
    /// The short-lived platform token, required by every call that reaches
    /// the platform API.
    pub fn platform_token(&self) -> Result<&str, CoreError> {
        if self.short_lived_token.is_empty() {
            return Err(CoreError::Unauthorized(
                "Session carries no short-lived token".into(),
            ));
        }
        Ok(&self.short_lived_token)
    }
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        let view = claims.dat.unwrap_or_default();
        Session {
            account_id: claims.account_id.or(view.account_id),
            user_id: claims.user_id.or(view.user_id),
            back_to_url: claims.back_to_url,
            short_lived_token: claims.short_lived_token.unwrap_or_default(),
        }
    }
}

/// Session verification settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret shared with the platform.
    pub signing_secret: String,
}

impl SessionConfig {
    /// Load from `MONDAY_SIGNING_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `MONDAY_SIGNING_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let signing_secret = std::env::var("MONDAY_SIGNING_SECRET")
            .expect("MONDAY_SIGNING_SECRET must be set in the environment");
        assert!(
            !signing_secret.is_empty(),
            "MONDAY_SIGNING_SECRET must not be empty"
        );
        Self { signing_secret }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Platform tokens do not always carry `exp`, and `aud` is the app URL.
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    validation
}

/// Verify the signature of a session token and decode its claims.
pub fn verify_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Session, jsonwebtoken::errors::Error> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.signing_secret.as_bytes()),
        &validation(),
    )?;
    Ok(data.claims.into())
}

/// Sign claims the way the platform does. Used by local tooling and tests.
pub fn sign_session_token(
    claims: &SessionClaims,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.signing_secret.as_bytes()),
    )
}
