//! Bearer-token signing and verification.
//!
//! Tokens are `base64url(claims JSON) . base64url(HMAC-SHA256 tag)`, signed
//! with the server secret from configuration. Claims carry the subject id,
//! role, issued-at, and expiry; there is no refresh flow and no revocation
//! list, so a token is valid until its expiry.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use bookshelf_core::{Role, UserId};

type HmacSha256 = Hmac<Sha256>;

const SECONDS_PER_HOUR: i64 = 3600;

/// Errors that can occur when signing or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Token does not have the `payload.tag` shape or is not valid base64/JSON.
    #[error("malformed token")]
    Malformed,

    /// Signature does not match the payload.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token expiry is in the past.
    #[error("token expired")]
    Expired,

    /// The signing key could not be used.
    #[error("token signing failed")]
    Signing,
}

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's ID.
    pub sub: UserId,
    /// The user's role at issue time.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared server secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
    ttl_seconds: i64,
}

impl TokenSigner {
    /// Create a signer from the configured secret and lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: u32) -> Self {
        Self {
            key: secret.expose_secret().as_bytes().to_vec(),
            ttl_seconds: i64::from(ttl_hours) * SECONDS_PER_HOUR,
        }
    }

    /// Issue a token for a user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if the HMAC key is unusable.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        self.issue_claims(&claims)
    }

    fn issue_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let json = serde_json::to_vec(claims).map_err(|_| TokenError::Signing)?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::Signing)?;
        mac.update(payload.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{tag}"))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` for anything that is not
    /// `payload.tag` with valid base64/JSON inside,
    /// `TokenError::InvalidSignature` when the tag doesn't match, and
    /// `TokenError::Expired` when the expiry has passed.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload, tag) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let tag_bytes = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::Signing)?;
        mac.update(payload.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&tag_bytes)
            .map_err(|_| TokenError::InvalidSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(&SecretString::from("k9#mP2$vL8@qR5!xW3&zT7*nB4^cF6%j"), 24)
    }

    #[test]
    fn test_round_trip() {
        let signer = signer();
        let token = signer.issue(UserId::new(42), Role::User).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, UserId::new(42));
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_admin_role_survives() {
        let signer = signer();
        let token = signer.issue(UserId::new(1), Role::Admin).unwrap();
        assert_eq!(signer.verify(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            signer().verify("nodotinsight"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_garbage_base64() {
        assert_eq!(
            signer().verify("!!not-base64!!.!!also-not!!"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue(UserId::new(42), Role::User).unwrap();
        let (payload, tag) = token.split_once('.').unwrap();

        // Forge claims for a different subject and reuse the old tag
        let forged_json = serde_json::to_vec(&Claims {
            sub: UserId::new(1),
            role: Role::Admin,
            iat: 0,
            exp: i64::MAX,
        })
        .unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(forged_json);
        assert_ne!(forged_payload, payload);

        let forged = format!("{forged_payload}.{tag}");
        assert_eq!(signer.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue(UserId::new(42), Role::User).unwrap();

        let other = TokenSigner::new(
            &SecretString::from("z1!qA9@wS8#eD7$rF6%tG5^yH4&uJ3*i"),
            24,
        );
        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_rejected() {
        let signer = signer();
        let now = Utc::now().timestamp();
        let token = signer
            .issue_claims(&Claims {
                sub: UserId::new(42),
                role: Role::User,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert_eq!(signer.verify(&token), Err(TokenError::Expired));
    }
}
