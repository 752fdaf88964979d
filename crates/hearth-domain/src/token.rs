//! Signed identity credentials.
//!
//! A credential asserts a user's id and email for a bounded validity window.
//! Tokens are stateless: there is no server-side revocation list, so
//! validity is solely a function of the HS256 signature and the embedded
//! expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::model::UserId;

/// Fixed credential validity window.
pub const TOKEN_VALIDITY_DAYS: i64 = 14;

/// The identity recovered from a verified credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: UserId,
    email: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed identity credentials.
///
/// Both operations are deterministic functions of their arguments and the
/// configured secret; the service holds no mutable state and is safe to
/// share across concurrent requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Creates a token service over a shared symmetric secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issues a credential for the given identity, valid for two weeks.
    pub fn issue(&self, id: UserId, email: &str) -> DomainResult<String> {
        self.issue_at(id, email, Utc::now())
    }

    fn issue_at(&self, id: UserId, email: &str, issued_at: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims {
            id,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|err| {
            DomainError::CredentialSigning {
                message: err.to_string(),
            }
        })
    }

    /// Recovers the identity from a credential string.
    ///
    /// A bad signature, an expired token and malformed input all collapse
    /// into [`DomainError::InvalidCredential`]; callers are not told which.
    pub fn verify(&self, credential: &str) -> DomainResult<TokenIdentity> {
        let data = decode::<Claims>(
            credential,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| DomainError::InvalidCredential)?;

        Ok(TokenIdentity {
            id: data.claims.id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret")
    }

    #[test]
    fn test_round_trip_recovers_identity() {
        let tokens = service();
        let credential = tokens.issue(42, "ann@example.com").unwrap();

        let identity = tokens.verify(&credential).unwrap();
        assert_eq!(identity.id, 42);
        assert_eq!(identity.email, "ann@example.com");
    }

    #[test]
    fn test_expired_credential_rejected() {
        let tokens = service();
        // Issued two validity windows ago, so well past expiry even with
        // the verifier's clock-skew leeway.
        let issued_at = Utc::now() - Duration::days(2 * TOKEN_VALIDITY_DAYS);
        let credential = tokens.issue_at(7, "old@example.com", issued_at).unwrap();

        let err = tokens.verify(&credential).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredential));
    }

    #[test]
    fn test_tampered_credential_rejected() {
        let tokens = service();
        let mut credential = tokens.issue(42, "ann@example.com").unwrap();
        credential.push('x');

        let err = tokens.verify(&credential).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredential));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let credential = service().issue(42, "ann@example.com").unwrap();

        let other = TokenService::new(b"another-secret");
        assert!(other.verify(&credential).is_err());
    }

    #[test]
    fn test_garbage_input_rejected() {
        let err = service().verify("not-a-token").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredential));
    }
}
