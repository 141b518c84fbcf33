//! HS256 token creation and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use gatekeeper_core::config::AuthConfig;
use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::UserId;
use gatekeeper_entity::TokenLifetime;

use super::claims::{Claims, Expiration};

/// Signs and verifies tokens with a shared secret.
///
/// Decoding checks the signature and the payload shape only. Expiration is
/// carried as a custom claim that may be the non-expiring sentinel, so
/// callers check it with [`Claims::check_expiry`].
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec for the given secret.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Creates a codec from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Issues a token valid for `lifetime` from now.
    pub fn encode(
        &self,
        user_id: UserId,
        user_name: &str,
        lifetime: TokenLifetime,
    ) -> Result<String, AppError> {
        self.encode_at(user_id, user_name, lifetime, Utc::now())
    }

    /// Issues a token valid for `lifetime` from `now`.
    pub fn encode_at(
        &self,
        user_id: UserId,
        user_name: &str,
        lifetime: TokenLifetime,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        self.sign(&Claims {
            user_id,
            user_name: user_name.to_string(),
            expiration: Expiration::for_lifetime(lifetime, now)?,
            lifetime: None,
        })
    }

    /// Issues a refresh token valid for `lifetime` from `now` that records
    /// the access-token lifetime to re-issue with.
    pub fn encode_refresh_at(
        &self,
        user_id: UserId,
        user_name: &str,
        lifetime: TokenLifetime,
        access_lifetime: TokenLifetime,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        self.sign(&Claims {
            user_id,
            user_name: user_name.to_string(),
            expiration: Expiration::for_lifetime(lifetime, now)?,
            lifetime: Some(access_lifetime),
        })
    }

    /// Signs an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Verifies the signature and parses the claims. Does not check expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token.trim(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => {
                    AppError::coded(ErrorCode::InvalidSignature, "Invalid token signature")
                }
                _ => AppError::coded(ErrorCode::MalformedToken, "Malformed token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &str = "test-secret-with-enough-bytes-for-hs256";

    #[test]
    fn test_round_trip_with_day_lifetime() {
        let codec = TokenCodec::new(SECRET);
        let before = Utc::now();
        let token = codec
            .encode(UserId(5), "alice", TokenLifetime::Days(1))
            .unwrap();
        let after = Utc::now();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.user_id, UserId(5));
        assert_eq!(claims.user_name, "alice");
        assert_eq!(claims.lifetime, None);
        match claims.expiration {
            Expiration::At(at) => {
                assert!(at >= before + Duration::days(1));
                assert!(at <= after + Duration::days(1));
            }
            Expiration::Never => panic!("expected a finite expiration"),
        }
    }

    #[test]
    fn test_round_trip_infinite() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .encode(UserId(5), "alice", TokenLifetime::Infinite)
            .unwrap();
        let claims = codec.decode(&token).unwrap();
        assert!(claims.expiration.is_never());
    }

    #[test]
    fn test_expired_at_boundary() {
        let codec = TokenCodec::new(SECRET);
        let issued = Utc::now();
        let token = codec
            .encode_at(UserId(1), "alice", TokenLifetime::Days(1), issued)
            .unwrap();
        let claims = codec.decode(&token).unwrap();

        let exp = issued + Duration::days(1);
        assert!(claims.check_expiry(exp - Duration::seconds(1)).is_ok());
        assert!(
            claims
                .check_expiry(exp)
                .unwrap_err()
                .is(ErrorCode::ExpiredToken)
        );
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let codec = TokenCodec::new(SECRET);
        let err = codec
            .encode(UserId(1), "alice", TokenLifetime::Days(u32::MAX))
            .unwrap_err();
        assert_eq!(err.kind, gatekeeper_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = TokenCodec::new(SECRET)
            .encode(UserId(1), "alice", TokenLifetime::Days(1))
            .unwrap();
        let err = TokenCodec::new("another-secret").decode(&token).unwrap_err();
        assert!(err.is(ErrorCode::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .encode(UserId(1), "alice", TokenLifetime::Days(1))
            .unwrap();
        let forged = TokenCodec::new(SECRET)
            .encode(UserId(2), "mallory", TokenLifetime::Infinite)
            .unwrap();

        // Graft the forged payload onto the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        let err = codec.decode(&spliced).unwrap_err();
        assert!(err.is(ErrorCode::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET);
        for input in ["", "not-a-token", "a.b.c"] {
            let err = codec.decode(input).unwrap_err();
            assert!(err.is(ErrorCode::MalformedToken), "input {input:?}");
        }
    }

    #[test]
    fn test_refresh_token_carries_access_lifetime() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .encode_refresh_at(
                UserId(1),
                "alice",
                TokenLifetime::Days(90),
                TokenLifetime::Infinite,
                Utc::now(),
            )
            .unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.lifetime, Some(TokenLifetime::Infinite));
        assert!(!claims.expiration.is_never());
    }
}
