//! Claims structure carried by access and refresh tokens.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::UserId;
use gatekeeper_entity::TokenLifetime;
use gatekeeper_entity::user::lifetime::INFINITE;

/// Claims payload embedded in every token.
///
/// Access and refresh tokens share this shape; they differ only by how they
/// are used and by their lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserId,
    /// Login at the time of issuance.
    pub user_name: String,
    /// When the token stops being valid.
    pub expiration: Expiration,
    /// Access-token lifetime to re-issue with. Only set on refresh tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<TokenLifetime>,
}

impl Claims {
    /// Fails with `ExpiredToken` unless the token never expires or `now` is
    /// strictly before its expiration.
    pub fn check_expiry(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.expiration.is_expired_at(now) {
            return Err(AppError::coded(
                ErrorCode::ExpiredToken,
                "Token has expired",
            ));
        }
        Ok(())
    }
}

/// Absolute expiry instant, or the non-expiring sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Expires at this instant.
    At(DateTime<Utc>),
    /// Never expires.
    Never,
}

impl Expiration {
    /// Expiry for a token issued at `issued_at` with the given lifetime.
    pub fn for_lifetime(
        lifetime: TokenLifetime,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        Ok(match lifetime.expires_at(issued_at)? {
            Some(at) => Self::At(at),
            None => Self::Never,
        })
    }

    /// Whether a token with this expiration is dead at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::At(at) => now >= *at,
            Self::Never => false,
        }
    }

    /// Whether this is the non-expiring sentinel.
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(at) => f.write_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Never => f.write_str(INFINITE),
        }
    }
}

impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts the sentinel (`"inf"` or `"infinite"`), an RFC 3339 timestamp,
/// or a zone-less ISO-8601 timestamp read as UTC.
impl<'de> Deserialize<'de> for Expiration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(INFINITE) || raw.eq_ignore_ascii_case("infinite") {
            return Ok(Self::Never);
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::At(at.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self::At(naive.and_utc()))
            .map_err(|_| serde::de::Error::custom(format!("invalid expiration '{raw}'")))
    }
}
