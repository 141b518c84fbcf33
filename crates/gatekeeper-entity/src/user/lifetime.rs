//! Access-token lifetime policy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use gatekeeper_core::error::AppError;

/// Wire and storage spelling of the non-expiring sentinel.
pub const INFINITE: &str = "inf";

/// Longest finite lifetime accepted, in days.
pub const MAX_LIFETIME_DAYS: u32 = 36_500;

/// How long an issued token stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenLifetime {
    /// Expires the given number of whole days after issuance.
    Days(u32),
    /// Never expires.
    Infinite,
}

impl TokenLifetime {
    /// A finite lifetime of `days`, between one day and [`MAX_LIFETIME_DAYS`].
    pub fn days(days: u32) -> Result<Self, AppError> {
        if days == 0 {
            return Err(AppError::validation("Token lifetime must be at least one day"));
        }
        if days > MAX_LIFETIME_DAYS {
            return Err(AppError::validation(format!(
                "Token lifetime must be at most {MAX_LIFETIME_DAYS} days"
            )));
        }
        Ok(Self::Days(days))
    }

    /// The absolute expiry for a token issued at `issued_at`, or `None` for
    /// a non-expiring token. Fails if the instant is not representable.
    pub fn expires_at(
        &self,
        issued_at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        match self {
            Self::Days(days) => Duration::try_days(i64::from(*days))
                .and_then(|span| issued_at.checked_add_signed(span))
                .map(Some)
                .ok_or_else(|| {
                    AppError::validation(format!("Token lifetime of {days} days is out of range"))
                }),
            Self::Infinite => Ok(None),
        }
    }

    /// Whether this is the non-expiring sentinel.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::Infinite => f.write_str(INFINITE),
        }
    }
}

impl FromStr for TokenLifetime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(INFINITE) || s.eq_ignore_ascii_case("infinite") {
            return Ok(Self::Infinite);
        }
        match s.parse::<u32>() {
            Ok(days) => Self::days(days),
            Err(_) => Err(AppError::validation(format!(
                "Invalid token lifetime '{s}': expected a day count or '{INFINITE}'"
            ))),
        }
    }
}

impl Serialize for TokenLifetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LifetimeRepr {
    Days(u32),
    Text(String),
}

/// Accepts `"inf"`, `"infinite"`, `"30"` or `30`.
impl<'de> Deserialize<'de> for TokenLifetime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LifetimeRepr::deserialize(deserializer)? {
            LifetimeRepr::Days(days) => Self::days(days).map_err(serde::de::Error::custom),
            LifetimeRepr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for TokenLifetime {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for TokenLifetime {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.to_string(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TokenLifetime {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(raw.parse::<TokenLifetime>()?)
    }
}
