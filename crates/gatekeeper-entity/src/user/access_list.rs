//! Per-user set of reachable service identifiers.
//!
//! Stored as a comma-joined `TEXT` column (`usr_access`), handled in memory
//! as an ordered set of typed [`ServiceId`]s. Membership therefore always
//! compares integers, whatever spacing or ordering the stored string had.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use gatekeeper_core::error::{AppError, ErrorCode};
use gatekeeper_core::types::ServiceId;

/// Separator used by the storage representation.
const SEPARATOR: char = ',';

/// The set of services a user may reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    ids: BTreeSet<ServiceId>,
}

impl AccessList {
    /// Creates an empty access list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the service is granted.
    pub fn contains(&self, service_id: ServiceId) -> bool {
        self.ids.contains(&service_id)
    }

    /// Grants a service. Returns `true` if it was not already present.
    pub fn add(&mut self, service_id: ServiceId) -> bool {
        self.ids.insert(service_id)
    }

    /// Revokes a service. Returns `true` if it was present.
    pub fn remove(&mut self, service_id: ServiceId) -> bool {
        self.ids.remove(&service_id)
    }

    /// Number of granted services.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no service is granted.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates granted ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.ids.iter().copied()
    }

    /// Granted ids as raw integers, for `= ANY($1)` style queries.
    pub fn to_i64_vec(&self) -> Vec<i64> {
        self.ids.iter().map(|id| id.get()).collect()
    }
}

impl FromIterator<ServiceId> for AccessList {
    fn from_iter<I: IntoIterator<Item = ServiceId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Serializes to the storage form: ascending ids joined by `,`; empty list
/// is the empty string.
impl fmt::Display for AccessList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.ids {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

/// Parses the storage form. Blank segments are skipped, so `""` and `","`
/// both yield an empty list.
impl FromStr for AccessList {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment.parse::<ServiceId>().map_err(|_| {
                    AppError::coded(
                        ErrorCode::InvalidServiceId,
                        format!("Invalid service id '{segment}' in access list"),
                    )
                })
            })
            .collect()
    }
}

impl Serialize for AccessList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AccessListRepr {
    Text(String),
    Ids(Vec<ServiceId>),
}

/// Accepts either the comma-joined string or a JSON array of ids.
impl<'de> Deserialize<'de> for AccessList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AccessListRepr::deserialize(deserializer)? {
            AccessListRepr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            AccessListRepr::Ids(ids) => Ok(ids.into_iter().collect()),
        }
    }
}

impl sqlx::Type<sqlx::Postgres> for AccessList {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for AccessList {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.to_string(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AccessList {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(raw.parse::<AccessList>()?)
    }
}
