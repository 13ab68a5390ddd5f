//! Account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// Persisted as one element of the `users` collection and, while signed
/// in, as the `currentUser` record. Field names are camelCase on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID (decimal milliseconds since the epoch at creation).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address; unique across accounts, compared case-sensitively.
    pub email: String,
    /// When the account was created.
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account.
    pub fn new(id: String, name: String, email: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    /// Creation time as an ISO-8601 string, e.g. `2024-01-15T12:00:00.000Z`.
    pub fn created_at_iso(&self) -> String {
        iso8601::format(&self.created_at)
    }
}

/// Pick an ID for an account created at `now` that no existing account uses.
///
/// Starts from the creation millisecond and steps forward on collision.
pub fn allocate_id(existing: &[Account], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|a| a.id == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Millisecond-precision RFC 3339 with a `Z` suffix.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
