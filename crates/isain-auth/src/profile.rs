//! Profile summary for the signed-in account.

use crate::account::Account;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the profile page shows about an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Creation date, e.g. `January 15, 2024`.
    pub member_since: String,
    /// Whole days since the account was created.
    pub days_as_member: i64,
    /// Destinations rated on this device.
    pub destinations_rated: usize,
}

impl ProfileSummary {
    /// Build the summary for `account` as of `now`.
    pub fn for_account(account: &Account, destinations_rated: usize, now: DateTime<Utc>) -> Self {
        let days_as_member = (now - account.created_at).num_days().max(0);

        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            member_since: account.created_at.format("%B %-d, %Y").to_string(),
            days_as_member,
            destinations_rated,
        }
    }
}
