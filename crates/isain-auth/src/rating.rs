//! Destination ratings.
//!
//! Ratings live under `destinationRatings` as a JSON object mapping
//! destination ID to a 1-5 star value. They are scoped to the device, not
//! to an account; only signing in is required to change them.

use crate::{
    error::{AuthError, Result, ValidationError},
    manager::IdentityManager,
    notify::Notifier,
};
use isain_storage::{get_json, set_json, KvStore};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Storage key for destination ratings.
pub const RATINGS_KEY: &str = "destinationRatings";

/// Accepted star values.
pub const STAR_RANGE: RangeInclusive<u8> = 1..=5;

const RATING_SAVED: &str = "Rating saved!";

/// Read/write view over the ratings, borrowing a manager for its session,
/// store and notifier.
pub struct RatingLedger<'a, S, N> {
    manager: &'a IdentityManager<S, N>,
}

impl<'a, S: KvStore, N: Notifier> RatingLedger<'a, S, N> {
    pub(crate) fn new(manager: &'a IdentityManager<S, N>) -> Self {
        Self { manager }
    }

    /// Rate a destination, replacing any earlier rating.
    ///
    /// Reports the outcome to the notifier and returns whether it succeeded.
    pub fn rate(&self, destination_id: &str, stars: u8) -> bool {
        match self.try_rate(destination_id, stars) {
            Ok(()) => {
                self.manager.notifier().success(RATING_SAVED);
                true
            }
            Err(AuthError::Unexpected(e)) => {
                tracing::error!(error = %e, "Failed to save rating");
                self.manager.notifier().error("Failed to save rating");
                false
            }
            Err(e) => {
                self.manager.notifier().error(&e.to_string());
                false
            }
        }
    }

    /// Rate a destination, returning the structured error on failure.
    pub fn try_rate(&self, destination_id: &str, stars: u8) -> Result<()> {
        if !self.manager.is_authenticated() {
            return Err(AuthError::SignInRequired);
        }
        if !STAR_RANGE.contains(&stars) {
            return Err(ValidationError::RatingOutOfRange.into());
        }

        let mut ratings = self.all()?;
        ratings.insert(destination_id.to_string(), stars);
        set_json(self.manager.store(), RATINGS_KEY, &ratings)?;

        tracing::debug!(destination = %destination_id, stars, "Saved rating");
        Ok(())
    }

    /// The saved rating for a destination.
    pub fn rating_for(&self, destination_id: &str) -> Result<Option<u8>> {
        Ok(self.all()?.get(destination_id).copied())
    }

    /// Number of destinations rated on this device.
    pub fn rated_count(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    /// Every saved rating, keyed by destination ID.
    pub fn all(&self) -> Result<BTreeMap<String, u8>> {
        Ok(get_json(self.manager.store(), RATINGS_KEY)?.unwrap_or_default())
    }
}
