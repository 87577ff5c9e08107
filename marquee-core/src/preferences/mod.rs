//! Per-profile genre interest tracking.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use marquee_model::{GenrePreferences, ProfileId};
use tracing::error;

use crate::database::PreferenceStore;
use crate::error::{CatalogError, Result};

/// Accumulates genre interest scores for viewing profiles.
#[derive(Clone)]
pub struct PreferenceTracker {
    store: Arc<dyn PreferenceStore>,
}

impl fmt::Debug for PreferenceTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceTracker").finish()
    }
}

impl PreferenceTracker {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Record interest in the listed genres for the active profile.
    ///
    /// One atomic server-side upsert-and-increment round trip; duplicate
    /// labels within a single call count once. An empty list is a no-op
    /// success. A missing profile is an error - it indicates a session
    /// bug worth surfacing even though callers usually ignore it.
    pub async fn track_interest(
        &self,
        profile_id: Option<&ProfileId>,
        genres: &[String],
    ) -> Result<()> {
        let Some(profile_id) = profile_id else {
            return Err(CatalogError::InvalidInput(
                "no active viewing profile for interest tracking".to_string(),
            ));
        };

        if genres.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        let unique: Vec<String> = genres
            .iter()
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect();

        self.store.increment_genres(profile_id, &unique).await
    }

    /// Submit a tracking call without blocking the caller's continuation.
    /// The spawned work still runs to completion; failures are reported
    /// through the log, never silently dropped.
    pub fn spawn_track_interest(
        &self,
        profile_id: Option<ProfileId>,
        genres: Vec<String>,
    ) {
        let tracker = self.clone();
        tokio::spawn(async move {
            if let Err(err) =
                tracker.track_interest(profile_id.as_ref(), &genres).await
            {
                error!(error = %err, "interest tracking failed");
            }
        });
    }

    /// Read the profile's accumulated scores. A profile with no recorded
    /// interactions reads back as an empty score map, not an error.
    pub async fn preferences(
        &self,
        profile_id: &ProfileId,
    ) -> Result<GenrePreferences> {
        let scores = self.store.genre_scores(profile_id).await?;
        Ok(GenrePreferences {
            profile_id: Some(*profile_id),
            scores,
        })
    }
}
