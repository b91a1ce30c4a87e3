//! Profile endpoints: identity, top artists/tracks and the assembled
//! taste profile.

use tastematch_core::{Artist, Result, TasteProfile, TimeRange, Track, UserIdentity};
use tastematch_engine::aggregate_track_metrics;
use tracing::debug;

use crate::wire::{Paging, RawArtist, RawTrack, RawUser};
use crate::SpotifyClient;

/// Page size for the top-artists and top-tracks endpoints.
const TOP_ITEMS_LIMIT: u32 = 50;

/// How many recently played tracks feed the metrics exemplar list.
const METRICS_RECENT_LIMIT: u32 = 20;

impl SpotifyClient {
    /// Fetch the authenticated user's identity.
    pub async fn get_user_profile(&self) -> Result<UserIdentity> {
        let raw: RawUser = self.get("/me").await?;
        Ok(raw.into())
    }

    /// Fetch the user's top artists for a listening window.
    pub async fn get_top_artists(&self, time_range: TimeRange) -> Result<Vec<Artist>> {
        let path = format!(
            "/me/top/artists?limit={TOP_ITEMS_LIMIT}&time_range={}",
            time_range.as_param()
        );
        let page: Paging<RawArtist> = self.get(&path).await?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    /// Fetch the user's top tracks for a listening window.
    pub async fn get_top_tracks(&self, time_range: TimeRange) -> Result<Vec<Track>> {
        let path = format!(
            "/me/top/tracks?limit={TOP_ITEMS_LIMIT}&time_range={}",
            time_range.as_param()
        );
        let page: Paging<RawTrack> = self.get(&path).await?;
        debug!("Got {} top tracks for {}", page.items.len(), time_range.as_param());
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    /// Assemble the user's full taste profile for a listening window.
    ///
    /// Identity, top artists and top tracks are fetched concurrently; the
    /// metrics exemplars come from a separate recently-played fetch so the
    /// "recent tracks" shown to users reflect actual playback history, not
    /// the ranked list.
    pub async fn get_taste_profile(&self, time_range: TimeRange) -> Result<TasteProfile> {
        let (user, top_artists, top_tracks) = tokio::try_join!(
            self.get_user_profile(),
            self.get_top_artists(time_range),
            self.get_top_tracks(time_range),
        )?;

        let recently_played = self.get_recently_played(METRICS_RECENT_LIMIT).await?;
        let track_metrics = aggregate_track_metrics(&top_tracks, &recently_played);

        Ok(TasteProfile::new(user, top_artists, top_tracks, track_metrics))
    }
}
