//! Library endpoints: playback history, saved tracks and the widened track
//! pools used as supplementary comparison input.

use tastematch_core::{Result, TimeRange, Track};
use tracing::debug;

use crate::wire::{Paging, PlayHistoryItem, SavedTrackItem};
use crate::SpotifyClient;

/// Page size when widening a track pool.
const POOL_FETCH_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Fetch the user's most recently played tracks, newest first.
    pub async fn get_recently_played(&self, limit: u32) -> Result<Vec<Track>> {
        let path = format!("/me/player/recently-played?limit={limit}");
        let page: Paging<PlayHistoryItem> = self.get(&path).await?;
        debug!("Got {} recently played tracks", page.items.len());
        Ok(page.items.into_iter().map(|i| i.track.into()).collect())
    }

    /// Fetch the user's saved (library) tracks.
    pub async fn get_saved_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        let path = format!("/me/tracks?limit={limit}");
        let page: Paging<SavedTrackItem> = self.get(&path).await?;
        debug!("Got {} saved tracks", page.items.len());
        Ok(page.items.into_iter().map(|i| i.track.into()).collect())
    }

    /// Fetch a widened track pool for a listening window.
    ///
    /// Each window draws from the sources that best approximate it: recent
    /// playback for the short window, recent playback plus the library for
    /// the medium one, and the library plus long-term favorites for the
    /// long one. The pools feed track-overlap detection, so broader is
    /// better than ranked.
    pub async fn get_tracks_for_time_range(&self, time_range: TimeRange) -> Result<Vec<Track>> {
        match time_range {
            TimeRange::ShortTerm => self.get_recently_played(POOL_FETCH_LIMIT).await,
            TimeRange::MediumTerm => {
                let (recent, saved) = tokio::try_join!(
                    self.get_recently_played(POOL_FETCH_LIMIT),
                    self.get_saved_tracks(POOL_FETCH_LIMIT),
                )?;
                Ok(recent.into_iter().chain(saved).collect())
            }
            TimeRange::LongTerm => {
                let (saved, top) = tokio::try_join!(
                    self.get_saved_tracks(POOL_FETCH_LIMIT),
                    self.get_top_tracks(TimeRange::LongTerm),
                )?;
                Ok(saved.into_iter().chain(top).collect())
            }
        }
    }
}
