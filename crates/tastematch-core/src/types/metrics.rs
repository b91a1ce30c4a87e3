//! Derived listening metrics for a single user.

use serde::{Deserialize, Serialize};

/// Maximum number of recent-track exemplars carried by [`TrackMetrics`].
pub const MAX_RECENT_TRACKS: usize = 5;

/// Aggregate metrics derived from a user's track list.
///
/// Computed fresh from a track list each time metrics are requested; never
/// mutated in place, always replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetrics {
    /// Arithmetic mean of track popularity, in `[0, 100]`.
    pub average_popularity: f64,
    /// Heuristic dominant genre, `"Unknown"` when derived from no tracks.
    pub top_genre: String,
    /// Exemplars from the most-recently-played source, capped at 5.
    pub recent_tracks: Vec<RecentTrackSample>,
}

impl TrackMetrics {
    /// The defined fallback for an empty track list.
    pub fn empty() -> Self {
        Self {
            average_popularity: 0.0,
            top_genre: "Unknown".to_string(),
            recent_tracks: Vec::new(),
        }
    }
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

/// A recently played track exemplar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentTrackSample {
    pub name: String,
    pub artist: String,
    pub popularity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_image: Option<String>,
}

/// Metrics for both sides of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackMetricsPair {
    pub user1: TrackMetrics,
    pub user2: TrackMetrics,
}
