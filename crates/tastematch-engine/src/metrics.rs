//! Metric aggregation: reduces a track list into one [`TrackMetrics`].

use tastematch_core::{
    types::metrics::MAX_RECENT_TRACKS, RecentTrackSample, Track, TrackMetrics,
};

/// Ordered keyword table for the genre heuristic. First matching row wins.
const GENRE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["rock", "metal"], "Rock"),
    (&["hip", "rap"], "Hip Hop"),
    (&["jazz"], "Jazz"),
    (&["classical"], "Classical"),
    (&["country"], "Country"),
    (&["electronic", "edm"], "Electronic"),
];

const DEFAULT_GENRE: &str = "Pop";

/// Reduce a track list into one metrics summary.
///
/// `tracks` drives the average popularity and the genre heuristic;
/// `recently_played` supplies the exemplar list (capped at 5) and nothing
/// else. An empty `tracks` input yields the defined fallback
/// (`average_popularity: 0`, `top_genre: "Unknown"`, no exemplars).
pub fn aggregate_track_metrics(tracks: &[Track], recently_played: &[Track]) -> TrackMetrics {
    if tracks.is_empty() {
        return TrackMetrics::empty();
    }

    let total: f64 = tracks.iter().map(|t| f64::from(t.popularity)).sum();
    let average_popularity = total / tracks.len() as f64;

    let recent_tracks = recently_played
        .iter()
        .take(MAX_RECENT_TRACKS)
        .map(|t| RecentTrackSample {
            name: t.name.clone(),
            artist: t.artist_name().to_string(),
            popularity: t.popularity,
            album_image: t.album_image_url().map(str::to_string),
        })
        .collect();

    TrackMetrics {
        average_popularity,
        top_genre: infer_top_genre(tracks),
        recent_tracks,
    }
}

/// Coarse genre inference: scan the concatenated lowercase text of all track
/// names and artist names against the fixed keyword table. This is a string
/// heuristic, not genre metadata lookup.
fn infer_top_genre(tracks: &[Track]) -> String {
    let text = tracks
        .iter()
        .map(|t| format!("{} {}", t.name, t.artists_display()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    for (keywords, genre) in GENRE_KEYWORDS {
        if keywords.iter().any(|k| text.contains(k)) {
            return (*genre).to_string();
        }
    }
    DEFAULT_GENRE.to_string()
}
