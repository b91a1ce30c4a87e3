//! Core domain types for TasteMatch.

pub mod artist;
pub mod common;
pub mod comparison;
pub mod metrics;
pub mod profile;
pub mod track;

pub use artist::Artist;
pub use common::*;
pub use comparison::{ComparisonResult, GenreComparison, GenreCount, Personality, PersonalityPair};
pub use metrics::{RecentTrackSample, TrackMetrics, TrackMetricsPair};
pub use profile::{unique_genres, TasteProfile, UserIdentity};
pub use track::{Track, TrackAlbum, TrackArtist};
