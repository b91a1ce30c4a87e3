//! Rule-based listening-personality classification.

use std::collections::HashMap;

use tastematch_core::{Personality, TasteProfile};

/// Aggregate statistics the classifier operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListeningStats {
    /// Number of distinct genre tags mentioned across the top artists.
    pub unique_genre_count: usize,
    /// Top genre's mention count over total mentions (0 when no mentions).
    pub dominant_genre_share: f64,
    /// Whether any genre was mentioned at all.
    pub has_dominant_genre: bool,
    /// Average track popularity from the user's metrics.
    pub average_popularity: f64,
}

impl ListeningStats {
    /// Derive stats from a taste profile. Each artist contributes one
    /// mention per genre tag it carries.
    pub fn from_profile(profile: &TasteProfile) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for artist in &profile.top_artists {
            for genre in &artist.genres {
                *counts.entry(genre.as_str()).or_insert(0) += 1;
            }
        }

        let total: usize = counts.values().sum();
        let top_count = counts.values().copied().max().unwrap_or(0);
        let dominant_genre_share = if total > 0 {
            top_count as f64 / total as f64
        } else {
            0.0
        };

        Self {
            unique_genre_count: counts.len(),
            dominant_genre_share,
            has_dominant_genre: total > 0,
            average_popularity: profile.track_metrics.average_popularity,
        }
    }
}

/// Map listening statistics to one of the 16 personalities.
///
/// The rules below are an ordered cascade; they are not mutually exclusive
/// and the first match wins.
pub fn classify_personality(stats: ListeningStats) -> Personality {
    let genres = stats.unique_genre_count;
    let share = stats.dominant_genre_share;
    let popularity = stats.average_popularity;

    if genres > 10 {
        return Personality::Nomad;
    }
    if genres > 6 {
        return Personality::Voyager;
    }
    if genres > 4 && popularity < 50.0 {
        return Personality::Adventurer;
    }
    if share > 0.7 && stats.has_dominant_genre {
        return Personality::Devotee;
    }
    if popularity < 30.0 {
        return Personality::DeepDiver;
    }
    if popularity > 80.0 {
        return Personality::TopCharter;
    }
    if genres <= 2 && stats.has_dominant_genre {
        return Personality::Specialist;
    }
    if genres > 4 && popularity < 40.0 {
        return Personality::Maverick;
    }
    if popularity > 60.0 && popularity < 80.0 {
        return Personality::Connoisseur;
    }
    if genres > 3 && genres <= 5 {
        return Personality::Enthusiast;
    }
    if popularity < 40.0 {
        return Personality::TimeTraveler;
    }
    if share > 0.5 && share <= 0.7 {
        return Personality::FanClubber;
    }
    if genres > 5 && genres <= 7 {
        return Personality::Jukeboxer;
    }
    if popularity > 40.0 && popularity < 60.0 {
        return Personality::Musicologist;
    }
    if genres <= 3 {
        return Personality::Replayer;
    }
    Personality::EarlyAdopter
}

/// Convenience wrapper: derive stats from a profile and classify.
pub fn classify_profile(profile: &TasteProfile) -> Personality {
    classify_personality(ListeningStats::from_profile(profile))
}
