//! Comparison output types.

use serde::{Deserialize, Serialize};

use super::{Artist, Track, TrackMetricsPair};

/// A genre with its mention count across a user's top artists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

impl GenreCount {
    pub fn new(genre: impl Into<String>, count: usize) -> Self {
        Self {
            genre: genre.into(),
            count,
        }
    }
}

/// Top-5 genre rankings for both users plus their overlap.
///
/// Each side is sorted by count descending, ties broken by first-encountered
/// order; `overlap` follows user1's ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreComparison {
    pub user1: Vec<GenreCount>,
    pub user2: Vec<GenreCount>,
    pub overlap: Vec<String>,
}

/// One of the 16 fixed listening personalities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Personality {
    #[serde(rename = "The Nomad")]
    Nomad,
    #[serde(rename = "The Voyager")]
    Voyager,
    #[serde(rename = "The Adventurer")]
    Adventurer,
    #[serde(rename = "The Devotee")]
    Devotee,
    #[serde(rename = "The Deep Diver")]
    DeepDiver,
    #[serde(rename = "The Top Charter")]
    TopCharter,
    #[serde(rename = "The Specialist")]
    Specialist,
    #[serde(rename = "The Maverick")]
    Maverick,
    #[serde(rename = "The Connoisseur")]
    Connoisseur,
    #[serde(rename = "The Enthusiast")]
    Enthusiast,
    #[serde(rename = "The Time Traveler")]
    TimeTraveler,
    #[serde(rename = "The Fan Clubber")]
    FanClubber,
    #[serde(rename = "The Jukeboxer")]
    Jukeboxer,
    #[serde(rename = "The Musicologist")]
    Musicologist,
    #[serde(rename = "The Replayer")]
    Replayer,
    #[serde(rename = "The Early Adopter")]
    EarlyAdopter,
}

impl Personality {
    /// Display label for this personality.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Nomad => "The Nomad",
            Self::Voyager => "The Voyager",
            Self::Adventurer => "The Adventurer",
            Self::Devotee => "The Devotee",
            Self::DeepDiver => "The Deep Diver",
            Self::TopCharter => "The Top Charter",
            Self::Specialist => "The Specialist",
            Self::Maverick => "The Maverick",
            Self::Connoisseur => "The Connoisseur",
            Self::Enthusiast => "The Enthusiast",
            Self::TimeTraveler => "The Time Traveler",
            Self::FanClubber => "The Fan Clubber",
            Self::Jukeboxer => "The Jukeboxer",
            Self::Musicologist => "The Musicologist",
            Self::Replayer => "The Replayer",
            Self::EarlyAdopter => "The Early Adopter",
        }
    }

    /// Display sentence for this personality.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Nomad => {
                "These \"sonic explorers\" are happy to listen to all kinds of music. But the handful of artists and songs they love will always be with them, \"kind of like a musical souvenir.\""
            }
            Self::Voyager => {
                "Voyagers live and breathe music and expand their world \"through sound.\""
            }
            Self::Adventurer => {
                "A \"seeker of sound,\" Adventurers veer out into the \"unknown, searching for fresher artists, deeper cuts, newer tracks.\""
            }
            Self::Devotee => {
                "Devoted listeners have an encyclopedic knowledge of their most beloved artists. They know the words to the deep cuts and the hits."
            }
            Self::DeepDiver => {
                "Deep Divers delve into their favorite artists' catalogs to take \"in all the sights and sounds\" they discover along the way."
            }
            Self::TopCharter => {
                "While others prefer the obscure, the Top Charter is here for the hits only."
            }
            Self::Specialist => {
                "The most selective of the bunch. Specialists are curators, but once they fall in love with an artist, they're all in."
            }
            Self::Maverick => {
                "A more rebellious music lover, Mavericks are \"frolicking in that sidestream\" while the masses flock to the mainstream."
            }
            Self::Connoisseur => {
                "The Connoisseur has \"taste that people can get behind.\" The friend whose playlist never disappoints."
            }
            Self::Enthusiast => {
                "Enthusiasts are super fans who always know what their idols are doing and are always ready to support them."
            }
            Self::TimeTraveler => {
                "Time Travelers seek out music that's new to them, \"regardless of whether it's new to the rest of the world.\""
            }
            Self::FanClubber => {
                "Every artist's ideal fan, the Fan Clubber, supports their fave through and through with their \"full heart.\""
            }
            Self::Jukeboxer => {
                "Jukeboxers act like every song they like is one of their favorite songs, and they're happy to queue them all up."
            }
            Self::Musicologist => {
                "Musicologists are more preoccupied with the sonic elements of songs, \"gravitating towards songs that stand the test of time.\""
            }
            Self::Replayer => {
                "These are \"comfort listeners\" who stick to a few core artists on their playlists."
            }
            Self::EarlyAdopter => {
                "Early Adopters are always on \"the pulse of new music\" and are the first to pick up on trends."
            }
        }
    }

    /// Look up a personality by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            Self::Nomad,
            Self::Voyager,
            Self::Adventurer,
            Self::Devotee,
            Self::DeepDiver,
            Self::TopCharter,
            Self::Specialist,
            Self::Maverick,
            Self::Connoisseur,
            Self::Enthusiast,
            Self::TimeTraveler,
            Self::FanClubber,
            Self::Jukeboxer,
            Self::Musicologist,
            Self::Replayer,
            Self::EarlyAdopter,
        ]
        .into_iter()
        .find(|p| p.label() == label)
    }

    /// Description for an arbitrary label, with a generic fallback for
    /// labels outside the fixed set.
    pub fn description_for_label(label: &str) -> &'static str {
        Self::from_label(label).map_or(
            "A unique music listener with their own special taste!",
            |p| p.description(),
        )
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Personality labels for both sides of a comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonalityPair {
    pub user1: Personality,
    pub user2: Personality,
}

/// Aggregate output of one taste comparison.
///
/// Constructed once per comparison request; immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Overall compatibility in `[0, 100]`.
    pub compatibility_score: u8,
    pub track_metrics_comparison: TrackMetricsPair,
    pub shared_artists: Vec<Artist>,
    pub shared_tracks: Vec<Track>,
    pub genre_overlap: Vec<String>,
    pub genre_comparison: GenreComparison,
    pub taste_summary: String,
    pub listening_personality: PersonalityPair,
    pub genre_tag: String,
    pub user1_top_artists: Vec<Artist>,
    pub user1_top_tracks: Vec<Track>,
    pub user2_top_artists: Vec<Artist>,
    pub user2_top_tracks: Vec<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playful_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personality_labels_unique_and_total() {
        let labels: std::collections::HashSet<_> = [
            Personality::Nomad,
            Personality::Voyager,
            Personality::Adventurer,
            Personality::Devotee,
            Personality::DeepDiver,
            Personality::TopCharter,
            Personality::Specialist,
            Personality::Maverick,
            Personality::Connoisseur,
            Personality::Enthusiast,
            Personality::TimeTraveler,
            Personality::FanClubber,
            Personality::Jukeboxer,
            Personality::Musicologist,
            Personality::Replayer,
            Personality::EarlyAdopter,
        ]
        .iter()
        .map(|p| {
            assert!(!p.description().is_empty());
            p.label()
        })
        .collect();
        assert_eq!(labels.len(), 16);
    }

    #[test]
    fn test_personality_label_roundtrip() {
        assert_eq!(
            Personality::from_label("The Deep Diver"),
            Some(Personality::DeepDiver)
        );
        assert_eq!(Personality::from_label("The DJ"), None);
        assert_eq!(
            Personality::description_for_label("The DJ"),
            "A unique music listener with their own special taste!"
        );
    }

    #[test]
    fn test_personality_serde_label() {
        let json = serde_json::to_string(&Personality::TopCharter).unwrap_or_default();
        assert_eq!(json, "\"The Top Charter\"");
    }
}
