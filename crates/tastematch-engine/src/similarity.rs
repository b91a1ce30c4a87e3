//! Similarity measures and the top-level taste comparison.

use std::collections::{HashMap, HashSet};

use tastematch_core::{
    Artist, ComparisonResult, Error, GenreComparison, GenreCount, PersonalityPair, Result,
    TasteProfile, Track, TrackMetricsPair,
};
use tracing::debug;

use crate::narrative;
use crate::personality::classify_profile;
use crate::rng::RandomSource;

/// Number of top genres ranked per user.
const TOP_GENRE_COUNT: usize = 5;

/// Score weights: metrics, artist overlap, track overlap, genre overlap.
const WEIGHT_METRICS: f64 = 0.30;
const WEIGHT_ARTISTS: f64 = 0.25;
const WEIGHT_TRACKS: f64 = 0.20;
const WEIGHT_GENRES: f64 = 0.25;

/// Items identified by a catalog id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Artist {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Track {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Set intersection by id. Order follows `items2` filtered by membership in
/// `items1`'s id set, so `(a, b)` and `(b, a)` yield the same id set in
/// possibly different orders.
pub fn shared_items<T: Keyed + Clone>(items1: &[T], items2: &[T]) -> Vec<T> {
    let ids1: HashSet<&str> = items1.iter().map(Keyed::key).collect();
    items2
        .iter()
        .filter(|item| ids1.contains(item.key()))
        .cloned()
        .collect()
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0 when either norm is 0. A length mismatch is an invalid-input
/// error, never a silent truncation.
pub fn cosine_similarity(vec1: &[f64], vec2: &[f64]) -> Result<f64> {
    if vec1.len() != vec2.len() {
        return Err(Error::InvalidArgument(
            "vectors must have the same length".to_string(),
        ));
    }

    let mut dot = 0.0;
    let mut norm1 = 0.0;
    let mut norm2 = 0.0;
    for (a, b) in vec1.iter().zip(vec2) {
        dot += a * b;
        norm1 += a * a;
        norm2 += b * b;
    }

    if norm1 == 0.0 || norm2 == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm1.sqrt() * norm2.sqrt()))
}

/// Rank each user's top-5 genres by mention count across their top artists
/// and compute the overlap.
///
/// Each artist contributes one mention per genre tag it carries. Ties break
/// by first-encountered order; the overlap follows user1's ranking.
pub fn genre_comparison(artists1: &[Artist], artists2: &[Artist]) -> GenreComparison {
    let user1 = top_genres(artists1);
    let user2 = top_genres(artists2);

    let user2_set: HashSet<&str> = user2.iter().map(|g| g.genre.as_str()).collect();
    let overlap = user1
        .iter()
        .filter(|g| user2_set.contains(g.genre.as_str()))
        .map(|g| g.genre.clone())
        .collect();

    GenreComparison {
        user1,
        user2,
        overlap,
    }
}

fn top_genres(artists: &[Artist]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for artist in artists {
        for genre in &artist.genres {
            if !counts.contains_key(genre.as_str()) {
                order.push(genre.as_str());
            }
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    // Stable sort keeps first-encountered order among equal counts.
    let mut ranked: Vec<GenreCount> = order
        .into_iter()
        .map(|genre| GenreCount::new(genre, counts[genre]))
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_GENRE_COUNT);
    ranked
}

/// Overlap ratio `|shared| / max(|set1|, |set2|)`, 0 when both sets are
/// empty.
fn overlap_ratio(shared: usize, len1: usize, len2: usize) -> f64 {
    let denominator = len1.max(len2);
    if denominator == 0 {
        0.0
    } else {
        shared as f64 / denominator as f64
    }
}

/// Primary track list widened with a supplementary window, deduplicated by
/// id with the primary list's order first.
fn widen_tracks(primary: &[Track], supplementary: Option<&[Track]>) -> Vec<Track> {
    let mut seen: HashSet<&str> = primary.iter().map(|t| t.id.as_str()).collect();
    let mut pool = primary.to_vec();
    if let Some(extra) = supplementary {
        for track in extra {
            if seen.insert(track.id.as_str()) {
                pool.push(track.clone());
            }
        }
    }
    pool
}

/// Compare two taste profiles into one [`ComparisonResult`].
///
/// Supplementary track lists, when supplied, widen shared-track detection to
/// recover overlaps the primary top-track window misses. Randomness is used
/// only for the genre tag; with a fixed [`RandomSource`] the output is fully
/// deterministic.
pub fn compare_tastes(
    profile1: &TasteProfile,
    profile2: &TasteProfile,
    supplementary1: Option<&[Track]>,
    supplementary2: Option<&[Track]>,
    rng: &mut dyn RandomSource,
) -> Result<ComparisonResult> {
    let metrics1 = &profile1.track_metrics;
    let metrics2 = &profile2.track_metrics;

    // Both vectors deliberately receive the same genre-match and
    // track-count components; downstream scores depend on this exact
    // construction.
    let genre_match = if metrics1.top_genre == metrics2.top_genre {
        1.0
    } else {
        0.0
    };
    let track_count_similarity = 1.0
        - (metrics1.recent_tracks.len() as f64 - metrics2.recent_tracks.len() as f64).abs() / 3.0;

    let vec1 = [
        metrics1.average_popularity / 100.0,
        genre_match,
        track_count_similarity,
    ];
    let vec2 = [
        metrics2.average_popularity / 100.0,
        genre_match,
        track_count_similarity,
    ];
    let metrics_similarity = cosine_similarity(&vec1, &vec2)?;

    let shared_artists = shared_items(&profile1.top_artists, &profile2.top_artists);

    let track_pool1 = widen_tracks(&profile1.top_tracks, supplementary1);
    let track_pool2 = widen_tracks(&profile2.top_tracks, supplementary2);
    let shared_tracks = shared_items(&track_pool1, &track_pool2);

    let genres = genre_comparison(&profile1.top_artists, &profile2.top_artists);

    let artist_ratio = overlap_ratio(
        shared_artists.len(),
        profile1.top_artists.len(),
        profile2.top_artists.len(),
    );
    let track_ratio = overlap_ratio(shared_tracks.len(), track_pool1.len(), track_pool2.len());
    let genre_ratio = overlap_ratio(genres.overlap.len(), genres.user1.len(), genres.user2.len());

    let compatibility_score = ((WEIGHT_METRICS * metrics_similarity
        + WEIGHT_ARTISTS * artist_ratio
        + WEIGHT_TRACKS * track_ratio
        + WEIGHT_GENRES * genre_ratio)
        * 100.0)
        .round() as u8;

    debug!(
        score = compatibility_score,
        shared_artists = shared_artists.len(),
        shared_tracks = shared_tracks.len(),
        genre_overlap = genres.overlap.len(),
        "compared {} and {}",
        profile1.user.display_name,
        profile2.user.display_name,
    );

    let metrics_pair = TrackMetricsPair {
        user1: metrics1.clone(),
        user2: metrics2.clone(),
    };

    let taste_summary = narrative::taste_summary(
        &profile1.user.display_name,
        &profile2.user.display_name,
        &shared_artists,
        &genres,
        &metrics_pair,
        compatibility_score,
    );

    let listening_personality = PersonalityPair {
        user1: classify_profile(profile1),
        user2: classify_profile(profile2),
    };

    let genre_tag = narrative::genre_tag(&genres, rng);

    let playful_summary = narrative::playful_summary(
        profile1,
        profile2,
        &shared_artists,
        &shared_tracks,
        &genres,
    );

    Ok(ComparisonResult {
        compatibility_score,
        track_metrics_comparison: metrics_pair,
        genre_overlap: genres.overlap.clone(),
        genre_comparison: genres,
        shared_artists,
        shared_tracks,
        taste_summary,
        listening_personality,
        genre_tag,
        user1_top_artists: profile1.top_artists.clone(),
        user1_top_tracks: profile1.top_tracks.clone(),
        user2_top_artists: profile2.top_artists.clone(),
        user2_top_tracks: profile2.top_tracks.clone(),
        playful_summary: Some(playful_summary),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rng::FixedSource;
    use tastematch_core::{TrackMetrics, UserIdentity};

    fn artist(id: &str, genres: &[&str]) -> Artist {
        Artist::new(id, format!("Artist {id}")).with_genres(genres.iter().copied())
    }

    fn track(id: &str, popularity: u8) -> Track {
        Track::new(id, format!("Track {id}"))
            .with_artist(format!("Artist {id}"))
            .with_popularity(popularity)
    }

    fn profile(
        name: &str,
        artists: Vec<Artist>,
        tracks: Vec<Track>,
        metrics: TrackMetrics,
    ) -> TasteProfile {
        TasteProfile::new(UserIdentity::new(name, name), artists, tracks, metrics)
    }

    fn metrics(popularity: f64, genre: &str) -> TrackMetrics {
        TrackMetrics {
            average_popularity: popularity,
            top_genre: genre.to_string(),
            recent_tracks: Vec::new(),
        }
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        let sim = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert_eq!(sim.ok(), Some(0.0));
    }

    #[test]
    fn test_cosine_length_mismatch_is_error() {
        assert!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let sim = cosine_similarity(&[0.5, 1.0, 0.3], &[0.5, 1.0, 0.3]).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_items_order_and_symmetry() {
        let a = vec![track("1", 0), track("2", 0), track("3", 0)];
        let b = vec![track("3", 0), track("9", 0), track("1", 0)];

        let ab = shared_items(&a, &b);
        let ba = shared_items(&b, &a);

        // Order follows the second argument.
        let ab_ids: Vec<&str> = ab.iter().map(|t| t.id.as_str()).collect();
        let ba_ids: Vec<&str> = ba.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ab_ids, ["3", "1"]);
        assert_eq!(ba_ids, ["1", "3"]);

        // Same id set both ways.
        let set_ab: HashSet<&str> = ab_ids.into_iter().collect();
        let set_ba: HashSet<&str> = ba_ids.into_iter().collect();
        assert_eq!(set_ab, set_ba);
    }

    #[test]
    fn test_genre_comparison_ranking_and_ties() {
        let artists1 = vec![
            artist("a", &["rock", "pop"]),
            artist("b", &["rock", "jazz"]),
            artist("c", &["rock", "pop", "folk", "ambient", "techno"]),
        ];
        let artists2 = vec![artist("d", &["pop", "jazz"]), artist("e", &["pop"])];

        let cmp = genre_comparison(&artists1, &artists2);

        assert_eq!(cmp.user1[0], GenreCount::new("rock", 3));
        assert_eq!(cmp.user1[1], GenreCount::new("pop", 2));
        // Ties (jazz/folk/ambient/techno at 1) keep first-seen order; only
        // five entries survive.
        assert_eq!(cmp.user1.len(), 5);
        assert_eq!(cmp.user1[2].genre, "jazz");

        assert_eq!(cmp.user2[0], GenreCount::new("pop", 2));
        // Overlap ordered by user1's ranking.
        assert_eq!(cmp.overlap, ["pop", "jazz"]);
    }

    #[test]
    fn test_high_overlap_scenario_scores_high() {
        // Identical top-5 genre sets, 3/5 shared artists, 2/5 shared tracks,
        // same heuristic genre, both averaging 70 popularity.
        let genres: Vec<&str> = vec!["rock", "pop", "jazz", "folk", "metal"];
        let artists1: Vec<Artist> = (0..5)
            .map(|i| artist(&format!("a{i}"), &[genres[i]]))
            .collect();
        let mut artists2 = artists1[..3].to_vec();
        artists2.push(artist("x1", &["folk"]));
        artists2.push(artist("x2", &["metal"]));

        let tracks1: Vec<Track> = (0..5).map(|i| track(&format!("t{i}"), 70)).collect();
        let mut tracks2 = tracks1[..2].to_vec();
        tracks2.extend((5..8).map(|i| track(&format!("t{i}"), 70)));

        let p1 = profile("Uno", artists1, tracks1, metrics(70.0, "Rock"));
        let p2 = profile("Dos", artists2, tracks2, metrics(70.0, "Rock"));

        let mut rng = FixedSource::new(vec![0]);
        let result = compare_tastes(&p1, &p2, None, None, &mut rng).unwrap();

        // 0.3*1 + 0.25*0.6 + 0.2*0.4 + 0.25*1 = 0.78
        assert_eq!(result.compatibility_score, 78);
        assert_eq!(result.shared_artists.len(), 3);
        assert_eq!(result.shared_tracks.len(), 2);
    }

    #[test]
    fn test_opposites_scenario_scores_low() {
        let artists1 = vec![artist("a1", &["classical"]), artist("a2", &["opera"])];
        let artists2 = vec![artist("b1", &["trap"]), artist("b2", &["drill"])];
        let tracks1 = vec![track("t1", 20), track("t2", 20)];
        let tracks2 = vec![track("t3", 90), track("t4", 90)];

        let p1 = profile("Uno", artists1, tracks1, metrics(20.0, "Classical"));
        let p2 = profile("Dos", artists2, tracks2, metrics(90.0, "Hip Hop"));

        let mut rng = FixedSource::new(vec![0]);
        let result = compare_tastes(&p1, &p2, None, None, &mut rng).unwrap();

        // All overlap ratios are 0; only the metrics term contributes, and
        // the shared vector components keep it from reaching the lowest
        // summary band.
        assert!(result.compatibility_score < 30);
        assert!(result.taste_summary.contains("very different tastes"));
        // Popularity gap of 70 exceeds the 40 threshold for this band.
        assert!(result
            .taste_summary
            .contains("Your music discovery levels are completely opposite!"));
    }

    #[test]
    fn test_score_bounds_hold() {
        let p1 = profile("Uno", Vec::new(), Vec::new(), TrackMetrics::empty());
        let p2 = profile("Dos", Vec::new(), Vec::new(), TrackMetrics::empty());
        let mut rng = FixedSource::new(vec![0]);
        let result = compare_tastes(&p1, &p2, None, None, &mut rng).unwrap();
        assert!(result.compatibility_score <= 100);
    }

    #[test]
    fn test_idempotence_with_fixed_rng() {
        let p1 = profile(
            "Uno",
            vec![artist("a", &["rock", "pop"])],
            vec![track("t1", 60)],
            metrics(60.0, "Rock"),
        );
        let p2 = profile(
            "Dos",
            vec![artist("a", &["rock", "pop"])],
            vec![track("t1", 60)],
            metrics(60.0, "Rock"),
        );

        let mut rng1 = FixedSource::new(vec![2]);
        let mut rng2 = FixedSource::new(vec![2]);
        let first = compare_tastes(&p1, &p2, None, None, &mut rng1);
        let second = compare_tastes(&p1, &p2, None, None, &mut rng2);
        assert_eq!(first.ok(), second.ok());
    }

    proptest::proptest! {
        #[test]
        fn prop_score_bounded_for_any_popularity(
            pop1 in 0.0f64..=100.0,
            pop2 in 0.0f64..=100.0,
            same_genre in proptest::bool::ANY,
        ) {
            let genre2 = if same_genre { "Pop" } else { "Rock" };
            let p1 = profile("Uno", Vec::new(), Vec::new(), metrics(pop1, "Pop"));
            let p2 = profile("Dos", Vec::new(), Vec::new(), metrics(pop2, genre2));
            let mut rng = FixedSource::new(vec![0]);
            let result = compare_tastes(&p1, &p2, None, None, &mut rng).unwrap();
            proptest::prop_assert!(result.compatibility_score <= 100);
        }
    }

    #[test]
    fn test_supplementary_tracks_widen_recall() {
        let tracks1 = vec![track("t1", 50)];
        let tracks2 = vec![track("t2", 50)];
        // The overlap only shows up in the shorter windows.
        let supp1 = vec![track("s1", 40)];
        let supp2 = vec![track("s1", 40)];

        let p1 = profile("Uno", Vec::new(), tracks1, metrics(50.0, "Pop"));
        let p2 = profile("Dos", Vec::new(), tracks2, metrics(50.0, "Pop"));

        let mut rng = FixedSource::new(vec![0]);
        let without = compare_tastes(&p1, &p2, None, None, &mut rng).unwrap();
        let with = compare_tastes(&p1, &p2, Some(&supp1), Some(&supp2), &mut rng).unwrap();

        assert!(without.shared_tracks.is_empty());
        assert_eq!(with.shared_tracks.len(), 1);
        assert_eq!(with.shared_tracks[0].id, "s1");
    }
}
