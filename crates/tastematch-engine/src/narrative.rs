//! Narrative text generation: taste summary, genre tag, playful summary.
//!
//! All output here is display-only; none of it feeds back into scoring.

use tastematch_core::{Artist, GenreComparison, TasteProfile, Track, TrackMetricsPair};

use crate::rng::RandomSource;

/// Maximum number of sentences in a playful summary.
const PLAYFUL_SENTENCES: usize = 2;

/// Suffixes for the multi-overlap genre tag, picked at random.
const GENRE_TAG_SUFFIXES: &[&str] = &["Twins", "Squad", "Crew", "Vibes", "Lovers", "Heads"];

/// Score-banded taste summary.
///
/// Bands: 80+ soulmates, 60+ great chemistry, 40+ some overlap, 20+ very
/// different, else musical opposites. The lower bands call out the average
/// popularity gap when it crosses a fixed threshold.
pub fn taste_summary(
    user1_name: &str,
    user2_name: &str,
    shared_artists: &[Artist],
    genre_comparison: &GenreComparison,
    metrics: &TrackMetricsPair,
    compatibility_score: u8,
) -> String {
    let shared_genres: Vec<&str> = genre_comparison
        .overlap
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();
    let user1_top_genre = genre_comparison
        .user1
        .first()
        .map_or("", |g| g.genre.as_str());
    let user2_top_genre = genre_comparison
        .user2
        .first()
        .map_or("", |g| g.genre.as_str());
    let popularity_diff =
        (metrics.user1.average_popularity - metrics.user2.average_popularity).abs();

    if compatibility_score >= 80 {
        let mut summary = format!("You and {user2_name} are musical soulmates! ");
        if !shared_genres.is_empty() {
            summary.push_str(&format!("You both love {}", shared_genres.join(", ")));
        }
        if let Some(first) = shared_artists.first() {
            summary.push_str(&format!(" and share favorite artists like {}", first.name));
            if let Some(second) = shared_artists.get(1) {
                summary.push_str(&format!(" and {}", second.name));
            }
        }
        summary.push_str(". Your playlists would be practically identical!");
        return summary;
    }

    if compatibility_score >= 60 {
        let mut summary = format!("You and {user2_name} have great musical chemistry! ");
        if !shared_genres.is_empty() {
            summary.push_str(&format!("You both enjoy {}", shared_genres.join(", ")));
        }
        if let Some(first) = shared_artists.first() {
            summary.push_str(&format!(" and love {}", first.name));
        }
        summary.push_str(". You'd have a blast sharing music!");
        return summary;
    }

    if compatibility_score >= 40 {
        let mut summary = format!("You and {user2_name} have some musical overlap. ");
        if shared_genres.is_empty() {
            summary.push_str(&format!(
                "{user1_name} is into {user1_top_genre} while {user2_name} prefers {user2_top_genre}"
            ));
        } else {
            summary.push_str(&format!("You both like {}", shared_genres.join(", ")));
        }
        if popularity_diff > 30.0 {
            summary.push_str(". One of you loves the hits, the other digs deeper!");
        }
        summary.push_str(" You'll discover new music from each other!");
        return summary;
    }

    if compatibility_score >= 20 {
        let mut summary = format!("You and {user2_name} have very different tastes! ");
        if shared_genres.is_empty() {
            summary.push_str(&format!(
                "{user1_name} loves {user1_top_genre} while {user2_name} is all about {user2_top_genre}"
            ));
        } else {
            summary.push_str(&format!("You only share {}", shared_genres.join(", ")));
        }
        if popularity_diff > 40.0 {
            summary.push_str(". Your music discovery levels are completely opposite!");
        }
        summary.push_str(" But opposites attract, right?");
        return summary;
    }

    let mut summary = format!("You and {user2_name} are musical opposites! ");
    summary.push_str(&format!(
        "{user1_name} is a {user1_top_genre} fan while {user2_name} vibes with {user2_top_genre}. "
    ));
    if shared_artists.is_empty() {
        summary.push_str("Not a single shared favorite artist! ");
    }
    if popularity_diff > 50.0 {
        summary.push_str("Your music discovery levels are polar opposites! ");
    }
    summary.push_str("This could be interesting... or chaotic!");
    summary
}

/// Playful label for the pairing, derived from the genre overlap.
///
/// With 2+ overlapping top genres the suffix is chosen at random from a
/// fixed set, so two calls with the same input may differ unless the caller
/// supplies a fixed [`RandomSource`].
pub fn genre_tag(genre_comparison: &GenreComparison, rng: &mut dyn RandomSource) -> String {
    let overlap = &genre_comparison.overlap;
    if overlap.len() >= 2 {
        let main_genre = title_case(&overlap[0]);
        let suffix = GENRE_TAG_SUFFIXES[rng.pick(GENRE_TAG_SUFFIXES.len())];
        return format!("{main_genre} {suffix}");
    }
    if overlap.len() == 1 {
        return format!("{} Buddies", title_case(&overlap[0]));
    }

    let user1_top = genre_comparison.user1.first().map(|g| g.genre.as_str());
    let user2_top = genre_comparison.user2.first().map(|g| g.genre.as_str());
    match (user1_top, user2_top) {
        (Some(g1), Some(g2)) => format!("{} x {} Opposites", title_case(g1), title_case(g2)),
        _ => "Genre Explorers".to_string(),
    }
}

/// Concatenation of the first 2 non-empty results from the ordered template
/// list. Templates with missing data are skipped; fewer than 2 sentences is
/// fine.
pub fn playful_summary(
    profile1: &TasteProfile,
    profile2: &TasteProfile,
    shared_artists: &[Artist],
    shared_tracks: &[Track],
    genre_comparison: &GenreComparison,
) -> String {
    let user1_name = &profile1.user.display_name;
    let user2_name = &profile2.user.display_name;
    let shared_genres: Vec<&str> = genre_comparison
        .overlap
        .iter()
        .take(2)
        .map(String::as_str)
        .collect();

    let first_unique_artist = |profile: &TasteProfile| {
        profile
            .top_artists
            .iter()
            .find(|a| !shared_artists.iter().any(|sa| sa.id == a.id))
            .cloned()
    };
    let first_unique_track = |profile: &TasteProfile| {
        profile
            .top_tracks
            .iter()
            .find(|t| !shared_tracks.iter().any(|st| st.id == t.id))
            .cloned()
    };

    let user1_unique_artist = first_unique_artist(profile1);
    let user2_unique_artist = first_unique_artist(profile2);
    let user1_unique_track = first_unique_track(profile1);
    let user2_unique_track = first_unique_track(profile2);

    let pop1 = profile1.track_metrics.average_popularity;
    let pop2 = profile2.track_metrics.average_popularity;
    let popularity_diff = (pop1 - pop2).abs();
    let both_mainstream = pop1 > 60.0 && pop2 > 60.0;
    let both_indie = pop1 < 40.0 && pop2 < 40.0;

    let genre_line = if shared_genres.is_empty() {
        "You each bring something different to the mix. Unique tastes make for interesting listening!".to_string()
    } else {
        format!(
            "You both enjoy {}. Looks like you'd have a good time swapping playlists.",
            shared_genres.join(" and ")
        )
    };

    let artist_line = shared_artists.first().map_or_else(
        || "No shared favorite artists, but plenty of new music to discover from each other!".to_string(),
        |a| format!("You both have a soft spot for {}.", a.name),
    );

    let popularity_line = if both_indie {
        "Both of you dig deep for hidden gems. Perfect for discovering new music together."
            .to_string()
    } else if both_mainstream {
        "You both love the hits! Your playlists would be full of crowd-pleasers.".to_string()
    } else if popularity_diff > 30.0 {
        "One of you loves the hits, the other digs deeper. Nice balance!".to_string()
    } else {
        "Your music discovery levels are pretty well matched.".to_string()
    };

    let unique_artist_line = match (&user1_unique_artist, &user2_unique_artist) {
        (Some(a1), Some(a2)) => Some(format!(
            "{user1_name} is into {}, while {user2_name} prefers {}. Plenty to share!",
            a1.name, a2.name
        )),
        _ => None,
    };

    let unique_track_line = match (&user1_unique_track, &user2_unique_track) {
        (Some(t1), Some(t2)) => Some(format!(
            "Top tracks like \"{}\" and \"{}\" show off your unique styles.",
            t1.name, t2.name
        )),
        _ => None,
    };

    let templates = [
        Some(genre_line),
        Some(artist_line),
        Some(popularity_line),
        unique_artist_line,
        unique_track_line,
    ];

    templates
        .into_iter()
        .flatten()
        .take(PLAYFUL_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
