//! Playlist blending: merge two users' top tracks into one fair, ordered
//! playlist.

use std::collections::HashSet;

use tastematch_core::Track;

/// Maximum number of tracks in a blended playlist.
pub const MAX_PLAYLIST_TRACKS: usize = 50;

/// Maximum shared tracks inserted up front.
const MAX_SHARED_TRACKS: usize = 10;

/// Genre-matched picks taken from each side.
const GENRE_PICKS_PER_SIDE: usize = 3;

/// Merge two users' top-track lists into one ordered, deduplicated playlist
/// of at most [`MAX_PLAYLIST_TRACKS`] track ids.
///
/// Tier order:
/// 1. Tracks appearing in both lists, in user1's order, capped at 10.
/// 2. Up to 3 remaining tracks per side whose artists carry a shared genre
///    tag, interleaved one-from-each-side.
/// 3. Balanced fill from each side's remaining unique tracks: the leftover
///    slot budget is floor-split so both sides get equal shares, again
///    interleaved.
///
/// When fewer tracks are available the result is simply shorter, never
/// padded.
pub fn blend_playlists(
    tracks1: &[Track],
    genres1: &[String],
    tracks2: &[Track],
    genres2: &[String],
) -> Vec<String> {
    let ids1: HashSet<&str> = tracks1.iter().map(|t| t.id.as_str()).collect();
    let ids2: HashSet<&str> = tracks2.iter().map(|t| t.id.as_str()).collect();

    // Tier 1: all shared tracks (uncapped) determine what "remaining" means;
    // only the first 10 are inserted.
    let shared_ids: HashSet<&str> = ids1.intersection(&ids2).copied().collect();
    let mut playlist: Vec<&Track> = Vec::new();
    let mut selected: HashSet<&str> = HashSet::new();
    for track in tracks1 {
        if playlist.len() >= MAX_SHARED_TRACKS {
            break;
        }
        if shared_ids.contains(track.id.as_str()) && selected.insert(track.id.as_str()) {
            playlist.push(track);
        }
    }

    // Tier 2: genre-matched picks from each side's non-shared tracks.
    let genre_set1: HashSet<&str> = genres1.iter().map(String::as_str).collect();
    let shared_genres: HashSet<&str> = genres2
        .iter()
        .map(String::as_str)
        .filter(|g| genre_set1.contains(g))
        .collect();

    let rest1 = non_shared(tracks1, &shared_ids);
    let rest2 = non_shared(tracks2, &shared_ids);

    let picks1 = genre_picks(&rest1, &shared_genres);
    let picks2 = genre_picks(&rest2, &shared_genres);

    for track in interleave(&picks1, &picks2) {
        if playlist.len() >= MAX_PLAYLIST_TRACKS {
            break;
        }
        if selected.insert(track.id.as_str()) {
            playlist.push(track);
        }
    }

    // Tier 3: balanced fill, floor-split between the two sides.
    let budget = MAX_PLAYLIST_TRACKS.saturating_sub(playlist.len());
    let per_side = budget / 2;

    let fill1 = take_unselected(&rest1, &selected, per_side);
    let fill2 = take_unselected(&rest2, &selected, per_side);

    for track in interleave(&fill1, &fill2) {
        if playlist.len() >= MAX_PLAYLIST_TRACKS {
            break;
        }
        if selected.insert(track.id.as_str()) {
            playlist.push(track);
        }
    }

    // Defensive: earlier tiers already guarantee uniqueness.
    let mut seen = HashSet::new();
    playlist
        .into_iter()
        .filter(|t| seen.insert(t.id.as_str()))
        .take(MAX_PLAYLIST_TRACKS)
        .map(|t| t.id.clone())
        .collect()
}

/// Name for the downstream playlist.
pub fn blend_playlist_name(user1_name: &str, user2_name: &str) -> String {
    format!("TasteMatch: {user1_name} & {user2_name}")
}

fn non_shared<'a>(tracks: &'a [Track], shared_ids: &HashSet<&str>) -> Vec<&'a Track> {
    tracks
        .iter()
        .filter(|t| !shared_ids.contains(t.id.as_str()))
        .collect()
}

fn genre_picks<'a>(tracks: &[&'a Track], shared_genres: &HashSet<&str>) -> Vec<&'a Track> {
    tracks
        .iter()
        .filter(|t| {
            t.artists
                .iter()
                .any(|a| a.genres.iter().any(|g| shared_genres.contains(g.as_str())))
        })
        .take(GENRE_PICKS_PER_SIDE)
        .copied()
        .collect()
}

fn take_unselected<'a>(
    tracks: &[&'a Track],
    selected: &HashSet<&str>,
    limit: usize,
) -> Vec<&'a Track> {
    tracks
        .iter()
        .filter(|t| !selected.contains(t.id.as_str()))
        .take(limit)
        .copied()
        .collect()
}

/// Alternate one-from-each-side, user1 first; when one side runs out the
/// other side's remaining picks continue.
fn interleave<'a>(side1: &[&'a Track], side2: &[&'a Track]) -> Vec<&'a Track> {
    let mut merged = Vec::with_capacity(side1.len() + side2.len());
    let mut iter1 = side1.iter();
    let mut iter2 = side2.iter();
    loop {
        match (iter1.next(), iter2.next()) {
            (Some(a), Some(b)) => {
                merged.push(*a);
                merged.push(*b);
            }
            (Some(a), None) => {
                merged.push(*a);
                merged.extend(iter1.copied());
                break;
            }
            (None, Some(b)) => {
                merged.push(*b);
                merged.extend(iter2.copied());
                break;
            }
            (None, None) => break,
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastematch_core::TrackArtist;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {id}")).with_artist(format!("Artist {id}"))
    }

    fn genre_track(id: &str, genre: &str) -> Track {
        let mut t = Track::new(id, format!("Track {id}"));
        t.artists
            .push(TrackArtist::new(format!("Artist {id}")).with_genres([genre]));
        t
    }

    fn ids(range: std::ops::Range<usize>, prefix: &str) -> Vec<Track> {
        range.map(|i| track(&format!("{prefix}{i}"))).collect()
    }

    fn owned(genres: &[&str]) -> Vec<String> {
        genres.iter().map(|g| (*g).to_string()).collect()
    }

    #[test]
    fn test_shared_tracks_come_first_in_user1_order() {
        let tracks1 = vec![track("a"), track("b"), track("c")];
        let tracks2 = vec![track("c"), track("x"), track("a")];
        let blended = blend_playlists(&tracks1, &[], &tracks2, &[]);
        assert_eq!(&blended[..2], ["a", "c"]);
    }

    #[test]
    fn test_shared_tracks_capped_at_ten() {
        let tracks1 = ids(0..15, "s");
        let tracks2 = ids(0..15, "s");
        let blended = blend_playlists(&tracks1, &[], &tracks2, &[]);
        // All 15 are shared, but only 10 enter through the shared tier; the
        // rest are excluded from the fill tier too (they are shared tracks).
        assert_eq!(blended.len(), 10);
    }

    #[test]
    fn test_genre_tier_interleaves() {
        let tracks1 = vec![
            genre_track("g1", "indie"),
            genre_track("g2", "indie"),
            track("u1"),
        ];
        let tracks2 = vec![
            genre_track("h1", "indie"),
            genre_track("h2", "indie"),
            track("u2"),
        ];
        let blended = blend_playlists(
            &tracks1,
            &owned(&["indie", "folk"]),
            &tracks2,
            &owned(&["indie", "jazz"]),
        );
        assert_eq!(&blended[..4], ["g1", "h1", "g2", "h2"]);
    }

    #[test]
    fn test_genre_tier_skipped_without_artist_tags() {
        // Tracks whose artist references carry no genre tags never match.
        let tracks1 = vec![track("a")];
        let tracks2 = vec![track("b")];
        let blended = blend_playlists(
            &tracks1,
            &owned(&["indie"]),
            &tracks2,
            &owned(&["indie"]),
        );
        // Both tracks still arrive through the balanced fill.
        assert_eq!(blended, ["a", "b"]);
    }

    #[test]
    fn test_cap_and_uniqueness() {
        let tracks1 = ids(0..40, "a");
        let tracks2 = ids(0..40, "b");
        let blended = blend_playlists(&tracks1, &[], &tracks2, &[]);

        assert!(blended.len() <= MAX_PLAYLIST_TRACKS);
        let unique: HashSet<&str> = blended.iter().map(String::as_str).collect();
        assert_eq!(unique.len(), blended.len());
    }

    #[test]
    fn test_balanced_fill_floor_split() {
        // No shared tracks, no genre matches: 50 slots floor-split to 25
        // per side.
        let tracks1 = ids(0..40, "a");
        let tracks2 = ids(0..40, "b");
        let blended = blend_playlists(&tracks1, &[], &tracks2, &[]);

        assert_eq!(blended.len(), 50);
        let from1 = blended.iter().filter(|id| id.starts_with('a')).count();
        let from2 = blended.iter().filter(|id| id.starts_with('b')).count();
        assert_eq!(from1, 25);
        assert_eq!(from2, 25);
        // Strictly alternating, user1 first.
        assert_eq!(&blended[..4], ["a0", "b0", "a1", "b1"]);
    }

    #[test]
    fn test_short_side_never_padded() {
        let tracks1 = ids(0..3, "a");
        let tracks2 = ids(0..2, "b");
        let blended = blend_playlists(&tracks1, &[], &tracks2, &[]);
        assert_eq!(blended, ["a0", "b0", "a1", "b1", "a2"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(blend_playlists(&[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_playlist_name() {
        assert_eq!(blend_playlist_name("Ana", "Bo"), "TasteMatch: Ana & Bo");
    }
}
