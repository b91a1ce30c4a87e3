//! # tastematch-engine
//!
//! The taste-comparison engine: pure, synchronous computation over
//! already-fetched profiles. Produces overlap scores, listening
//! personalities, narrative text, and blended playlists.
//!
//! The only non-determinism lives behind the [`RandomSource`] trait; every
//! other function is referentially transparent and safe to call concurrently.

pub mod blend;
pub mod metrics;
pub mod narrative;
pub mod personality;
pub mod rng;
pub mod similarity;

pub use blend::{blend_playlist_name, blend_playlists, MAX_PLAYLIST_TRACKS};
pub use metrics::aggregate_track_metrics;
pub use personality::{classify_personality, classify_profile, ListeningStats};
pub use rng::{RandomSource, ThreadRngSource};
pub use similarity::{compare_tastes, cosine_similarity, genre_comparison, shared_items};
