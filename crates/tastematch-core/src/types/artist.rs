//! Artist type representing a catalog artist.

use serde::{Deserialize, Serialize};

use super::Images;

/// A music artist as returned by the profile provider.
///
/// The id is stable across fetches for the same catalog entry; two artists
/// with equal ids denote the same artist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    /// Catalog artist ID.
    pub id: String,
    /// Artist name.
    pub name: String,
    /// Genre tags carried by this artist (possibly empty).
    #[serde(default)]
    pub genres: Vec<String>,
    /// Artist images/avatars.
    #[serde(default)]
    pub images: Images,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            genres: Vec::new(),
            images: Images::default(),
        }
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Get the primary image URL, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.images.primary_url()
    }
}
