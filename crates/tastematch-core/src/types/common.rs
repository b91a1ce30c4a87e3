//! Common types shared across the application.

use serde::{Deserialize, Serialize};

/// A single catalog image with URL and optional dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Collection of images at different resolutions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Images(pub Vec<Image>);

impl Images {
    pub const fn new(images: Vec<Image>) -> Self {
        Self(images)
    }

    /// Get the first (usually largest) image, Spotify's ordering convention.
    pub fn primary(&self) -> Option<&Image> {
        self.0.first()
    }

    /// Get the largest image by area, falling back to the first entry when
    /// dimensions are missing.
    pub fn best(&self) -> Option<&Image> {
        self.0
            .iter()
            .max_by_key(|i| i.width.unwrap_or(0) * i.height.unwrap_or(0))
            .or_else(|| self.0.first())
    }

    pub fn primary_url(&self) -> Option<&str> {
        self.primary().map(|i| i.url.as_str())
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Listening-history window recognized by the profile provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// Query-parameter value understood by the Spotify Web API.
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "short_term" => Ok(Self::ShortTerm),
            "medium_term" => Ok(Self::MediumTerm),
            "long_term" => Ok(Self::LongTerm),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown time range: {other}"
            ))),
        }
    }
}
