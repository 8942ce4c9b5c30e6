// src/extractor.rs
//! The seam between the pacing logic and whatever actually talks to media hosts.

use crate::error::AppError;
use async_trait::async_trait;

/// Reference to one playlist item, as returned by the shallow listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub url: String,
    /// Title, when the listing already knows it
    pub title: Option<String>,
}

impl EntryRef {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title: title.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Title or an empty string when unknown
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Playlist-level metadata, obtained once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMetadata {
    pub title: String,
    pub entries: Vec<EntryRef>,
}

/// Configuration handed to the collaborator for a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub output_template: String,
}

/// What the collaborator reports after fetching one item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemReport {
    /// Playback length of the media, in seconds
    pub duration_seconds: Option<f64>,
    pub title: Option<String>,
}

impl ItemReport {
    /// Media duration truncated to whole seconds; unknown or invalid counts as zero
    pub fn whole_seconds(&self) -> u64 {
        match self.duration_seconds {
            Some(d) if d.is_finite() && d > 0.0 => d as u64,
            _ => 0,
        }
    }
}

/// Media extraction collaborator
#[async_trait]
pub trait Extractor {
    /// Shallow listing of a playlist; must not extract every item up front.
    ///
    /// Fails with `ResourceNotFound` when the URL cannot be resolved and
    /// with `NotAPlaylist` when it resolves to a single item.
    async fn resolve_playlist(&self, url: &str) -> Result<PlaylistMetadata, AppError>;

    /// Download one item and report its media duration.
    async fn fetch_item(
        &self,
        entry: &EntryRef,
        options: &FetchOptions,
    ) -> Result<ItemReport, AppError>;
}
