// src/playlist.rs

use crate::error::AppError;
use crate::extractor::{EntryRef, Extractor, PlaylistMetadata};
use log::{debug, info};

/// One playlist item together with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedEntry<'a> {
    pub position: usize,
    /// `position`, zero padded to the width of the largest position
    pub label: String,
    pub entry: &'a EntryRef,
}

/// Ordered playlist with position labelling
#[derive(Debug, Clone)]
pub struct Playlist {
    title: String,
    entries: Vec<EntryRef>,
    digit_width: usize,
}

impl Playlist {
    /// Resolve `url` through the collaborator's shallow listing mode
    pub async fn open<E>(extractor: &E, url: &str) -> Result<Self, AppError>
    where
        E: Extractor + ?Sized,
    {
        info!("Resolving playlist: {}", url);
        let metadata = extractor.resolve_playlist(url).await?;
        let playlist = Self::from_metadata(metadata);
        debug!(
            "Playlist '{}' has {} entries (label width {})",
            playlist.title,
            playlist.len(),
            playlist.digit_width
        );
        Ok(playlist)
    }

    pub fn from_metadata(metadata: PlaylistMetadata) -> Self {
        let digit_width = digit_width(metadata.entries.len());
        Self {
            title: metadata.title,
            entries: metadata.entries,
            digit_width,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn digit_width(&self) -> usize {
        self.digit_width
    }

    /// Zero-padded label for a position
    pub fn label(&self, position: usize) -> String {
        format!("{:0width$}", position, width = self.digit_width)
    }

    /// Whether `position` is the final one of the playlist
    pub fn is_last(&self, position: usize) -> bool {
        position == self.entries.len()
    }

    /// Lazily pair each entry with its position; every call starts over
    pub fn positions(&self) -> impl Iterator<Item = PositionedEntry<'_>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(move |(index, entry)| PositionedEntry {
                position: index + 1,
                label: self.label(index + 1),
                entry,
            })
    }
}

/// Number of decimal digits of `length` (at least one)
pub fn digit_width(length: usize) -> usize {
    length.to_string().len()
}
