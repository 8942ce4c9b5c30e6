// tests/common/mod.rs
// Scripted extractor shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use nothrottling_dl::error::AppError;
use nothrottling_dl::extractor::{EntryRef, Extractor, FetchOptions, ItemReport, PlaylistMetadata};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// How the mock answers `resolve_playlist`
pub enum Listing {
    Playlist(PlaylistMetadata),
    NotFound,
    SingleItem,
}

/// Behaviour of one item fetch
#[derive(Clone, Copy)]
pub struct Script {
    pub fetch_seconds: u64,
    pub media_seconds: Option<f64>,
    pub fail: bool,
}

impl Script {
    pub fn ok(fetch_seconds: u64, media_seconds: u64) -> Self {
        Self {
            fetch_seconds,
            media_seconds: Some(media_seconds as f64),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fetch_seconds: 1,
            media_seconds: None,
            fail: true,
        }
    }
}

pub struct MockExtractor {
    listing: Listing,
    scripts: HashMap<String, Script>,
    pub fetches: Mutex<Vec<(String, String)>>,
}

impl MockExtractor {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            scripts: HashMap::new(),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_script(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    /// URLs passed to `fetch_item`, in call order
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn templates(&self) -> Vec<String> {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .map(|(_, template)| template.clone())
            .collect()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn resolve_playlist(&self, url: &str) -> Result<PlaylistMetadata, AppError> {
        match &self.listing {
            Listing::Playlist(metadata) => Ok(metadata.clone()),
            Listing::NotFound => Err(AppError::ResourceNotFound(url.to_string())),
            Listing::SingleItem => Err(AppError::NotAPlaylist(url.to_string())),
        }
    }

    async fn fetch_item(
        &self,
        entry: &EntryRef,
        options: &FetchOptions,
    ) -> Result<ItemReport, AppError> {
        self.fetches
            .lock()
            .unwrap()
            .push((entry.url.clone(), options.output_template.clone()));

        let script = self
            .scripts
            .get(&entry.url)
            .copied()
            .unwrap_or_else(|| Script::ok(0, 0));
        tokio::time::sleep(Duration::from_secs(script.fetch_seconds)).await;

        if script.fail {
            return Err(AppError::DownloadOperation(format!("scripted failure for {}", entry.url)));
        }
        Ok(ItemReport {
            duration_seconds: script.media_seconds,
            title: entry.title.clone(),
        })
    }
}

/// Playlist metadata with urls `u1..uN` and the given titles
pub fn metadata(title: &str, titles: &[Option<&str>]) -> PlaylistMetadata {
    PlaylistMetadata {
        title: title.to_string(),
        entries: titles
            .iter()
            .enumerate()
            .map(|(i, t)| EntryRef::new(format!("u{}", i + 1), t.map(str::to_string)))
            .collect(),
    }
}
