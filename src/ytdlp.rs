// src/ytdlp.rs
//! `Extractor` backed by the yt-dlp executable.

use crate::error::AppError;
use crate::extractor::{EntryRef, Extractor, FetchOptions, ItemReport, PlaylistMetadata};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io;
use std::process::Stdio;
use tokio::process::Command as AsyncCommand;

pub const DEFAULT_BINARY: &str = "yt-dlp";

#[derive(Debug, Deserialize)]
struct ListingJson {
    title: Option<String>,
    id: Option<String>,
    entries: Option<Vec<ListingEntryJson>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingEntryJson {
    url: Option<String>,
    webpage_url: Option<String>,
    id: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemJson {
    duration: Option<f64>,
    title: Option<String>,
}

/// yt-dlp subprocess collaborator
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    use_netrc: bool,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl YtDlp {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            use_netrc: true,
        }
    }

    /// Whether yt-dlp reads credentials from `~/.netrc`
    pub fn with_netrc(mut self, use_netrc: bool) -> Self {
        self.use_netrc = use_netrc;
        self
    }

    /// Arguments for the shallow playlist listing
    pub fn listing_args(&self, url: &str) -> Vec<String> {
        let mut args = vec![
            "--flat-playlist".to_string(),
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
        ];
        if self.use_netrc {
            args.push("--netrc".to_string());
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    /// Arguments for downloading one item while printing its metadata as JSON
    pub fn fetch_args(&self, url: &str, output_template: &str) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".to_string(),
            "--dump-json".to_string(),
            "--no-simulate".to_string(),
            "--progress".to_string(),
            "--newline".to_string(),
        ];
        if self.use_netrc {
            args.push("--netrc".to_string());
        }
        args.push("-o".to_string());
        args.push(output_template.to_string());
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    fn command(&self, args: &[String]) -> AsyncCommand {
        let mut command = AsyncCommand::new(&self.binary);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);
        command
    }

    fn spawn_error(&self, e: io::Error) -> AppError {
        match e.kind() {
            io::ErrorKind::NotFound => AppError::MissingDependency(self.binary.clone()),
            _ => AppError::IoError(e),
        }
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn resolve_playlist(&self, url: &str) -> Result<PlaylistMetadata, AppError> {
        let args = self.listing_args(url);
        debug!("Running {} {:?}", self.binary, args);

        let output = self
            .command(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Playlist listing failed: {}", last_error_line(&stderr));
            return Err(AppError::ResourceNotFound(url.to_string()));
        }

        parse_listing(url, &output.stdout)
    }

    async fn fetch_item(
        &self,
        entry: &EntryRef,
        options: &FetchOptions,
    ) -> Result<ItemReport, AppError> {
        let args = self.fetch_args(&entry.url, &options.output_template);
        debug!("Running {} {:?}", self.binary, args);

        // stderr carries the progress lines, let the terminal show them
        let output = self
            .command(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(AppError::DownloadOperation(format!(
                "{} exited with {} for {}",
                self.binary, output.status, entry.url
            )));
        }

        // Without the item's metadata there is no duration to pace by
        let report = parse_item_report(&output.stdout).map_err(|e| {
            AppError::DownloadOperation(format!("unreadable metadata for {}: {}", entry.url, e))
        })?;
        info!(
            "Fetched {} ({:?} seconds)",
            report.title.as_deref().unwrap_or(&entry.url),
            report.duration_seconds
        );
        Ok(report)
    }
}

/// Turn the `--dump-single-json` output of a flat listing into playlist metadata
pub fn parse_listing(url: &str, stdout: &[u8]) -> Result<PlaylistMetadata, AppError> {
    let listing: ListingJson = serde_json::from_slice(stdout)?;

    let entries = listing
        .entries
        .ok_or_else(|| AppError::NotAPlaylist(url.to_string()))?;

    let mut refs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let target = entry
            .url
            .or(entry.webpage_url)
            .or(entry.id)
            .ok_or_else(|| {
                warn!("Playlist entry {} has no url", index + 1);
                AppError::ResourceNotFound(url.to_string())
            })?;
        refs.push(EntryRef::new(target, entry.title));
    }

    let title = listing
        .title
        .filter(|t| !t.trim().is_empty())
        .or(listing.id)
        .unwrap_or_else(|| "playlist".to_string());

    Ok(PlaylistMetadata {
        title,
        entries: refs,
    })
}

/// Read the JSON line yt-dlp prints for a downloaded item
pub fn parse_item_report(stdout: &[u8]) -> Result<ItemReport, AppError> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .unwrap_or("");
    let item: ItemJson = serde_json::from_str(line)?;
    Ok(ItemReport {
        duration_seconds: item.duration,
        title: item.title,
    })
}

/// Last `ERROR:` line of yt-dlp's stderr, or the trimmed output
fn last_error_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with("ERROR:"))
        .map(|l| l.trim_start().trim_start_matches("ERROR:").trim())
        .unwrap_or_else(|| stderr.trim())
}
