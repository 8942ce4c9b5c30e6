// src/pacing.rs
//! Sequential download loop that keeps the fetch rate at or below playback speed.

use crate::error::AppError;
use crate::extractor::{Extractor, FetchOptions};
use crate::fetched::FetchedSet;
use crate::playlist::{Playlist, PositionedEntry};
use crate::utils::{human_time, info_line, output_template};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Timing of one downloaded item, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub media_duration_seconds: u64,
    pub elapsed_seconds: u64,
}

impl DownloadOutcome {
    pub fn delay(&self) -> u64 {
        compute_delay(self.media_duration_seconds, self.elapsed_seconds)
    }
}

/// Seconds to wait before the next download: `max(media - elapsed, 0)`
pub fn compute_delay(media_duration_seconds: u64, elapsed_seconds: u64) -> u64 {
    media_duration_seconds.saturating_sub(elapsed_seconds)
}

#[derive(Debug, Clone)]
pub struct PacerSettings {
    /// Directory the playlist items are written to
    pub destination: PathBuf,
    /// Draw a countdown bar on the terminal while waiting
    pub show_countdown: bool,
}

/// Counts reported when the run reaches its end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

enum State<'a> {
    NextItem,
    Skip(PositionedEntry<'a>),
    Downloading(PositionedEntry<'a>),
    ReportAndWait {
        position: usize,
        outcome: DownloadOutcome,
    },
    Done,
}

/// Drives one playlist from the first position to the last.
///
/// Notices go to `out`, one per line, prefixed with the tool tag.
pub struct Pacer<'a, E: ?Sized, W> {
    extractor: &'a E,
    playlist: &'a Playlist,
    fetched: &'a FetchedSet,
    settings: PacerSettings,
    out: W,
}

impl<'a, E, W> Pacer<'a, E, W>
where
    E: Extractor + ?Sized,
    W: Write,
{
    pub fn new(
        extractor: &'a E,
        playlist: &'a Playlist,
        fetched: &'a FetchedSet,
        settings: PacerSettings,
        out: W,
    ) -> Self {
        Self {
            extractor,
            playlist,
            fetched,
            settings,
            out,
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> Result<RunSummary, AppError> {
        let playlist = self.playlist;
        let mut items = playlist.positions();
        let mut summary = RunSummary::default();
        let mut state = State::NextItem;

        loop {
            state = match state {
                State::NextItem => match items.next() {
                    None => State::Done,
                    Some(item) => {
                        let title = item.entry.title_or_empty();
                        if self.fetched.is_already_fetched(&item.label, title) {
                            State::Skip(item)
                        } else {
                            State::Downloading(item)
                        }
                    }
                },
                State::Skip(item) => {
                    self.notice(&format!(
                        "Skipping item {}{}, already downloaded.",
                        item.label,
                        describe(&item)
                    ))?;
                    summary.skipped += 1;
                    State::NextItem
                }
                State::Downloading(item) => {
                    let outcome = self.download(&item).await?;
                    summary.downloaded += 1;
                    State::ReportAndWait {
                        position: item.position,
                        outcome,
                    }
                }
                State::ReportAndWait { position, outcome } => {
                    if playlist.is_last(position) {
                        debug!("Position {} is the last one, not pacing", position);
                        State::Done
                    } else {
                        self.report_and_wait(outcome).await?;
                        State::NextItem
                    }
                }
                State::Done => break,
            };
        }

        info!(
            "Playlist finished: {} downloaded, {} skipped",
            summary.downloaded, summary.skipped
        );
        Ok(summary)
    }

    async fn download(&mut self, item: &PositionedEntry<'_>) -> Result<DownloadOutcome, AppError> {
        self.notice(&format!(
            "Downloading item {}/{}{}.",
            item.label,
            self.playlist.len(),
            describe(item)
        ))?;

        let options = FetchOptions {
            output_template: output_template(&self.settings.destination, &item.label),
        };
        debug!("Fetching {} with template {}", item.entry.url, options.output_template);

        let started = Instant::now();
        let report = self.extractor.fetch_item(item.entry, &options).await?;
        let elapsed_seconds = started.elapsed().as_secs_f64().round() as u64;

        if report.duration_seconds.is_none() {
            warn!(
                "No media duration reported for item {}, not waiting after it",
                item.label
            );
        }

        Ok(DownloadOutcome {
            media_duration_seconds: report.whole_seconds(),
            elapsed_seconds,
        })
    }

    async fn report_and_wait(&mut self, outcome: DownloadOutcome) -> Result<(), AppError> {
        let delay = outcome.delay();

        writeln!(self.out)?;
        self.notice(&format!(
            "Duration of media is {}.",
            human_time(outcome.media_duration_seconds)
        ))?;
        self.notice(&format!(
            "Duration of download operation was {}.",
            human_time(outcome.elapsed_seconds)
        ))?;
        if delay > 0 {
            self.notice(&format!(
                "Waiting for {} until next download.",
                human_time(delay)
            ))?;
            self.out.flush()?;
            self.wait(delay).await;
        } else {
            self.notice("No waiting necessary.")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Sleep for exactly `seconds`, ticking the countdown once per second
    async fn wait(&self, seconds: u64) {
        let bar = if self.settings.show_countdown {
            countdown_bar(seconds)
        } else {
            ProgressBar::hidden()
        };

        let start = Instant::now();
        for tick in 1..=seconds {
            sleep_until(start + Duration::from_secs(tick)).await;
            bar.inc(1);
        }
        bar.finish_and_clear();
    }

    fn notice(&mut self, msg: &str) -> Result<(), AppError> {
        writeln!(self.out, "{}", info_line(msg))?;
        Ok(())
    }
}

fn describe(item: &PositionedEntry<'_>) -> String {
    match &item.entry.title {
        Some(title) => format!(" ({})", title),
        None => String::new(),
    }
}

fn countdown_bar(seconds: u64) -> ProgressBar {
    let bar = ProgressBar::new(seconds);
    match ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}s") {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("Invalid countdown template: {}", e),
    }
    bar
}
