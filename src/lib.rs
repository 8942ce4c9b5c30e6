// src/lib.rs
// Expose the playlist downloader as a library, the binary is a thin wrapper

pub mod cli;
pub mod error;
pub mod extractor;
pub mod fetched;
pub mod pacing;
pub mod playlist;
pub mod utils;
pub mod ytdlp;

use crate::error::AppError;
use crate::extractor::Extractor;
use crate::fetched::FetchedSet;
use crate::pacing::{Pacer, PacerSettings, RunSummary};
use crate::playlist::Playlist;
use crate::utils::destination_dir;
use log::{debug, info};
use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// How long a failed run waits for an interrupt that may have caused it
pub const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// Download every item of the playlist at `url` into a folder under `output_dir`.
///
/// Items already present are skipped; between downloads the run waits so
/// that fetching never outpaces playback. Notices are written to `out`.
pub async fn download_playlist<E, W>(
    extractor: &E,
    url: &str,
    output_dir: &Path,
    show_countdown: bool,
    out: W,
) -> Result<RunSummary, AppError>
where
    E: Extractor + ?Sized,
    W: Write,
{
    let playlist = Playlist::open(extractor, url).await?;
    let destination = destination_dir(output_dir, playlist.title());
    info!(
        "Downloading '{}' ({} items) into {:?}",
        playlist.title(),
        playlist.len(),
        destination
    );

    let fetched = FetchedSet::scan(&destination)?;
    let settings = PacerSettings {
        destination,
        show_countdown,
    };

    let mut pacer = Pacer::new(extractor, &playlist, &fetched, settings, out);
    pacer.run().await
}

/// Race `work` against `interrupt`; an interrupt wins as `UserAborted`.
///
/// Ctrl+C reaches the yt-dlp child too, so a download can fail just before
/// the interrupt is seen. A failure is therefore held back for
/// `INTERRUPT_GRACE` and reported as `UserAborted` if the interrupt arrives.
pub async fn run_until_interrupted<T, F, I>(work: F, interrupt: I) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    let finished = tokio::select! {
        biased;
        _ = &mut interrupt => None,
        result = work => Some(result),
    };

    match finished {
        None => Err(AppError::UserAborted),
        Some(Err(e)) if !matches!(e, AppError::UserAborted) => {
            match tokio::time::timeout(INTERRUPT_GRACE, &mut interrupt).await {
                Ok(()) => {
                    debug!("Run failed while being interrupted: {}", e);
                    Err(AppError::UserAborted)
                }
                Err(_) => Err(e),
            }
        }
        Some(result) => result,
    }
}
