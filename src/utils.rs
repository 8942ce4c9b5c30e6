// src/utils.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Prefix of every progress notice written to stdout
pub const INFO_TAG: &str = "<nothrottling-dl>";

static UNSAFE_PATH_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\\x00]").unwrap());

/// Format a number of seconds as `SSs`, `MMm:SSs` or `HHh:MMm:SSs`.
///
/// Minutes appear from 60 seconds on, hours from 3600 seconds on. Every
/// field is zero padded to two digits; hours keep counting past a day.
pub fn human_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if seconds >= 3600 {
        format!("{:02}h:{:02}m:{:02}s", hours, minutes, secs)
    } else if seconds >= 60 {
        format!("{:02}m:{:02}s", minutes, secs)
    } else {
        format!("{:02}s", secs)
    }
}

/// Format a progress notice with the tool's tag
pub fn info_line(msg: &str) -> String {
    format!("{} {}", INFO_TAG, msg)
}

/// Make a playlist title usable as a single directory name
pub fn sanitize_dir_name(title: &str) -> String {
    let cleaned = UNSAFE_PATH_CHARS.replace_all(title.trim(), "_");
    match cleaned.as_ref() {
        "" | "." | ".." => "playlist".to_string(),
        _ => cleaned.into_owned(),
    }
}

/// Directory all items of the playlist are written to
pub fn destination_dir<P: AsRef<Path>>(base: P, playlist_title: &str) -> PathBuf {
    base.as_ref().join(sanitize_dir_name(playlist_title))
}

/// Escape literal text for use inside a yt-dlp output template
pub fn escape_template(text: &str) -> String {
    text.replace('%', "%%")
}

/// Build the yt-dlp output template for one playlist item.
///
/// The collaborator fills in the media title and picks the extension.
pub fn output_template(destination: &Path, label: &str) -> String {
    let dir = escape_template(&destination.to_string_lossy());
    let name = format!("{} %(title)s.%(ext)s", escape_template(label));
    if dir.is_empty() {
        return name;
    }
    if dir.ends_with(std::path::MAIN_SEPARATOR) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, std::path::MAIN_SEPARATOR, name)
    }
}
