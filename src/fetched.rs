// src/fetched.rs

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Suffixes yt-dlp gives files that are still being written
const PARTIAL_SUFFIXES: [&str; 2] = [".part", ".ytdl"];
/// Marker inside fragment files of an unfinished download
const FRAGMENT_MARKER: &str = ".part-Frag";

/// Names found in the destination directory before the run started
#[derive(Debug, Clone, Default)]
pub struct FetchedSet {
    names: Vec<String>,
}

impl FetchedSet {
    /// List the direct children of `dir` once.
    ///
    /// A missing directory means nothing has been fetched yet.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        if !dir.is_dir() {
            debug!("Destination {:?} does not exist yet", dir);
            return Ok(Self::default());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        debug!("Found {} existing files in {:?}", names.len(), dir);
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// An item is fetched when some file matches it and none of the matches
    /// is an unfinished download.
    pub fn is_already_fetched(&self, label: &str, title: &str) -> bool {
        let label_prefix = format!("{} ", label);
        let on_disk_title = filename_title(title);
        let matches = self.names.iter().filter(|name| {
            if title.is_empty() {
                name.starts_with(&label_prefix)
            } else {
                name.contains(title)
                    || (!on_disk_title.is_empty() && name.contains(on_disk_title.as_str()))
            }
        });

        let mut found = false;
        for name in matches {
            if is_partial(name) {
                return false;
            }
            found = true;
        }
        found
    }
}

/// Title as yt-dlp writes it into `%(title)s`.
///
/// Characters that are not portable in file names become their full-width
/// look-alikes, newlines become spaces and other control characters are dropped.
pub fn filename_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            '/' => Some('\u{29F8}'),
            '\\' => Some('\u{29F9}'),
            '"' | '*' | ':' | '<' | '>' | '?' | '|' => char::from_u32(c as u32 + 0xFEE0),
            '\n' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Whether a file name marks an unfinished download
pub fn is_partial(name: &str) -> bool {
    PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) || name.contains(FRAGMENT_MARKER)
}
