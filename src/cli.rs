// src/cli.rs

use crate::ytdlp::DEFAULT_BINARY;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Build the command-line interface for the application
pub fn build_cli() -> Command {
    Command::new("nothrottling-dl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Download media playlist contents, employing draconian anti-throttling measures.")
        .arg(
            Arg::new("url")
                .help("Playlist url")
                .value_name("URL")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Directory the playlist folder is created in")
                .value_name("DIRECTORY")
                .default_value("."),
        )
        .arg(
            Arg::new("yt-dlp")
                .long("yt-dlp")
                .help("Path to the yt-dlp executable")
                .value_name("PATH")
                .env("NOTHROTTLING_YTDLP")
                .default_value(DEFAULT_BINARY),
        )
        .arg(
            Arg::new("no-netrc")
                .long("no-netrc")
                .help("Do not let yt-dlp read credentials from .netrc")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-countdown")
                .long("no-countdown")
                .help("Do not draw a countdown bar while waiting between downloads")
                .action(ArgAction::SetTrue),
        )
}

/// Options of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    pub output_dir: PathBuf,
    pub ytdlp_binary: String,
    pub use_netrc: bool,
    pub show_countdown: bool,
}

impl RunConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
        Self {
            url: get("url"),
            output_dir: PathBuf::from(get("output-dir")),
            ytdlp_binary: get("yt-dlp"),
            use_netrc: !matches.get_flag("no-netrc"),
            show_countdown: !matches.get_flag("no-countdown"),
        }
    }
}
