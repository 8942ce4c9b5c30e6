// src/main.rs

use colored::*;
use env_logger::Builder;
use log::{debug, error, info, LevelFilter};
use nothrottling_dl::cli::{build_cli, RunConfig};
use nothrottling_dl::{download_playlist, run_until_interrupted};
use nothrottling_dl::error::AppError;
use nothrottling_dl::ytdlp::YtDlp;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logger();
    info!("nothrottling-dl starting up - version {}", env!("CARGO_PKG_VERSION"));

    let matches = build_cli().get_matches();
    let config = RunConfig::from_matches(&matches);
    debug!("Run configuration: {:?}", config);

    let ytdlp = YtDlp::new(config.ytdlp_binary.as_str()).with_netrc(config.use_netrc);

    // Dropping the download future kills yt-dlp, which leaves its .part file behind
    let result = run_until_interrupted(
        download_playlist(
            &ytdlp,
            &config.url,
            &config.output_dir,
            config.show_countdown,
            io::stdout(),
        ),
        interrupted(),
    )
    .await;

    match result {
        Ok(summary) => {
            info!(
                "Done: {} downloaded, {} already present",
                summary.downloaded, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !matches!(e, AppError::UserAborted) {
                error!("Run failed: {}", e);
            }
            let _ = io::stdout().flush();
            eprintln!("\n{} {}", "Error:".red().bold(), e.user_message());
            ExitCode::from(1)
        }
    }
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Initialize the logger with a custom format and configuration
fn init_logger() {
    let mut builder = Builder::from_default_env();

    // Notices on stdout are the user interface, keep stderr quiet in release builds
    if cfg!(debug_assertions) {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }

    // Define a custom format with timestamp, level, module, and message
    builder.format(|buf, record| {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        writeln!(
            buf,
            "[{} {} {}] {}",
            timestamp,
            record.level().to_string().to_uppercase(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    // Allow override through RUST_LOG environment variable
    builder.parse_env("RUST_LOG");

    builder.init();
}
