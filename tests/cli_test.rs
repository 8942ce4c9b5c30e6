// tests/cli_test.rs
use nothrottling_dl::cli::{build_cli, RunConfig};
use std::path::PathBuf;

#[test]
fn test_cli_basic_structure() {
    let app = build_cli();
    assert_eq!(app.get_name(), "nothrottling-dl");

    let matches = app
        .try_get_matches_from(vec!["nothrottling-dl", "https://example.com/list"])
        .unwrap();
    let config = RunConfig::from_matches(&matches);

    assert_eq!(config.url, "https://example.com/list");
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert!(config.use_netrc);
    assert!(config.show_countdown);
}

#[test]
fn test_cli_options() {
    let matches = build_cli()
        .try_get_matches_from(vec![
            "nothrottling-dl",
            "https://example.com/list",
            "--output-dir",
            "/tmp/media",
            "--yt-dlp",
            "/opt/yt-dlp",
            "--no-netrc",
            "--no-countdown",
        ])
        .unwrap();
    let config = RunConfig::from_matches(&matches);

    assert_eq!(config.output_dir, PathBuf::from("/tmp/media"));
    assert_eq!(config.ytdlp_binary, "/opt/yt-dlp");
    assert!(!config.use_netrc);
    assert!(!config.show_countdown);
}

#[test]
fn test_cli_required_arguments() {
    let result = build_cli().try_get_matches_from(vec!["nothrottling-dl"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_invalid_arguments() {
    let result = build_cli().try_get_matches_from(vec![
        "nothrottling-dl",
        "https://example.com/list",
        "--quality",
        "720",
    ]);
    assert!(result.is_err());
}
