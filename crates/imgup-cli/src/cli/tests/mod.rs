//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_args_uses_samples() {
    let cli = parse(&["imgup"]);
    assert!(cli.input_file.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_input_file() {
    let cli = parse(&["imgup", "--input-file", "/tmp/urls.txt"]);
    assert_eq!(cli.input_file.as_deref(), Some(Path::new("/tmp/urls.txt")));
}

#[test]
fn cli_parse_input_file_equals_form() {
    let cli = parse(&["imgup", "--input-file=urls.txt"]);
    assert_eq!(cli.input_file.as_deref(), Some(Path::new("urls.txt")));
}

#[test]
fn cli_parse_config() {
    let cli = parse(&["imgup", "--config", "alt.toml", "--input-file", "u.txt"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("alt.toml")));
    assert_eq!(cli.input_file.as_deref(), Some(Path::new("u.txt")));
}

#[test]
fn cli_rejects_positional_and_unknown_flags() {
    assert!(Cli::try_parse_from(["imgup", "https://example.com/a.jpg"]).is_err());
    assert!(Cli::try_parse_from(["imgup", "--model", "x"]).is_err());
}

#[test]
fn cli_input_file_requires_value() {
    assert!(Cli::try_parse_from(["imgup", "--input-file"]).is_err());
}
