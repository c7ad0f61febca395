//! Tests for the remaining subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_completions() {
    match parse(&["vcrawl", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["vcrawl", "man"]), CliCommand::Man));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["vcrawl", "frobnicate"]).is_err());
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["vcrawl"]).is_err());
}
