//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic, clippy::unwrap_used)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "sunsync-cli")]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Encode {
        #[arg(long)]
        condition: i32,
        #[arg(long, allow_hyphen_values = true)]
        high: f64,
        #[arg(long, allow_hyphen_values = true)]
        low: f64,
    },
    Decode {
        #[arg(allow_hyphen_values = true)]
        payload: String,
    },
    Category {
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },
    Seed {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        condition: i32,
        #[arg(long, allow_hyphen_values = true)]
        high: f64,
        #[arg(long, allow_hyphen_values = true)]
        low: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Simulate {
        #[arg(long, default_value = "2")]
        watches: usize,
        #[arg(long)]
        unreachable: Vec<usize>,
        #[arg(long)]
        never_connect: bool,
        #[arg(long)]
        ambient: bool,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_encode_with_negative_temperatures() {
    let cli = parse_args(&[
        "sunsync-cli",
        "encode",
        "--condition",
        "600",
        "--high",
        "-1.5",
        "--low",
        "-12",
    ])
    .unwrap();
    if let Commands::Encode {
        condition,
        high,
        low,
    } = cli.command
    {
        assert_eq!(condition, 600);
        assert!((high - -1.5).abs() < f64::EPSILON);
        assert!((low - -12.0).abs() < f64::EPSILON);
    } else {
        panic!("Expected Encode command");
    }
}

#[test]
fn cli_encode_requires_all_fields() {
    assert!(parse_args(&["sunsync-cli", "encode", "--condition", "500"]).is_err());
}

#[test]
fn cli_parses_decode_payload() {
    let cli = parse_args(&["sunsync-cli", "decode", "500::22::14"]).unwrap();
    if let Commands::Decode { payload } = cli.command {
        assert_eq!(payload, "500::22::14");
    } else {
        panic!("Expected Decode command");
    }
}

#[test]
fn cli_parses_decode_with_negative_high() {
    let cli = parse_args(&["sunsync-cli", "decode", "-5::-1::-9"]).unwrap();
    assert!(matches!(cli.command, Commands::Decode { ref payload } if payload == "-5::-1::-9"));
}

#[test]
fn cli_parses_category_code() {
    let cli = parse_args(&["sunsync-cli", "category", "761"]).unwrap();
    assert!(matches!(cli.command, Commands::Category { code: 761 }));
}

#[test]
fn cli_rejects_non_numeric_category() {
    assert!(parse_args(&["sunsync-cli", "category", "rain"]).is_err());
}

#[test]
fn cli_parses_seed_with_date() {
    let cli = parse_args(&[
        "sunsync-cli",
        "seed",
        "--location",
        "94043",
        "--condition",
        "500",
        "--high",
        "21.6",
        "--low",
        "14.2",
        "--date",
        "2026-10-19",
    ])
    .unwrap();
    if let Commands::Seed { location, date, .. } = cli.command {
        assert_eq!(location.as_deref(), Some("94043"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19));
    } else {
        panic!("Expected Seed command");
    }
}

#[test]
fn cli_seed_rejects_bad_date() {
    let result = parse_args(&[
        "sunsync-cli",
        "seed",
        "--condition",
        "500",
        "--high",
        "20",
        "--low",
        "10",
        "--date",
        "19.10.2026",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_simulate_defaults() {
    let cli = parse_args(&["sunsync-cli", "simulate"]).unwrap();
    if let Commands::Simulate {
        watches,
        unreachable,
        never_connect,
        ambient,
    } = cli.command
    {
        assert_eq!(watches, 2);
        assert!(unreachable.is_empty());
        assert!(!never_connect);
        assert!(!ambient);
    } else {
        panic!("Expected Simulate command");
    }
}

#[test]
fn cli_simulate_repeated_unreachable() {
    let cli = parse_args(&[
        "sunsync-cli",
        "simulate",
        "--watches",
        "4",
        "--unreachable",
        "1",
        "--unreachable",
        "3",
        "--never-connect",
        "--ambient",
    ])
    .unwrap();
    if let Commands::Simulate {
        watches,
        unreachable,
        never_connect,
        ambient,
    } = cli.command
    {
        assert_eq!(watches, 4);
        assert_eq!(unreachable, vec![1, 3]);
        assert!(never_connect);
        assert!(ambient);
    } else {
        panic!("Expected Simulate command");
    }
}

#[test]
fn cli_verbose_and_config_flags() {
    let args = ["sunsync-cli", "-vv", "--config", "/etc/sunsync.toml", "simulate"];
    let cli = parse_args(&args).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/sunsync.toml")));
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["sunsync-cli"]).is_err());
}
