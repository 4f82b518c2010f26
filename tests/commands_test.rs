//! Integration tests for tezz CLI commands
//!
//! These tests run the same pipeline as main.rs (module snapshot, view
//! model, formatter) against fixture data and check the rendered output.

mod common;

use chrono::NaiveDate;
use clap::Parser;
use common::{sample_modules_json, utc};
use serde_json::Value;
use tezz::cli::{Cli, Command, ScheduleArgs};
use tezz::commands::{load_diary, load_schedule};
use tezz::output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
use tezz::timezone::TimezoneConfig;
use tezz::{Granularity, Module};

fn sample_modules() -> Vec<Module> {
    serde_json::from_value(sample_modules_json()).unwrap()
}

fn schedule_args(cli: &Cli) -> ScheduleArgs {
    match &cli.command {
        Command::Schedule(args) => args.clone(),
        other => panic!("Expected Schedule command, got {other:?}"),
    }
}

#[tokio::test]
async fn test_schedule_command_table() {
    let cli = Cli::parse_from(["tezz", "schedule", "--date", "2024-03-13", "-z", "Asia/Bishkek"]);
    let tz = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc).unwrap();
    let now = utc(2024, 3, 13, 2, 30);

    let view = load_schedule(&sample_modules(), &schedule_args(&cli), &tz, now)
        .await
        .unwrap();
    let output = TableFormatter::new(false).format_schedule(&view, &tz.tz);

    assert!(output.contains("Wed 2024-03-13 (today)"));
    assert!(output.contains("08:00-08:45"));
    assert!(output.contains("Matrices"));
    assert!(output.contains("ongoing"));
    assert!(output.contains("Total: 4  Upcoming: 2  Ongoing: 1  Passed: 1"));
    assert!(!output.contains("Reading list"));
}

#[tokio::test]
async fn test_schedule_command_json() {
    let cli = Cli::parse_from([
        "tezz", "--json", "schedule", "--view", "day", "--date", "2024-03-12", "--shift", "1",
        "--utc",
    ]);
    assert!(cli.json);
    let tz = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc).unwrap();
    assert!(tz.is_utc());

    let view = load_schedule(
        &sample_modules(),
        &schedule_args(&cli),
        &tz,
        utc(2024, 3, 20, 0, 0),
    )
    .await
    .unwrap();
    let output = get_formatter(cli.json).format_schedule(&view, &tz.tz);
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["reference"], "2024-03-13");
    assert_eq!(parsed["granularity"], "day");
    assert_eq!(parsed["window"]["kind"], "day");
    let lessons = parsed["days"][0]["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["title"], "Matrices");
    assert_eq!(lessons[0]["status"], "passed");
}

#[tokio::test]
async fn test_diary_command() {
    let modules = sample_modules();
    let (report, modules) = load_diary(&modules).await.unwrap();

    let table = TableFormatter::new(false).format_diary(&report, &modules, &chrono_tz::UTC);
    assert!(table.contains("Rust"));
    assert!(table.contains("Algebra"));
    assert!(table.contains("OVERALL"));
    assert!(table.contains("3/6"));
    assert!(table.contains("Reading list"));

    let json = JsonFormatter.format_diary(&report, &modules, &chrono_tz::UTC);
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["overall"]["average"], 80.0);
    assert_eq!(parsed["overall"]["completion_percent"], 50);
    assert_eq!(parsed["modules"][2]["stats"]["total_count"], 0);
}

#[test]
fn test_modules_command() {
    let modules = sample_modules();

    let table = TableFormatter::new(false).format_modules(&modules);
    assert!(table.contains("Systems programming") || table.contains("Rust"));
    assert!(table.contains("2/4"));

    let parsed: Value = serde_json::from_str(&JsonFormatter.format_modules(&modules)).unwrap();
    assert_eq!(parsed["modules"][0]["lesson_count"], 4);
    assert_eq!(parsed["modules"][1]["stats"]["highest_mark"], 100.0);
}

#[test]
fn test_module_command_shows_unscheduled_lessons() {
    let modules = sample_modules();
    let output = TableFormatter::new(false).format_module(&modules[0], &chrono_tz::Asia::Bishkek);

    assert!(output.contains("Rust"));
    assert!(output.contains("Reading list"));
    assert!(output.contains("2024-03-11 09:00"));
    assert!(output.contains("Progress: 50%"));
}

#[test]
fn test_invalid_timezone_is_rejected() {
    let cli = Cli::parse_from(["tezz", "-z", "Mars/Olympus", "diary"]);
    assert!(TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc).is_err());

    let cli = Cli::parse_from(["tezz", "-z", "Mars/Olympus", "--utc", "diary"]);
    let tz = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc).unwrap();
    assert!(tz.is_utc());
    assert_eq!(
        tz.today(&utc(2024, 3, 13, 23, 0)),
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    );

    let granularity: Granularity = "Month".parse().unwrap();
    assert_eq!(granularity, Granularity::Month);
}
