//! `statclean` command line
//!
//! Subcommands render to a `String`; the binary only prints.

use crate::config::{DemoConfig, LatencyConfig};
use crate::render::{render_log, ConsoleRenderer};
use crate::session::DemoSession;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use statclean_workflow::fixtures::{demo_survey, regional_weights};
use statclean_workflow::FileFormat;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

fn json_flag(help: &'static str) -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help(help)
}

#[must_use]
pub fn command() -> Command {
    Command::new("statclean")
        .version(statclean_workflow::VERSION)
        .about("StatClean guided survey-cleaning demo")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .arg(
            Arg::new("fast")
                .long("fast")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Skip simulated processing delays"),
        )
        .subcommand(
            Command::new("demo")
                .about("Walk through all six workflow steps")
                .arg(json_flag("Print the walkthrough result as JSON")),
        )
        .subcommand(
            Command::new("check-file")
                .about("Check whether a file name would be accepted for upload")
                .arg(Arg::new("name").required(true).help("File name to check")),
        )
        .subcommand(
            Command::new("fixture")
                .about("Show the built-in demo survey")
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .default_value("5")
                        .value_parser(value_parser!(usize))
                        .help("Number of records to preview"),
                )
                .arg(json_flag("Output as JSON")),
        )
        .subcommand(
            Command::new("summary")
                .about("Run an instant walkthrough and print the session summary")
                .arg(json_flag("Output as JSON")),
        )
}

/// Config file (if any) plus environment overrides; `--fast` zeroes latency.
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<DemoConfig> {
    let path = matches.get_one::<PathBuf>("config");
    let mut config = DemoConfig::load(path.map(PathBuf::as_path)).with_context(|| match path {
        Some(path) => format!("loading config from {}", path.display()),
        None => "loading config from environment".to_string(),
    })?;
    if matches.get_flag("fast") {
        config.latency = LatencyConfig::instant();
    }
    Ok(config)
}

/// Dispatch a parsed command line and return what should be printed.
pub async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("demo", args)) => {
            let config = load_config(args)?;
            demo_output(&config, args.get_flag("json")).await
        }
        Some(("check-file", args)) => {
            let name = args
                .get_one::<String>("name")
                .context("missing file name")?;
            check_file_line(name)
        }
        Some(("fixture", args)) => {
            let rows = args.get_one::<usize>("rows").copied().unwrap_or(5);
            fixture_output(rows, args.get_flag("json"))
        }
        Some(("summary", args)) => {
            let config = load_config(args)?;
            summary_output(&config, args.get_flag("json")).await
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("no subcommand given"),
    }
}

pub fn check_file_line(name: &str) -> anyhow::Result<String> {
    let format = FileFormat::detect(name).with_context(|| format!("{name} cannot be uploaded"))?;
    Ok(format!("{name}: accepted as {}", format.extension()))
}

/// Demo survey overview with the first `rows` records (clamped to the survey)
pub fn fixture_output(rows: usize, json: bool) -> anyhow::Result<String> {
    let survey = demo_survey();
    if json {
        let body = serde_json::json!({
            "name": survey.name,
            "records": survey.record_count(),
            "fields": survey.field_count(),
            "missing_values": survey.missing_values(),
            "preview": survey.preview(rows),
            "regional_weights": regional_weights(),
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{}: {} records, {} fields, {} missing values",
        survey.name,
        survey.record_count(),
        survey.field_count(),
        survey.missing_values()
    )?;
    writeln!(out, "{}", survey.schema.keys().cloned().collect::<Vec<_>>().join(", "))?;
    for record in survey.preview(rows) {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(out)
}

pub async fn demo_output(config: &DemoConfig, json: bool) -> anyhow::Result<String> {
    let session = DemoSession::new(config);
    if !json {
        session.workflow().subscribe(Arc::new(ConsoleRenderer::new()));
    }

    let report = session.run_walkthrough().await.context("demo walkthrough")?;
    session
        .workflow()
        .verify_integrity()
        .context("activity log failed verification")?;

    if json {
        let body = serde_json::json!({
            "session": session.workflow().session_id(),
            "report": report,
            "activity_log": session.workflow().activity_log(),
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = String::new();
    for outcome in &report.outcomes {
        writeln!(out, "  {:<18} {}", outcome.task.to_string(), outcome.message)?;
    }
    writeln!(
        out,
        "Completed at step {} with {} log entries, data quality {}",
        report.summary.current_step, report.summary.entries, report.quality_label
    )?;
    Ok(out)
}

/// Session summary after an instant walkthrough, whatever the configured latency
pub async fn summary_output(config: &DemoConfig, json: bool) -> anyhow::Result<String> {
    let config = config.clone().with_latency(LatencyConfig::instant());
    let session = DemoSession::new(&config);
    let report = session.run_walkthrough().await.context("summary walkthrough")?;

    if json {
        return Ok(serde_json::to_string_pretty(&report.summary)?);
    }

    let summary = &report.summary;
    let mut out = String::new();
    writeln!(out, "step:               {}", summary.current_step)?;
    writeln!(out, "entries:            {}", summary.entries)?;
    writeln!(out, "data upload:        {}", summary.features.data_upload)?;
    writeln!(out, "cleaning:           {}", summary.features.cleaning)?;
    writeln!(out, "survey weights:     {}", summary.features.survey_weights)?;
    writeln!(out, "report generation:  {}", summary.features.report_generation)?;
    writeln!(out, "data quality:       {}%", summary.data_quality)?;
    for line in render_log(&session.workflow().activity_log()) {
        writeln!(out, "  {line}")?;
    }
    Ok(out)
}
