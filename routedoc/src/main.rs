//! # routedoc
//!
//! A CLI for documenting a web application's routes.
//!
//! ## Overview
//!
//! routedoc is built on top of routedoclib. It reads the route table dumped by
//! the host framework (JSON) and either renders the routes report or attaches
//! each route to the documentation registry dumped by the host doc tool.
//!
//! ## Usage
//!
//! ```bash
//! # Print the routes report
//! routedoc report routes.json
//!
//! # Write it as a Markdown table, only for one controller
//! routedoc report routes.json -o ROUTES.md --style markdown -c Admin::UsersController
//!
//! # Annotate a registry and print a summary
//! routedoc annotate routes.json registry.json -o registry.annotated.json
//! ```
//!
//! Logs go to stderr; `-v` raises verbosity, `RUST_LOG` overrides it.

mod render;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use routedoclib::{
    annotate, render_report, write_report, DocRegistry, ReportOptions, RouteFilter, RouteTable,
    TableStyle,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use render::{render_summary, SummaryFormat};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("routedoc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Route reports and route annotations for documentation registries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("report")
                .about("Render the routes report")
                .arg(
                    Arg::new("routes")
                        .required(true)
                        .help("Route table dump (JSON)"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the report to this file instead of stdout"),
                )
                .arg(
                    Arg::new("style")
                        .short('s')
                        .long("style")
                        .value_parser(["plain", "markdown"])
                        .default_value("plain")
                        .help("Table style"),
                )
                .arg(
                    Arg::new("controller")
                        .short('c')
                        .long("controller")
                        .help("Only routes into this controller (class name or path)"),
                )
                .arg(
                    Arg::new("grep")
                        .short('g')
                        .long("grep")
                        .help("Only routes with a column matching this regex"),
                )
                .arg(
                    Arg::new("help-url")
                        .long("help-url")
                        .help("URL shown when no routes are found"),
                ),
        )
        .subcommand(
            Command::new("annotate")
                .about("Attach routes to controller and action documentation nodes")
                .arg(
                    Arg::new("routes")
                        .required(true)
                        .help("Route table dump (JSON)"),
                )
                .arg(
                    Arg::new("registry")
                        .required(true)
                        .help("Documentation registry dump (JSON array of nodes)"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the annotated registry here and print a summary"),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .help("Summary format (with --output)"),
                ),
        )
}

/// Initialize logging to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build report options from matches
fn build_report_options(matches: &ArgMatches) -> Result<ReportOptions, anyhow::Error> {
    let mut filter = RouteFilter::new();

    if let Some(controller) = matches.get_one::<String>("controller") {
        filter = filter.controller(controller);
    }

    if let Some(pattern) = matches.get_one::<String>("grep") {
        filter = filter.grep(pattern)?;
    }

    let style = matches
        .get_one::<String>("style")
        .map(|s| s.parse::<TableStyle>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let mut options = ReportOptions::new().style(style).filter(filter);
    if let Some(url) = matches.get_one::<String>("help-url") {
        options = options.help_url(url.as_str());
    }

    Ok(options)
}

/// Handler for report command
fn report_handler(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let routes = matches
        .get_one::<String>("routes")
        .context("missing route table argument")?;
    let table = RouteTable::from_path(routes)?;
    let options = build_report_options(matches)?;

    match matches.get_one::<String>("output") {
        Some(output) => write_report(output, &table, &options)?,
        None => print!("{}", render_report(&table, &options)),
    }

    Ok(())
}

/// Handler for annotate command
fn annotate_handler(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let routes = matches
        .get_one::<String>("routes")
        .context("missing route table argument")?;
    let registry_path = matches
        .get_one::<String>("registry")
        .context("missing registry argument")?;

    let table = RouteTable::from_path(routes)?;
    let mut registry = DocRegistry::from_path(registry_path)?;

    let summary = annotate(table.all_routes(), &mut registry);
    info!(
        routes = summary.routes,
        attached = summary.attached.len(),
        missed = summary.missed.len(),
        "annotated registry"
    );

    let json = registry
        .to_json_pretty()
        .context("failed to serialize registry")?;

    match matches.get_one::<String>("output") {
        Some(output) => {
            fs::write(output, json + "\n")
                .with_context(|| format!("failed to write registry to '{}'", output))?;
            let format = SummaryFormat::from_arg(
                matches
                    .get_one::<String>("summary")
                    .map(|s| s.as_str())
                    .unwrap_or("text"),
            );
            print!("{}", render_summary(&summary, format)?);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("report", sub)) => report_handler(sub),
        Some(("annotate", sub)) => annotate_handler(sub),
        _ => Err(anyhow::anyhow!("unknown command")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
