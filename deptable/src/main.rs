//! Inspect, check, order and convert dependency-declaration manifests.
//!
//! Reads `deptable.toml` for defaults and operates on the manifest it names
//! (`deps.js` unless configured otherwise).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use deptable::check::check_manifest;
use deptable::core::order::OrderError;
use deptable::exit_codes;
use deptable::io::config::CONFIG_FILE;
use deptable::io::init::{InitOptions, init_config};
use deptable::io::manifest::{ManifestFormat, render_manifest, write_manifest};
use deptable::io::project::Project;
use deptable::logging;
use deptable::plan::{PlanOptions, plan_load};
use deptable::table::DeclarationRecord;

#[derive(Parser)]
#[command(
    name = "deptable",
    version,
    about = "Dependency-declaration manifest tool"
)]
struct Cli {
    /// Config file; missing files mean defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Manifest to read instead of the configured one.
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default `deptable.toml`.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Print every record in declaration order.
    List,
    /// Report duplicate providers, unresolved requirements and cycles.
    Check,
    /// Print record paths in load order.
    Order {
        /// Only the records needed to load this module.
        #[arg(long)]
        module: Option<String>,
        /// Prefix each path with the configured `base_dir`.
        #[arg(long)]
        resolve_paths: bool,
    },
    /// Re-emit the manifest in another format.
    Convert {
        #[arg(long, value_enum)]
        to: ManifestFormat,
        /// Write here instead of stdout; the extension must match `--to`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::List => cmd_list(&load(&cli)?),
        Command::Check => cmd_check(&load(&cli)?),
        Command::Order {
            ref module,
            resolve_paths,
        } => cmd_order(&load(&cli)?, module.as_deref(), resolve_paths),
        Command::Convert { to, ref output } => cmd_convert(&load(&cli)?, to, output.as_deref()),
    }
}

fn load(cli: &Cli) -> Result<Project> {
    Project::load(&cli.config, cli.manifest.as_deref())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    init_config(config_path, &InitOptions { force })?;
    println!("init: wrote {}", config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_list(project: &Project) -> Result<i32> {
    let mut stdout = std::io::stdout().lock();
    for record in project.table.records() {
        writeln!(stdout, "{}", describe(record)).context("write stdout")?;
    }
    Ok(exit_codes::OK)
}

fn cmd_check(project: &Project) -> Result<i32> {
    let report = check_manifest(&project.table, &project.config.external_namespaces());
    debug!(
        records = report.records,
        violations = report.violations.len(),
        cycle = report.cycle.is_some(),
        "check finished"
    );
    for line in report.lines() {
        println!("{line}");
    }
    if report.is_clean() {
        println!(
            "check: ok records={} manifest={}",
            report.records,
            project.manifest_path.display()
        );
    }
    Ok(report.exit_code())
}

fn cmd_order(project: &Project, module: Option<&str>, resolve_paths: bool) -> Result<i32> {
    let options = PlanOptions {
        module,
        base_dir: resolve_paths.then_some(project.base_dir.as_path()),
    };
    match plan_load(&project.table, &options) {
        Ok(paths) => {
            for path in paths {
                println!("{path}");
            }
            Ok(exit_codes::OK)
        }
        Err(err @ OrderError::Cycle(_)) => {
            eprintln!("{err}");
            Ok(exit_codes::CYCLE)
        }
        Err(err @ OrderError::UnknownModule(_)) => Err(err.into()),
    }
}

fn cmd_convert(project: &Project, to: ManifestFormat, output: Option<&Path>) -> Result<i32> {
    match output {
        Some(path) => {
            let implied = ManifestFormat::from_path(path)?;
            if implied != to {
                anyhow::bail!(
                    "output {} implies format {implied}, not {to}",
                    path.display()
                );
            }
            write_manifest(path, &project.table)?;
            println!("convert: wrote {} ({to})", path.display());
        }
        None => print!("{}", render_manifest(&project.table, to)?),
    }
    Ok(exit_codes::OK)
}

/// `path provides=a,b requires=c,d`
fn describe(record: &DeclarationRecord) -> String {
    let requires: Vec<&str> = record.requires.iter().map(String::as_str).collect();
    format!(
        "{} provides={} requires={}",
        record.path,
        record.provides.join(","),
        requires.join(",")
    )
}
