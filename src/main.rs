mod cli;
mod output;

use clap::Parser;
use cli::{Cli, Command, ResolveOpts};
use output::{ResolveResult, ScanResult};
use pyreqs::config::Config;
use pyreqs::python::PyPiIndex;
use pyreqs::{LookupTables, NameClassifier, Pipeline, Resolution, manifest, scan};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Command::Scan { path, ignore }) => run_scan(&path, ignore, cli.json),
        Some(Command::Resolve { path, opts }) => run_resolve(&path, opts, cli.json),
        Some(Command::Remote { url, token, opts }) => {
            run_remote(&url, token.as_deref(), opts, cli.json)
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays a clean manifest; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// Classifier from the configured tables and override rules
fn build_classifier(config: &Config) -> NameClassifier {
    let tables = LookupTables::load(
        config.stdlib_file.as_deref(),
        config.mapping_file.as_deref(),
    );
    NameClassifier::with_overrides(tables, config.overrides.clone())
}

/// Configured ignore entries followed by the command-line ones
fn ignore_dirs(config: &Config, extra: Vec<String>) -> Vec<String> {
    let mut dirs = config.ignore_dirs.clone();
    dirs.extend(extra);
    dirs
}

/// Build a pipeline from config, with command-line options taking precedence
fn build_pipeline(
    config: &Config,
    ignore: Vec<String>,
    index: Option<&str>,
    timeout: Option<u64>,
) -> Pipeline<PyPiIndex> {
    let index_url = index.unwrap_or(&config.index_url);
    let timeout = timeout
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.timeout());

    Pipeline::new(build_classifier(config), PyPiIndex::new(index_url, timeout))
        .with_ignore_dirs(ignore_dirs(config, ignore))
}

fn run_scan(
    path: &Path,
    ignore: Vec<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let packages = scan::scan(path, &ignore_dirs(&config, ignore), &build_classifier(&config))?;

    if json_output {
        output::print_json(&ScanResult {
            path: path.display().to_string(),
            packages,
        });
    } else {
        for package in packages {
            println!("{}", package);
        }
    }
    Ok(())
}

fn run_resolve(
    path: &Path,
    opts: ResolveOpts,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let pipeline = build_pipeline(&config, opts.ignore, opts.index.as_deref(), opts.timeout);
    let resolution = pipeline.resolve_local(path)?;
    emit(&resolution, opts.output.as_deref(), json_output)
}

fn run_remote(
    url: &str,
    token: Option<&str>,
    opts: ResolveOpts,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let pipeline = build_pipeline(&config, opts.ignore, opts.index.as_deref(), opts.timeout);
    let resolution = pipeline.resolve_remote(url, token)?;
    emit(&resolution, opts.output.as_deref(), json_output)
}

/// Write the manifest to `output_path`, or print it to stdout
fn emit(
    resolution: &Resolution,
    output_path: Option<&Path>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output_path {
        manifest::write_manifest(path, &resolution.requirements)?;
    }

    if json_output {
        let mut result = ResolveResult::new(resolution);
        if let Some(path) = output_path {
            result = result.with_output(&path.display().to_string());
        }
        output::print_json(&result);
    } else if let Some(path) = output_path {
        println!(
            "Wrote {} requirement(s) to {}",
            resolution.requirements.len(),
            path.display()
        );
    } else {
        print!("{}", manifest::render_manifest(&resolution.requirements));
    }

    if resolution.failed > 0 && !json_output {
        eprintln!("{} package(s) could not be resolved", resolution.failed);
    }
    Ok(())
}
