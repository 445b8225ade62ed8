//! quickwrap
//!
//! Generates Lua-friendly C++ wrappers (`Q<Api>.h` / `Q<Api>.cpp`) for
//! native s3e extension headers.

mod backend;
mod config;
mod feedback;
mod frontend;
mod middle;
mod pipeline;
mod project;
mod types;
mod utils;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use config::Config;
use feedback::Severity;
use frontend::ApiIdentity;
use pipeline::{transform, WrapperOutput};
use project::{resolve_input, write_wrapper, OutputLayout, ResolvedInput};

/// quickwrap wrapper generator
#[derive(Parser, Debug)]
#[command(name = "quickwrap")]
#[command(version = "0.1.0")]
#[command(about = "Generate Lua quick wrappers for native s3e extension headers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extension folder or its header (.h)
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the wrapper next to the extension
    Generate {
        /// Extension folder or its header (.h)
        input: PathBuf,

        /// Folder to create the wrapper directory in (default: extension root)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Overwrite the previous output instead of backing it up
        #[arg(long)]
        no_backup: bool,

        /// Also write the generation report as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Report what would be generated without writing anything
    Check {
        /// Extension folder or its header (.h)
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print generated code to stdout
    Print {
        /// Extension folder or its header (.h)
        input: PathBuf,

        /// Only the header
        #[arg(long, conflicts_with = "source")]
        header: bool,

        /// Only the source
        #[arg(long)]
        source: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;

    match &cli.command {
        Some(Commands::Generate { input, output, no_backup, report }) => {
            let backup = !no_backup && config.backup;
            generate(input, output.as_deref(), backup, report.as_deref(), &config)
        }
        Some(Commands::Check { input, json }) => check(input, *json, &config),
        Some(Commands::Print { input, header, source }) => print(input, *header, *source, &config),
        None => match &cli.input {
            Some(input) => generate(input, None, config.backup, None, &config),
            None => {
                anyhow::bail!(
                    "You must specify the path to an extension folder or its .h header\n\
                     Usage: quickwrap <PATH> or quickwrap generate <PATH>"
                )
            }
        },
    }
}

/// Resolve the input and run the transform
fn prepare(
    input: &Path,
    config: &Config,
) -> anyhow::Result<(ResolvedInput, ApiIdentity, WrapperOutput)> {
    let resolved = resolve_input(input)?;
    let identity = ApiIdentity::new(&resolved.source_api_name, config)?;
    let header_text = resolved
        .read_header()
        .with_context(|| format!("Failed to read {}", resolved.header_path.display()))?;

    log::info!("wrapping {} as {}", identity.source_api_name, identity.wrapper_api_name);
    let output = transform(&header_text, &identity, config);
    Ok((resolved, identity, output))
}

fn generate(
    input: &Path,
    output_parent: Option<&Path>,
    backup: bool,
    report_path: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let (resolved, identity, output) = prepare(input, config)?;

    let parent = output_parent.unwrap_or(resolved.root_path.as_path());
    let layout = OutputLayout::new(parent, &identity);
    let written = write_wrapper(&layout, &identity, &output, backup)
        .with_context(|| format!("Failed to write wrapper to {}", layout.dir.display()))?;

    if let Some(path) = report_path {
        fs::write(path, output.report.to_json())
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    println!("Wrapped {} -> {}", identity.source_api_name, identity.wrapper_api_name);
    if written.backed_up {
        println!("  [✓] Previous output moved to {}", layout.backup_dir.display());
    }
    println!("  [✓] {}", written.header.display());
    println!("  [✓] {}", written.source.display());
    println!("  [✓] {}", written.manifest.display());

    let report = &output.report;
    if !report.diagnostics.is_empty() {
        println!(
            "  [!] {} FIXME, {} WARNING, {} TODO notes need attention (see `quickwrap check`)",
            report.count(Severity::Fixme),
            report.count(Severity::Warning),
            report.count(Severity::Todo)
        );
    }
    Ok(())
}

fn check(input: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let (_, _, output) = prepare(input, config)?;
    if json {
        println!("{}", output.report.to_json());
    } else {
        print!("{}", output.report.render_text());
    }
    Ok(())
}

fn print(
    input: &Path,
    header_only: bool,
    source_only: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let (_, _, output) = prepare(input, config)?;
    if !source_only {
        print!("{}", output.header);
    }
    if !header_only {
        if !source_only {
            println!();
        }
        print!("{}", output.source);
    }
    Ok(())
}
