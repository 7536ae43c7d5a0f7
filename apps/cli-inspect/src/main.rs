use std::io::Read;
use std::path::{Path, PathBuf};

use acsm_core::{CardParser, ParseOptions, SchemaVersion};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

mod report;

use report::Report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Adaptive Card resource inspector")]
struct Cli {
    /// Card JSON file, or `-` to read stdin
    #[arg()]
    file: PathBuf,
    /// Highest card schema version to accept (e.g. 1.5)
    #[arg(long)]
    renderer_version: Option<SchemaVersion>,
    /// Maximum element/action nesting depth
    #[arg(long)]
    max_depth: Option<usize>,
    /// Emit JSON output
    #[arg(long)]
    json: bool,
    /// Report each resource once
    #[arg(long)]
    unique: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    acsm_telemetry::install("card-inspect", env!("CARGO_PKG_VERSION"))?;

    let mut options = ParseOptions::from_env();
    if let Some(version) = cli.renderer_version {
        options = options.with_renderer_version(version);
    }
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth.max(1));
    }
    debug!(?options, "resolved parse options");

    let source = cli.file.display().to_string();
    let text = read_input(&cli.file)?;
    let parser = CardParser::default().with_options(options);
    let (parsed, resources) = parser
        .resources_from_str(&text)
        .with_context(|| format!("failed to parse {source}"))?;

    let report = Report::new(&parsed, resources, cli.unique);
    acsm_telemetry::record_parse_summary(&source, report.warnings.len(), report.resources.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_table();
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
