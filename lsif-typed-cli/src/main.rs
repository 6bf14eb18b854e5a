//! LSIF Typed CLI - converts a typed code intelligence index into LSIF.
//!
//! Reads the JSON rendering of a typed index and writes the LSIF graph as
//! newline-delimited JSON.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lsif_typed_core::exporter::ndjson::write_ndjson;
use lsif_typed_core::{
    convert_index, ConversionOptions, ImplementationPolicy, Index, RelationshipSource,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{CliConfig, CONFIG_FILE_NAME};

/// Extension every input index must carry.
const INDEX_EXTENSION: &str = ".lsif-typed.json";

/// Validate that the input path names a typed index file
fn parse_index_path(s: &str) -> Result<PathBuf, String> {
    if !s.ends_with(INDEX_EXTENSION) {
        return Err(format!(
            "'{}' is not a typed index, expected a file ending in {}",
            s, INDEX_EXTENSION
        ));
    }
    Ok(PathBuf::from(s))
}

/// Convert a typed code intelligence index into an LSIF dump.
#[derive(Parser)]
#[command(name = "lsif-typed")]
#[command(author, version)]
#[command(about = "Convert a typed code intelligence index into LSIF")]
#[command(after_help = "Examples:
  lsif-typed index.lsif-typed.json                     Write LSIF to stdout
  lsif-typed index.lsif-typed.json -o dump.lsif        Write LSIF to a file
  lsif-typed index.lsif-typed.json --tag-properties    Tag relationship item edges")]
pub struct Cli {
    /// Typed index to convert (must end in .lsif-typed.json)
    #[arg(value_name = "INDEX", value_parser = parse_index_path, required_unless_present = "version_verbose")]
    index: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Create an implementation result for every global symbol up front
    #[arg(long)]
    eager_implementations: bool,

    /// Only follow relationships declared by the symbol being defined
    #[arg(long)]
    declared_relationships: bool,

    /// Tag relationship item edges with a property
    #[arg(long)]
    tag_properties: bool,

    /// Config file (default: ./.lsif-typed.toml)
    #[arg(long, env = "LSIF_TYPED_CONFIG")]
    config: Option<PathBuf>,

    /// Fail on config file errors instead of silently using defaults
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show detailed version information
    #[arg(long = "version-verbose")]
    version_verbose: bool,
}

impl Cli {
    /// Config values, overridden by any flag that was given.
    fn conversion_options(&self, config: &CliConfig) -> ConversionOptions {
        let mut options = config.conversion;
        if self.eager_implementations {
            options = options.with_implementation_results(ImplementationPolicy::Eager);
        }
        if self.declared_relationships {
            options = options.with_relationship_source(RelationshipSource::Declared);
        }
        if self.tag_properties {
            options = options.with_tagged_item_properties(true);
        }
        options
    }
}

/// Setup logging based on verbosity
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print verbose version information
fn print_verbose_version() {
    let cli_version = env!("CARGO_PKG_VERSION");
    let platform = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    println!("lsif-typed {}", cli_version);
    println!("  {:<17} {}", "lsif-typed-cli:".cyan(), cli_version);
    println!("  {:<17} {}", "lsif-typed-core:".cyan(), lsif_typed_core::version());
    println!("  {:<17} {}", "LSIF:".cyan(), lsif_typed_core::graph::LSIF_VERSION);
    println!("  {:<17} {}", "Platform:".cyan(), platform);
}

fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    if cli.strict {
        Ok(CliConfig::load_strict(&path)?)
    } else {
        Ok(CliConfig::load(&path))
    }
}

fn read_index(path: &Path) -> anyhow::Result<Index> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read index {}", path.display()))?;
    let index: Index = serde_json::from_str(&content)
        .with_context(|| format!("Failed to decode index {}", path.display()))?;
    tracing::debug!(
        documents = index.documents.len(),
        external_symbols = index.external_symbols.len(),
        "Decoded typed index"
    );
    Ok(index)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version_verbose {
        print_verbose_version();
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config(&cli)?;
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }
    let options = cli.conversion_options(&config);

    let Some(index_path) = cli.index.as_deref() else {
        anyhow::bail!("No index given");
    };
    let index = read_index(index_path)?;
    let elements = convert_index(&index, options)
        .with_context(|| format!("Failed to convert {}", index_path.display()))?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ndjson(&elements, file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            write_ndjson(&elements, std::io::stdout().lock()).context("Failed to write LSIF")?;
        }
    }

    if !cli.quiet {
        eprintln!(
            "{} {} elements from {} documents",
            "Converted".green().bold(),
            elements.len(),
            index.documents.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_path() {
        assert!(parse_index_path("out/index.lsif-typed.json").is_ok());
        assert!(parse_index_path("index.json").is_err());
        assert!(parse_index_path("index.lsif-typed").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["lsif-typed", "a.lsif-typed.json", "--tag-properties"]);
        let config: CliConfig = toml::from_str(
            "[conversion]\nimplementation_results = \"eager\"\ntag_item_properties = false\n",
        )
        .unwrap();

        let options = cli.conversion_options(&config);
        assert_eq!(options.implementation_results, ImplementationPolicy::Eager);
        assert_eq!(options.relationship_source, RelationshipSource::Inverse);
        assert!(options.tag_item_properties);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
