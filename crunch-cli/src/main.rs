//! Crunch CSS command line
//!
//! Minify a single stylesheet, build a bundle, or check which level an
//! existing output was produced at.
//!
//! Logging goes to stderr and is controlled with `CRUNCH_LOG`
//! (for example `CRUNCH_LOG=crunch_bundle=debug`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crunch_bundle::{BundleConfig, Crunch, Manifest};
use crunch_css::{Level, minify, parse_trailing};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

/// Crunch CSS: combine stylesheets and minify them at one of four levels
#[derive(Parser, Debug)]
#[command(name = "crunchcss")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"LEVELS:
    0 | none     combine only
    1 | low      one declaration per line
    2 | medium   one ruleset per line
    3 | high     a single line

EXAMPLES:
    # Minify a file
    crunchcss minify site.css

    # Minify stdin, keeping one declaration per line
    cat site.css | crunchcss minify -l low

    # Bundle two sources under a document root
    crunchcss bundle --root ./public --output /css/all.css /css/reset.css /css/site.css

    # Bundle from a manifest
    crunchcss bundle --config crunch.toml

    # Which level was this file built at?
    crunchcss inspect public/css/all.css
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minify one stylesheet and print the result
    Minify {
        /// File to minify (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Minification level, as a digit or a name
        #[arg(short, long, default_value = "high", value_parser = parse_level)]
        level: Level,
    },

    /// Combine sources into an output file and print the stylesheet markup
    Bundle {
        /// Read the bundle from a TOML manifest
        #[arg(short, long, value_name = "FILE", conflicts_with_all = ["root", "output", "sources"])]
        config: Option<PathBuf>,

        /// Document root on disk
        #[arg(long, value_name = "DIR", required_unless_present = "config")]
        root: Option<PathBuf>,

        /// Output path from the document root
        #[arg(short, long, value_name = "PATH", required_unless_present = "config")]
        output: Option<String>,

        /// Source paths from the document root, in cascade order
        #[arg(value_name = "SOURCES", required_unless_present = "config")]
        sources: Vec<String>,

        /// Minification level (defaults to the manifest's, or high)
        #[arg(short, long, value_parser = parse_level)]
        level: Option<Level>,

        /// Rebuild even if the output is up to date
        #[arg(long)]
        force: bool,

        /// Link the individual sources instead of the output
        #[arg(long)]
        dev: bool,

        /// Append `?t=<timestamp>` to every link
        #[arg(long)]
        cache_buster: bool,
    },

    /// Print the level recorded in a file's trailing token
    Inspect {
        /// Previously minified file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber, filtered by `CRUNCH_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CRUNCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Minify { file, level } => run_minify(file.as_deref(), level),
        Command::Bundle {
            config,
            root,
            output,
            sources,
            level,
            force,
            dev,
            cache_buster,
        } => {
            let flags = BundleFlags {
                level,
                force,
                dev,
                cache_buster,
            };
            match config {
                Some(path) => run_manifest(&path, &flags),
                None => {
                    let (Some(root), Some(output)) = (root, output) else {
                        bail!("--root and --output are required without --config");
                    };
                    run_bundle(&root, &output, &sources, &flags)
                }
            }
        }
        Command::Inspect { file } => run_inspect(&file),
    }
}

/// Parse a level given as a digit (coerced into range) or a name.
fn parse_level(raw: &str) -> Result<Level, String> {
    if let Ok(index) = raw.parse::<i64>() {
        return Ok(Level::coerce(index));
    }
    raw.parse::<Level>().map_err(|_| {
        let names: Vec<&'static str> = Level::iter().map(<&'static str>::from).collect();
        format!("expected 0-3 or one of: {}", names.join(", "))
    })
}

fn run_minify(file: Option<&Path>, level: Level) -> Result<()> {
    let css = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };

    println!("{}", minify(&css, level));
    Ok(())
}

/// Bundle options that can be given on the command line as well as in a manifest.
#[derive(Debug)]
struct BundleFlags {
    level: Option<Level>,
    force: bool,
    dev: bool,
    cache_buster: bool,
}

fn run_manifest(path: &Path, flags: &BundleFlags) -> Result<()> {
    let manifest =
        Manifest::load(path).with_context(|| format!("failed to load {}", path.display()))?;

    let mut config = manifest.bundle_config();
    config.dev_mode |= flags.dev;
    config.cache_buster |= flags.cache_buster;

    let crunch = Crunch::new(&manifest.sources, &manifest.output, &manifest.doc_root, config)
        .with_context(|| format!("invalid bundle in {}", path.display()))?;
    let level = flags.level.unwrap_or_else(|| manifest.level());

    build(crunch, level, flags.force || manifest.force)
}

fn run_bundle(root: &Path, output: &str, sources: &[String], flags: &BundleFlags) -> Result<()> {
    let config = BundleConfig {
        dev_mode: flags.dev,
        cache_buster: flags.cache_buster,
        ..BundleConfig::default()
    };

    let crunch = Crunch::new(sources, output, root, config).context("invalid bundle")?;
    build(crunch, flags.level.unwrap_or(Level::High), flags.force)
}

/// Process a validated bundle, report what happened on stderr and print the markup.
fn build(mut crunch: Crunch, level: Level, force: bool) -> Result<()> {
    let _ = crunch.process(level, force).context("failed to process bundle")?;
    let rebuilt = crunch.is_updated();
    let markup = crunch.to_file().context("failed to save bundle")?;

    let output = crunch.output().web_path.clone();
    if rebuilt {
        eprintln!("{} {output} ({level})", "wrote".green().bold());
    } else {
        eprintln!("{} {output} ({level})", "up to date".dimmed());
    }

    print!("{markup}");
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let css =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    match parse_trailing(&css) {
        Some(level) => println!("{}: {level} ({})", file.display(), level.index()),
        None => println!("{}: {}", file.display(), "no level token".yellow()),
    }
    Ok(())
}
