//! `duotone` command-line tool.
//!
//! Reads CSS from a file or stdin, applies the theme-color transform and
//! writes the result to a file or stdout. Warnings go to stderr.
//!
//! ```text
//! duotone --config theme.yaml --inject-flags src/app.css -o dist/app.css
//! cat app.css | duotone -c theme.yaml --strategy dark-rule --nesting flatten
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use duotone::{Nesting, Options, Strategy};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "duotone",
    version,
    about = "Rewrite CSS color-group references for light and dark themes"
)]
struct Cli {
    /// CSS file to transform. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Configuration file (.yaml, .yml or .json).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output strategy: flag-gated or dark-rule.
    #[arg(long, value_name = "STRATEGY")]
    strategy: Option<Strategy>,

    /// Dark rule placement: none, nested-rule, at-rule-nest or flatten.
    #[arg(long, value_name = "NESTING")]
    nesting: Option<Nesting>,

    /// Prepend the light/dark flag rules when something was rewritten.
    #[arg(long)]
    inject_flags: bool,

    /// Exit with an error if any warning was reported.
    #[arg(long)]
    strict: bool,

    /// More logging (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(strategy) = cli.strategy {
        options.strategy = strategy;
    }
    if let Some(nesting) = cli.nesting {
        options.nesting = nesting;
    }
    if cli.inject_flags {
        options.inject_flags = true;
    }
    Ok(options)
}

fn read_input(input: Option<&Path>) -> Result<(String, String)> {
    match input {
        Some(path) if path != Path::new("-") => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((css, path.display().to_string()))
        }
        _ => {
            let mut css = String::new();
            io::stdin()
                .read_to_string(&mut css)
                .context("reading stdin")?;
            Ok((css, "<stdin>".to_string()))
        }
    }
}

fn write_output(output: Option<&Path>, css: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, css).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(css.as_bytes()).context("writing stdout")?;
            stdout.flush().context("writing stdout")
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = load_options(&cli)?;
    tracing::info!(
        strategy = %options.strategy,
        nesting = %options.nesting,
        colors = options.colors.len(),
        "options loaded"
    );

    let (css, source) = read_input(cli.input.as_deref())?;
    let output = duotone::process(&css, &options).with_context(|| format!("processing {source}"))?;

    for warning in &output.warnings {
        eprintln!("{source}: warning: {warning}");
    }
    if cli.strict && !output.warnings.is_empty() {
        bail!(
            "{} warning(s) reported in {source} (--strict)",
            output.warnings.len()
        );
    }

    write_output(cli.output.as_deref(), &output.css)
}
