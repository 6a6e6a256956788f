//! assertgen
//!
//! Reads assertion and comparator names, one per line, from the given files
//! (or standard input) and writes the generated header to standard output.
//!
//! Usage:
//!   assertgen names.txt > assertions.h
//!   cat names.txt | assertgen --config assertgen.toml --guard MY_ASSERTS_H
//!
//! Logging goes to standard error; set `RUST_LOG=debug` to trace every name.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use layered_assertgen::{Generator, GeneratorConfig, LineSource};

/// Generate C assertion macros from their names
#[derive(Parser, Debug)]
#[command(name = "assertgen")]
#[command(about = "Generate C assertion macros from their names")]
struct Args {
    /// Files of names, one per line ("-" or none reads standard input)
    files: Vec<PathBuf>,

    /// TOML file overriding generator settings
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Header guard macro name (overrides the config file)
    #[arg(long)]
    guard: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let header = run(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(header.as_bytes())
        .context("failed to write header")?;
    out.flush()?;
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(guard) = &args.guard {
        config.guard = guard.clone();
    }
    Ok(config)
}

fn run(args: &Args) -> anyhow::Result<String> {
    let mut generator = Generator::new(load_config(args)?);

    let stdin_only = [PathBuf::from("-")];
    let files = if args.files.is_empty() {
        &stdin_only[..]
    } else {
        &args.files[..]
    };

    for path in files {
        if path.as_os_str() == "-" {
            let stdin = io::stdin();
            let mut source = LineSource::new("<stdin>", stdin.lock());
            generator.run(&mut source)?;
        } else {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let mut source = LineSource::new(path.display().to_string(), BufReader::new(file));
            generator.run(&mut source)?;
        }
        tracing::debug!(source = %path.display(), "consumed token source");
    }

    Ok(generator.finish())
}
