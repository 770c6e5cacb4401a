use std::io::{self, IsTerminal};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use yamlptr::config::{Config, Mode, OutputFormat};
use yamlptr::document::node::Node;
use yamlptr::file::loader::{load_yaml_file, load_yaml_from_stdin};
use yamlptr::output::render;
use yamlptr::pointer::{self, Resolved};

/// yamlptr - Print the value and location of a pointer in a YAML file
#[derive(Parser)]
#[command(name = "yamlptr")]
#[command(version)]
#[command(about = "Resolve a JSON pointer (with ~{...} match segments) in a YAML file", long_about = None)]
struct Cli {
    /// Pointer to resolve, e.g. '/spec/containers/~{"name":"app"}/image'
    pointer: String,

    /// YAML file to search (omit or use "-" to read stdin)
    file: Option<String>,

    /// Lookup policy [default: from config, else first]
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Document index in a multi-document file [default: from config, else 0]
    #[arg(short, long)]
    document: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    let mode = cli.mode.unwrap_or(config.mode);
    let format = cli.format.unwrap_or(config.format);
    let index = cli.document.unwrap_or(config.document);

    let input = input_source(cli.file.as_deref(), io::stdin().is_terminal())?;
    let (documents, source) = match input {
        Input::Stdin => (load_yaml_from_stdin()?, "<stdin>".to_string()),
        Input::File(path) => (load_yaml_file(path)?, path.to_string()),
    };

    let document = documents.get(index).with_context(|| {
        format!(
            "{} has {} document(s), no document at index {}",
            source,
            documents.len(),
            index
        )
    })?;

    let results = resolve(document, &cli.pointer, mode)
        .with_context(|| format!("Failed to resolve pointer in {}", source))?;
    print!("{}", render(&source, &results, format)?);

    Ok(())
}

/// Where the YAML text is read from.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Stdin,
    File(&'a str),
}

/// Picks the input; without a FILE, stdin is only read when it is piped.
fn input_source(file: Option<&str>, stdin_is_terminal: bool) -> Result<Input<'_>> {
    match file {
        Some("-") => Ok(Input::Stdin),
        Some(path) => Ok(Input::File(path)),
        None if stdin_is_terminal => {
            bail!("no input: pass a YAML FILE or pipe YAML on stdin (see --help)")
        }
        None => Ok(Input::Stdin),
    }
}

fn resolve(document: &Node, text: &str, mode: Mode) -> pointer::Result<Vec<Resolved>> {
    match mode {
        Mode::First => pointer::find(document, text).map(|found| vec![found]),
        Mode::All => pointer::find_all(document, text),
        Mode::Strict => pointer::find_all_strict(document, text),
    }
}
