//! `blockmark` CLI: convert exported block markup to semantic HTML.

use std::io::{self, Read};
use std::path::PathBuf;

use blockmark::{ConfigError, HtmlRenderer, Options};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockmark", version, about)]
struct Cli {
    /// Markup file to convert. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// JSON file with rendering options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path prefix for rewritten image URLs (overrides the config file).
    #[arg(long)]
    image_prefix: Option<String>,

    /// Emit image sources exactly as found.
    #[arg(long)]
    no_image_rewrite: bool,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Semantic HTML.
    Html,
    /// Parsed markup tree as JSON.
    Tree,
    /// Heading outline as JSON.
    Outline,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    // --verbose forces DEBUG, otherwise RUST_LOG decides
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let options = load_options(cli)?;
    let input = read_input(cli)?;
    tracing::debug!(bytes = input.len(), "input read");

    let output = match cli.format {
        Format::Html => blockmark::transform_with(&input, &options),
        Format::Tree => serde_json::to_string_pretty(&blockmark::parse(&input))? + "\n",
        Format::Outline => {
            let root = blockmark::parse(&input);
            serde_json::to_string_pretty(&blockmark::outline(&root))? + "\n"
        }
    };
    Ok(output)
}

fn load_options(cli: &Cli) -> Result<Options, CliError> {
    let mut options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(prefix) = &cli.image_prefix {
        options.image_proxy_prefix = prefix.clone();
    }
    if cli.no_image_rewrite {
        options.rewrite_images = false;
    }
    Ok(options)
}

fn read_input(cli: &Cli) -> Result<String, CliError> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.clone(),
            source,
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(CliError::Stdin)?;
            Ok(input)
        }
    }
}
