use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use docx_to_html::{convert_docx_to_html_with, ConvertOptions, DEFAULT_OUTPUT};

const DEFAULT_SOURCE: &str = "Writing Science Fiction and Fantasy.docx";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input .docx file.
    #[arg(default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Output .html path.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Page title (optional).
    #[arg(long)]
    title: Option<String>,

    /// Take list formats from the document's numbering definitions when the style name has none.
    #[arg(long)]
    resolve_numbering: bool,

    /// Log each paragraph and list transition.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("set tracing subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut options = ConvertOptions {
        resolve_numbering: args.resolve_numbering,
        ..ConvertOptions::default()
    };
    if let Some(title) = args.title {
        options.title = title;
    }

    let output = convert_docx_to_html_with(&args.source, &args.out, &options)
        .with_context(|| format!("convert {}", args.source.display()))?;
    println!("Conversion complete! HTML file saved as: {}", output.display());
    Ok(())
}
