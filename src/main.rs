//! doxidown - Doxygen XML to Docusaurus Markdown converter

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doxidown::{Error, parse_layout, parse_xml_dir};

#[derive(Parser)]
#[command(name = "doxidown")]
#[command(version, about = "Convert Doxygen XML to Docusaurus Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    doxidown build/xml docs/api                       Convert XML output
    doxidown build/xml docs/api -l DoxygenLayout.xml  Use layout navigation")]
struct Cli {
    /// Doxygen XML output directory
    #[arg(value_name = "XML_DIR")]
    xml_dir: PathBuf,

    /// Output directory for Markdown and sidebars.json
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// DoxygenLayout.xml file for sidebar navigation
    #[arg(short, long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> doxidown::Result<()> {
    if !cli.xml_dir.is_dir() {
        return Err(Error::InvalidDoc(format!(
            "{} is not a directory (run doxygen with GENERATE_XML=YES first)",
            cli.xml_dir.display()
        )));
    }

    let docs = parse_xml_dir(&cli.xml_dir)?;
    let navigation = match &cli.layout {
        Some(path) => parse_layout(path)?,
        None => Vec::new(),
    };

    let pages = doxidown::emit::generate(&cli.output, &docs, &navigation)?;

    if !cli.quiet {
        println!(
            "Wrote {pages} Markdown page(s) and sidebars.json to {}",
            cli.output.display()
        );
    }
    Ok(())
}
