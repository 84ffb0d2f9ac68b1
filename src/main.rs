//! docmatch CLI binary.
//!
//! Ranks the plain-text files of one directory against a query.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use rayon::prelude::*;

use docmatch::{Config, DocumentSearcher, Result, ServiceConfig};

/// docmatch - rank text files by similarity to a query
#[derive(Parser, Debug, Clone)]
#[command(name = "docmatch")]
#[command(about = "Rank the text files of a directory by cosine similarity to a query")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Directory holding the documents (not searched recursively)
    dir: PathBuf,

    /// Query text
    query: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show only the best N results
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
}

impl Args {
    fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let load_start = Instant::now();
    let docs = load_documents(&args.dir, &config.service)?;
    log::info!(
        "loaded {} documents from {} in {:.2}ms",
        docs.len(),
        args.dir.display(),
        load_start.elapsed().as_secs_f64() * 1000.0
    );
    if docs.is_empty() {
        log::warn!("no matching files in {}", args.dir.display());
    }

    let searcher = DocumentSearcher::<String>::new(config.search);
    let search_start = Instant::now();
    let mut hits = searcher
        .search(&args.query, &docs)
        .map_keys(|doc| doc.0.clone());
    log::info!(
        "scored {} documents in {:.2}ms",
        hits.len(),
        search_start.elapsed().as_secs_f64() * 1000.0
    );
    if let Some(n) = args.top {
        hits.list.truncate(n);
    }

    match args.output_format {
        OutputFormat::Human => print!("{hits}"),
        OutputFormat::Json => {
            let out = if args.pretty {
                serde_json::to_string_pretty(&hits)?
            } else {
                serde_json::to_string(&hits)?
            };
            println!("{out}");
        }
    }
    Ok(())
}

/// Read every accepted file directly under `dir`, sorted by file name
///
/// Unreadable entries and files are skipped with a warning; text that is not
/// valid UTF-8 is decoded lossily.
fn load_documents(dir: &Path, service: &ServiceConfig) -> Result<Vec<(String, String)>> {
    let mut files: Vec<(String, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            service.accepts_file_name(&name).then_some((name, path))
        })
        .collect();
    files.sort();
    log::debug!("reading {} files with {} threads", files.len(), rayon::current_num_threads());

    Ok(files
        .into_par_iter()
        .filter_map(|(name, path)| match fs::read(&path) {
            Ok(bytes) => {
                let text = decode_text(&name, bytes);
                Some((name, text))
            }
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect())
}

fn decode_text(name: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{name} is not valid UTF-8, invalid bytes replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
