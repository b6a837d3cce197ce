use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use docseek::binary::{self, MAX_FILE_SIZE};
use docseek::build::run_build;
use docseek::{FileSource, IndexHandle, SearchOptions};

mod cli;
use cli::{display, logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            json,
        } => index_command(&input, &output, json),
        Commands::Inspect { file } => inspect_command(&file),
        Commands::Search {
            file,
            query,
            limit,
            no_prefix,
        } => search_command(&file, &query, limit, no_prefix),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn index_command(input: &str, output: &str, json: bool) -> Result<()> {
    let start = Instant::now();
    let summary = run_build(Path::new(input), Path::new(output), json)
        .with_context(|| format!("failed to build index from {}", input))?;
    display::print_build_summary(&summary, start.elapsed());

    if summary.failed_pages > 0 {
        eprintln!(
            "⚠ {} page(s) could not be read and were indexed as placeholders (run with -v for details)",
            summary.failed_pages
        );
    }
    Ok(())
}

fn inspect_command(path: &str) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path))?;
    if bytes.len() > MAX_FILE_SIZE {
        bail!(
            "{} is {} bytes, larger than the {} byte limit",
            path,
            bytes.len(),
            MAX_FILE_SIZE
        );
    }
    let layout =
        binary::read_layout(&bytes).with_context(|| format!("{} is not a docseek index", path))?;

    let brotli_size = brotli_size(&bytes)?;
    display::print_layout(path, bytes.len(), &layout, brotli_size);

    // Structure looked fine; make sure the contents decode too.
    if layout.checksum_ok() {
        binary::deserialize(&bytes).with_context(|| format!("{} failed to decode", path))?;
    } else {
        bail!("{} failed its CRC32 check", path);
    }
    Ok(())
}

/// Size after brotli at the quality static hosts typically serve with.
fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder
            .write_all(data)
            .context("brotli compression failed")?;
    }
    Ok(compressed.len())
}

fn search_command(path: &str, query: &str, limit: usize, no_prefix: bool) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start async runtime")?;

    let handle = IndexHandle::new(FileSource::new(path));
    let options = SearchOptions {
        limit,
        prefix: !no_prefix,
        ..SearchOptions::default()
    };

    runtime.block_on(async {
        // Load up front so a bad file is an error here, not an empty result list.
        handle
            .load()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("failed to load index {}", path))?;

        let start = Instant::now();
        let results = handle.search(query, &options).await;
        display::print_results(query, &results, start.elapsed());
        Ok(())
    })
}
