// crates/seedscan-cli/src/main.rs
//
// seedscan — CLI entrypoint.
// Loads a query, compiles it into a filter tree, partitions the requested
// seed range across worker threads, and streams accepted results through a
// single writer thread as CSV or newline-delimited JSON.

mod args;
mod demo_source;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::thread;

use args::{parse_and_validate, Args, OutputFormat};
use demo_source::DemoItemSource;
use seedscan_core::SEED_SPACE_SIZE;
use seedscan_report::{CsvResultWriter, JsonResultWriter, ResultWriter};
use seedscan_search::{SearchSession, SearchResult};

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("seedscan: error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("seedscan: error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, String> {
    let query = seedscan_io::load_query_file(&args.query)
        .map_err(|e| format!("cannot load query {}: {e}", args.query.display()))?;

    let report = seedscan_filter::validate(&query);
    for issue in &report.issues {
        log::warn!("{}: {} ({:?})", issue.path, issue.message, issue.severity);
    }
    if !report.pass() {
        return Err(format!("query failed validation ({} issue(s) above)", report.issues.len()));
    }

    let tree = seedscan_filter::build_filter_tree::<DemoItemSource>(&query);
    let source = DemoItemSource;

    let seed_start = args.seed_start;
    let seed_count = args.seed_count.unwrap_or(SEED_SPACE_SIZE - seed_start);

    let initial_cutoff = if args.auto_cutoff { 0 } else { args.cutoff };
    let session = SearchSession::new(initial_cutoff, args.auto_cutoff);

    let threads = args
        .threads
        .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
        .max(1);

    let clause_count = query.should.len();
    let (tx, rx) = crossbeam_channel::unbounded::<SearchResult>();

    let mut writer: Box<dyn ResultWriter + Send> = match build_output(&args) {
        Ok(out) => match args.format {
            OutputFormat::Csv => Box::new(CsvResultWriter::new(out, clause_count)),
            OutputFormat::Json => Box::new(JsonResultWriter::new(out)),
        },
        Err(e) => return Err(format!("cannot open output: {e}")),
    };

    thread::scope(|scope| {
        scope.spawn(move || {
            for result in rx.iter() {
                if let Err(e) = writer.write_result(&result) {
                    log::warn!("dropping a result: write error: {e}");
                }
            }
            if let Err(e) = writer.flush() {
                log::warn!("final flush failed: {e}");
            }
        });

        let chunk_size = seed_count.div_ceil(threads as u64).max(1);
        for worker in 0..threads {
            let chunk_start = seed_start + worker as u64 * chunk_size;
            if chunk_start >= seed_start + seed_count {
                break;
            }
            let chunk_len = chunk_size.min(seed_start + seed_count - chunk_start);
            let tx = tx.clone();
            let source = &source;
            let tree = &tree;
            let session = &session;
            scope.spawn(move || {
                if let Err(e) = seedscan_search::search_range(
                    source,
                    tree,
                    chunk_start,
                    chunk_len,
                    session,
                    |result| {
                        let _ = tx.send(result);
                    },
                ) {
                    log::warn!("worker covering [{chunk_start}, {chunk_len}) failed: {e}");
                }
            });
        }
        drop(tx);
    });

    if !args.quiet {
        println!(
            "seedscan: scanned {seed_count} seed(s) from index {seed_start}, found {} result(s)",
            session.results_found()
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn build_output(args: &Args) -> io::Result<Box<dyn Write + Send>> {
    match &args.out {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout())),
    }
}
