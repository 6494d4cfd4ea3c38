use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use readahead::error::OpenError;
use readahead::{BufferedByteSource, ByteSource, CountingReader, ReadOutcome};

/// Read a file one byte at a time through a buffered, counting reader.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The file to read; reads standard input if absent or "-".
    file: Option<PathBuf>,
}

struct Report {
    bytes: u64,
    elapsed: Duration,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match read_pass(cli.file.as_deref()) {
        Ok(report) => {
            println!(
                "read {} bytes in {} ms",
                report.bytes,
                report.elapsed.as_millis()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("readahead: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn read_pass(path: Option<&Path>) -> io::Result<Report> {
    let raw: Box<dyn Read> = match path {
        Some(path) if path != Path::new("-") => {
            Box::new(File::open(path).map_err(|err| OpenError::new(path, err))?)
        }
        _ => Box::new(io::stdin().lock()),
    };

    let start = Instant::now();
    let mut reader = CountingReader::new(BufferedByteSource::new(raw));
    let drained = drain(&mut reader);
    let closed = reader.close();
    drained?;
    closed?;

    let report = Report {
        bytes: reader.read_count(),
        elapsed: start.elapsed(),
    };
    info!(
        "{} raw reads for {} bytes",
        reader.get_ref().refills(),
        report.bytes
    );
    Ok(report)
}

fn drain<S: ByteSource>(source: &mut S) -> io::Result<()> {
    while let ReadOutcome::Byte(_) = source.read_next_byte()? {}
    Ok(())
}
