use app_inventory::{ColumnResolver, SimpleLogger, process_file, write_json};
use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(name = "convert", author, version, about, long_about = None)]
struct Args {
    /// Input spreadsheet (xlsx, xls, ods, csv, ...); the first row is the header
    input: PathBuf,

    /// Output JSON file; parent directories are created as needed
    output: PathBuf,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> ExitCode {
    // Acquire CLI args
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            println!("{}", err.render());
            return ExitCode::from(2);
        }
    };

    // Initialize timer and logger
    let start = Instant::now();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
    }

    debug!(
        "Input file: {} | Output file: {}",
        args.input.display(),
        args.output.display()
    );

    // Convert input into records
    let records = match process_file(&args.input, &ColumnResolver::default()) {
        Ok((records, _)) => records,
        Err(err) => {
            println!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    // Write output
    if let Err(err) = write_json(&records, &args.output) {
        println!("{}", err);
        return ExitCode::from(err.exit_code());
    }

    println!(
        "Wrote {} records to {}",
        records.len(),
        args.output.display()
    );
    debug!("Completed in {:.2?}", start.elapsed());
    ExitCode::SUCCESS
}
