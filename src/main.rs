use cielo::application::assembler::RequestAssembler;
use cielo::domain::card::YearMonth;
use cielo::domain::language::Language;
use cielo::interfaces::OutputFormat;
use cielo::interfaces::csv::request_reader::RequestReader;
use chrono::Local;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file with one authorization request per row
    input: PathBuf,

    /// Month card expiry is checked against, as YYYYMM. Defaults to the current month.
    #[arg(long, env = "CIELO_REFERENCE_DATE")]
    reference_date: Option<YearMonth>,

    /// Language of the requests and of error labels (PT, EN or ES)
    #[arg(long, env = "CIELO_LANGUAGE", default_value = "PT")]
    language: Language,

    /// Output format for validated requests (csv or json)
    #[arg(long, env = "CIELO_FORMAT", default_value = "csv")]
    format: OutputFormat,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let reference = match cli.reference_date {
        Some(reference) => reference,
        None => YearMonth::from_date(&Local::now()).into_diagnostic()?,
    };
    tracing::info!(%reference, language = %cli.language, "validating requests");

    let assembler = RequestAssembler::new(reference, cli.language);
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);

    let stdout = io::stdout();
    let mut sink = cli.format.sink(stdout.lock());
    let label = cli.language.error_label();
    let (mut accepted, mut rejected) = (0usize, 0usize);

    for (line, record) in reader.records() {
        match record.and_then(|record| assembler.assemble(&record)) {
            Ok(request) => {
                sink.write(&request.summary()).into_diagnostic()?;
                accepted += 1;
            }
            Err(e) => {
                tracing::debug!(line, error = %e, "request rejected");
                eprintln!("# {label}: line {line} - {e}");
                rejected += 1;
            }
        }
    }
    sink.finish().into_diagnostic()?;

    tracing::info!(accepted, rejected, "done");
    Ok(())
}
