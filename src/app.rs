use std::io::{BufWriter, stdout};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::{
    common::{config::ConfigLoader, error::{AppError, CasinoError}},
    domain::transaction::TxFilter,
    io::{reader, writer},
    worker::{casino::Casino, processor::Processor},
};

const TRANSACTIONS_FLAG: &str = "--transactions";
const CONFIG_FLAG: &str = "--config=";

/// What the binary prints once the script has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Accounts,
    Transactions(TxFilter),
}

/// Options following the script path: `--transactions[=<filter>]` and
/// `--config=<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub output: Output,
    pub config_path: Option<String>,
}

impl Options {
    pub fn parse(flags: &[String]) -> Result<Self, AppError> {
        let mut options = Options {
            output: Output::Accounts,
            config_path: None,
        };
        for flag in flags {
            if flag == TRANSACTIONS_FLAG {
                options.output = Output::Transactions(TxFilter::All);
            } else if let Some(filter) = flag.strip_prefix(TRANSACTIONS_FLAG).and_then(|f| f.strip_prefix('=')) {
                options.output = Output::Transactions(filter.parse().map_err(AppError::Parse)?);
            } else if let Some(path) = flag.strip_prefix(CONFIG_FLAG) {
                options.config_path = Some(path.to_string());
            } else {
                return Err(AppError::Parse(format!("unknown option: {flag}")));
            }
        }
        Ok(options)
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let input_path = &args[1];
    let options = Options::parse(&args[2..])?;

    init_logging();
    let mut loader = ConfigLoader::from_env();
    if let Some(path) = &options.config_path {
        loader = loader.with_path(path);
    }
    let config = loader
        .load()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let file = std::fs::File::open(input_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    let events = reader::read_events(&mut reader);

    let mut casino = Casino::new(config)?;
    let mut processor = Processor::new();

    for event in events {
        let event = event.map_err(AppError::Parse)?;
        match processor.process(&mut casino, event) {
            Ok(()) => {}
            Err(e @ CasinoError::Storage(_)) => return Err(e.into()),
            Err(e) => warn!(error = %e, "session event rejected"),
        }
    }

    let stdout = stdout();
    let out = BufWriter::new(stdout.lock());
    match options.output {
        Output::Transactions(filter) => {
            let transactions = casino.list_transactions(filter)?;
            writer::write_transactions(out, &transactions)?;
        }
        Output::Accounts => writer::write_accounts(out, &casino.accounts()?)?,
    }

    Ok(())
}
