use crate::domain::currency::{AcceptedCurrencies, Currency};
use crate::infrastructure::sandbox::SandboxCardCharger;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Command-line settings. Every option can also come from the environment
/// (a `.env` file is loaded first).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Input requests CSV file
    pub input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "CUSTOMER_PAYMENTS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Currencies the payment processor will charge
    #[arg(
        long,
        env = "CUSTOMER_PAYMENTS_ACCEPTED_CURRENCIES",
        value_delimiter = ',',
        default_value = "USD,GBP"
    )]
    pub accepted_currencies: Vec<Currency>,

    /// Additional card sources the sandbox charger declines
    #[arg(long = "decline-source")]
    pub declined_sources: Vec<String>,

    /// Maximum log level written to stderr
    #[arg(long, env = "CUSTOMER_PAYMENTS_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,
}

impl Settings {
    pub fn accepted_currencies(&self) -> AcceptedCurrencies {
        self.accepted_currencies.iter().copied().collect()
    }

    pub fn card_charger(&self) -> SandboxCardCharger {
        self.declined_sources
            .iter()
            .fold(SandboxCardCharger::new(), |charger, source| {
                charger.decline(source.clone())
            })
    }
}
