use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "EUR" => Ok(Currency::Eur),
            other => Err(format!("unknown currency code: {other}")),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

/// The whitelist of currencies the payment processor will charge.
///
/// Defaults to USD and GBP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCurrencies(BTreeSet<Currency>);

impl AcceptedCurrencies {
    pub fn new(currencies: impl IntoIterator<Item = Currency>) -> Self {
        Self(currencies.into_iter().collect())
    }

    pub fn contains(&self, currency: Currency) -> bool {
        self.0.contains(&currency)
    }
}

impl Default for AcceptedCurrencies {
    fn default() -> Self {
        Self::new([Currency::Usd, Currency::Gbp])
    }
}

impl FromIterator<Currency> for AcceptedCurrencies {
    fn from_iter<I: IntoIterator<Item = Currency>>(iter: I) -> Self {
        Self::new(iter)
    }
}
