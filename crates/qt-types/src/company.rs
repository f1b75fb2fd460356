use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DataError;

/// Width of a zero-padded CIK as used in EDGAR URLs.
pub const CIK_WIDTH: usize = 10;

/// Regulator-assigned Central Index Key, always stored zero-padded to ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cik(String);

impl Cik {
    /// Parse a CIK from user input. Accepts 1-10 ASCII digits, surrounding
    /// whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, DataError> {
        let trimmed = input.trim();
        let invalid = |reason: &str| DataError::InvalidCik {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if trimmed.len() > CIK_WIDTH {
            return Err(invalid("longer than 10 digits"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must contain only digits"));
        }

        Ok(Self(format!("{:0>width$}", trimmed, width = CIK_WIDTH)))
    }

    /// Build a CIK from the numeric form found in `company_tickers.json`.
    pub fn from_number(number: u64) -> Self {
        Self(format!("{:0>width$}", number, width = CIK_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cik {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cik {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cik> for String {
    fn from(cik: Cik) -> Self {
        cik.0
    }
}

/// A public filing entity as shown in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub cik: Cik,
    pub name: String,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl Company {
    pub fn new(cik: Cik, name: &str, ticker: &str) -> Self {
        Self {
            cik,
            name: name.to_string(),
            ticker: ticker.to_string(),
            exchange: None,
        }
    }

    pub fn with_exchange(mut self, exchange: &str) -> Self {
        self.exchange = Some(exchange.to_string());
        self
    }

    /// Case-insensitive substring match on ticker or name.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.ticker.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, CIK {})", self.name, self.ticker, self.cik)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cik_is_zero_padded() {
        let cik = Cik::parse("320193").unwrap();
        assert_eq!(cik.as_str(), "0000320193");
        assert_eq!(Cik::from_number(320193), cik);
        assert_eq!(" 0000320193 ".parse::<Cik>().unwrap(), cik);
    }

    #[test]
    fn cik_rejects_bad_input() {
        assert!(Cik::parse("").is_err());
        assert!(Cik::parse("AAPL").is_err());
        assert!(Cik::parse("12345678901").is_err());
        assert!(Cik::parse("-1").is_err());
    }

    #[test]
    fn cik_serializes_as_string() {
        let cik = Cik::parse("789019").unwrap();
        let json = serde_json::to_string(&cik).unwrap();
        assert_eq!(json, "\"0000789019\"");
        let back: Cik = serde_json::from_str("\"789019\"").unwrap();
        assert_eq!(back, cik);
        assert!(serde_json::from_str::<Cik>("\"abc\"").is_err());
    }

    #[test]
    fn company_matches_ticker_or_name() {
        let apple = Company::new(Cik::from_number(320193), "Apple Inc.", "AAPL")
            .with_exchange("NASDAQ");
        assert!(apple.matches("aapl"));
        assert!(apple.matches("APPLE"));
        assert!(apple.matches("inc"));
        assert!(!apple.matches("tesla"));
    }

    #[test]
    fn company_omits_missing_exchange() {
        let company = Company::new(Cik::from_number(1), "Example", "EX");
        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("exchange").is_none());
        assert_eq!(json["cik"], "0000000001");
    }
}
