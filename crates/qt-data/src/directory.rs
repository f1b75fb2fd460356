//! Built-in directory of well-known filers, used for name/ticker lookups and
//! as the search fallback when EDGAR is unreachable.

use qt_types::{Cik, Company};

/// Upper bound on search results returned to the caller.
pub const MAX_SEARCH_RESULTS: usize = 20;

static POPULAR: [(u64, &str, &str, &str); 10] = [
    (320193, "Apple Inc.", "AAPL", "NASDAQ"),
    (1318605, "Tesla Inc.", "TSLA", "NASDAQ"),
    (789019, "Microsoft Corp.", "MSFT", "NASDAQ"),
    (1018724, "Amazon.com Inc.", "AMZN", "NASDAQ"),
    (1652044, "Alphabet Inc.", "GOOGL", "NASDAQ"),
    (51143, "International Business Machines Corp.", "IBM", "NYSE"),
    (1326801, "Meta Platforms Inc.", "META", "NASDAQ"),
    (1045810, "NVIDIA Corp.", "NVDA", "NASDAQ"),
    (21344, "Coca-Cola Co.", "KO", "NYSE"),
    (200406, "Johnson & Johnson", "JNJ", "NYSE"),
];

pub fn popular_companies() -> Vec<Company> {
    POPULAR
        .iter()
        .map(|&(cik, name, ticker, exchange)| {
            Company::new(Cik::from_number(cik), name, ticker).with_exchange(exchange)
        })
        .collect()
}

fn lookup(cik: &Cik) -> Option<&'static (u64, &'static str, &'static str, &'static str)> {
    POPULAR
        .iter()
        .find(|(number, ..)| Cik::from_number(*number) == *cik)
}

/// Display name for `cik`, or `Company <cik>` when it is not a known filer.
pub fn company_name(cik: &Cik) -> String {
    lookup(cik)
        .map(|(_, name, ..)| name.to_string())
        .unwrap_or_else(|| format!("Company {}", cik))
}

/// Ticker for `cik`, or `N/A` when it is not a known filer.
pub fn company_ticker(cik: &Cik) -> String {
    lookup(cik)
        .map(|(_, _, ticker, _)| ticker.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Company record for a report header.
pub fn company_for(cik: &Cik) -> Company {
    let company = Company::new(cik.clone(), &company_name(cik), &company_ticker(cik));
    match lookup(cik) {
        Some((.., exchange)) => company.with_exchange(exchange),
        None => company,
    }
}

/// Keep companies whose ticker or name contains `query`, capped at
/// [`MAX_SEARCH_RESULTS`], preserving input order.
pub fn filter_companies<I>(companies: I, query: &str) -> Vec<Company>
where
    I: IntoIterator<Item = Company>,
{
    companies
        .into_iter()
        .filter(|company| company.matches(query))
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_cik_resolves_name_and_ticker() {
        let cik = Cik::parse("320193").unwrap();
        assert_eq!(company_name(&cik), "Apple Inc.");
        assert_eq!(company_ticker(&cik), "AAPL");
        assert_eq!(company_for(&cik).exchange.as_deref(), Some("NASDAQ"));
    }

    #[test]
    fn unknown_cik_uses_placeholders() {
        let cik = Cik::parse("42").unwrap();
        assert_eq!(company_name(&cik), "Company 0000000042");
        assert_eq!(company_ticker(&cik), "N/A");
        assert!(company_for(&cik).exchange.is_none());
    }

    #[test]
    fn filter_matches_ticker_and_name() {
        let results = filter_companies(popular_companies(), "co");
        let tickers: Vec<_> = results.iter().map(|c| c.ticker.as_str()).collect();
        // "Coca-Cola Co." by name, "Microsoft Corp." / "NVIDIA Corp." / "IBM ... Corp." by name.
        assert!(tickers.contains(&"KO"));
        assert!(tickers.contains(&"MSFT"));
        assert!(!tickers.contains(&"AAPL"));

        let results = filter_companies(popular_companies(), "TSLA");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Tesla Inc.");
    }

    #[test]
    fn filter_caps_result_count() {
        let many = (1..=50u64).map(|n| Company::new(Cik::from_number(n), "Acme Holdings", "ACME"));
        assert_eq!(filter_companies(many, "acme").len(), MAX_SEARCH_RESULTS);
    }
}
