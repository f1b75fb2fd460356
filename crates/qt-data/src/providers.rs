use async_trait::async_trait;
use chrono::{Months, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use qt_types::{quarter_label, Cik, Company, FinancialPeriod, QtResult};

use crate::directory::{filter_companies, popular_companies};

/// Most periods a single request may ask for (ten years of quarters).
pub const MAX_QUARTERS: usize = 40;

/// Source of per-period financial snapshots for a company
#[async_trait]
pub trait FinancialFeed: Send + Sync + std::fmt::Debug {
    /// Get provider name
    fn name(&self) -> &str;

    /// Fetch at most `quarters` periods for `cik`, most recent first
    async fn fetch_periods(&self, cik: &Cik, quarters: usize) -> QtResult<Vec<FinancialPeriod>>;
}

/// Lookup of public companies by ticker or name
#[async_trait]
pub trait CompanyDirectory: Send + Sync + std::fmt::Debug {
    /// Get provider name
    fn name(&self) -> &str;

    /// Companies whose ticker or name contains `query` (case-insensitive)
    async fn search(&self, query: &str) -> QtResult<Vec<Company>>;
}

/// Deterministic synthetic provider for offline use and upstream outages.
///
/// Figures are seeded from the CIK so the same company always gets the same
/// numbers; period labels count backwards from `reference_date`.
#[derive(Debug, Clone)]
pub struct SampleProvider {
    pub name: String,
    pub reference_date: NaiveDate,
}

impl SampleProvider {
    pub fn new() -> Self {
        Self::with_reference_date(Utc::now().date_naive())
    }

    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            name: "Sample Data Provider".to_string(),
            reference_date,
        }
    }

    /// Synthetic quarterly figures in the shape of a large-cap filer, capped
    /// at [`MAX_QUARTERS`] periods.
    pub fn generate_periods(&self, cik: &Cik, quarters: usize) -> Vec<FinancialPeriod> {
        let seed = cik.as_str().parse::<u64>().unwrap_or_default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        (0..quarters.min(MAX_QUARTERS))
            .map(|i| {
                let months = u32::try_from(i * 3).unwrap_or(u32::MAX);
                let date = self
                    .reference_date
                    .checked_sub_months(Months::new(months))
                    .unwrap_or(NaiveDate::MIN);

                let revenue = 100_000_000_000.0 + rng.random::<f64>() * 20_000_000_000.0;
                let mut share = |base: f64, spread: f64| {
                    to_amount(revenue * base + rng.random::<f64>() * revenue * spread)
                };

                let net_income = share(0.20, 0.05);
                let assets = share(3.0, 0.2);
                let liabilities = share(1.5, 0.1);
                let equity = share(1.5, 0.1);
                let cash = share(0.3, 0.1);
                let operating_cash_flow = share(0.25, 0.05);

                FinancialPeriod::new(quarter_label(date))
                    .with_revenue(to_amount(revenue))
                    .with_net_income(net_income)
                    .with_assets(assets)
                    .with_liabilities(liabilities)
                    .with_equity(equity)
                    .with_cash(cash)
                    .with_operating_cash_flow(operating_cash_flow)
            })
            .collect()
    }

    /// Popular companies matching `query`.
    pub fn search_popular(&self, query: &str) -> Vec<Company> {
        filter_companies(popular_companies(), query)
    }
}

impl Default for SampleProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn to_amount(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(2)
}

#[async_trait]
impl FinancialFeed for SampleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_periods(&self, cik: &Cik, quarters: usize) -> QtResult<Vec<FinancialPeriod>> {
        Ok(self.generate_periods(cik, quarters))
    }
}

#[async_trait]
impl CompanyDirectory for SampleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> QtResult<Vec<Company>> {
        Ok(self.search_popular(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SampleProvider {
        SampleProvider::with_reference_date(NaiveDate::from_ymd_opt(2024, 11, 15).unwrap())
    }

    fn apple() -> Cik {
        Cik::parse("320193").unwrap()
    }

    #[test]
    fn periods_are_labelled_backwards_from_reference() {
        let periods = provider().generate_periods(&apple(), 6);
        let labels: Vec<_> = periods.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Q4 2024", "Q3 2024", "Q2 2024", "Q1 2024", "Q4 2023", "Q3 2023"]
        );
    }

    #[test]
    fn generation_is_deterministic_per_cik() {
        let first = provider().generate_periods(&apple(), 4);
        let second = provider().generate_periods(&apple(), 4);
        assert_eq!(first, second);

        let other = provider().generate_periods(&Cik::parse("789019").unwrap(), 4);
        assert_ne!(first[0].revenue, other[0].revenue);
    }

    #[test]
    fn figures_stay_in_expected_ranges() {
        for period in provider().generate_periods(&apple(), 12) {
            let revenue = period.revenue.unwrap();
            assert!(revenue >= Decimal::from(100_000_000_000u64));
            assert!(revenue <= Decimal::from(120_000_000_000u64));

            // Assets ~3x and liabilities ~1.5x revenue keep the current ratio near 2.
            let ratio = period.assets.unwrap() / period.liabilities.unwrap();
            assert!(ratio > Decimal::new(15, 1));
            assert!(period.operating_cash_flow.is_some());
            assert!(period.cash.is_some());
            assert!(period.equity.is_some());
        }
    }

    #[test]
    fn zero_quarters_yields_nothing() {
        assert!(provider().generate_periods(&apple(), 0).is_empty());
    }

    #[test]
    fn oversized_requests_are_capped() {
        let periods = provider().generate_periods(&Cik::parse("1").unwrap(), usize::MAX);
        assert_eq!(periods.len(), MAX_QUARTERS);
    }

    #[tokio::test]
    async fn trait_impls_delegate_to_generators() {
        let provider = provider();
        let periods = FinancialFeed::fetch_periods(&provider, &apple(), 3).await.unwrap();
        assert_eq!(periods.len(), 3);

        let results = CompanyDirectory::search(&provider, "nvidia").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "NVDA");
        assert_eq!(FinancialFeed::name(&provider), "Sample Data Provider");
    }
}
