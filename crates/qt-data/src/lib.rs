pub mod directory;
pub mod edgar;
pub mod providers;
pub mod sources;

pub use directory::*;
pub use edgar::*;
pub use providers::*;
pub use sources::*;

use std::sync::Arc;

use qt_types::{Cik, Company, FinancialPeriod, QtError, QtResult};
use serde::Serialize;
use tracing::{info, warn};

/// Data returned by the manager together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fetched<T> {
    pub data: T,
    /// Name of the provider that produced `data`.
    pub source: String,
    /// True when the primary provider failed and synthetic data was substituted.
    pub fallback: bool,
}

/// Data manager coordinates the primary providers with the synthetic fallback.
///
/// Fetch failures never reach the caller: they are logged and replaced by
/// [`SampleProvider`] output, flagged through [`Fetched::fallback`].
#[derive(Debug, Clone)]
pub struct DataManager {
    feed: Arc<dyn FinancialFeed>,
    directory: Arc<dyn CompanyDirectory>,
    sample: SampleProvider,
}

impl DataManager {
    pub fn new(feed: Arc<dyn FinancialFeed>, directory: Arc<dyn CompanyDirectory>) -> Self {
        Self {
            feed,
            directory,
            sample: SampleProvider::new(),
        }
    }

    /// EDGAR-backed manager.
    pub fn edgar(config: EdgarConfig) -> QtResult<Self> {
        let provider = Arc::new(EdgarProvider::new(config)?);
        Ok(Self::new(provider.clone(), provider))
    }

    /// Manager that never touches the network.
    pub fn offline() -> Self {
        let sample = Arc::new(SampleProvider::new());
        Self::new(sample.clone(), sample)
    }

    /// Replace the fallback generator (e.g. to pin its reference date).
    pub fn with_sample(mut self, sample: SampleProvider) -> Self {
        self.sample = sample;
        self
    }

    /// Periods for `cik`, most recent first.
    pub async fn load_financials(&self, cik: &Cik, quarters: usize) -> Fetched<Vec<FinancialPeriod>> {
        match self.feed.fetch_periods(cik, quarters).await {
            Ok(periods) => {
                info!("Loaded {} periods for CIK {} from {}", periods.len(), cik, self.feed.name());
                Fetched {
                    data: periods,
                    source: self.feed.name().to_string(),
                    fallback: false,
                }
            }
            Err(e) => {
                match &e {
                    QtError::Data(data) if !data.is_upstream() => {
                        info!("No usable financials from {} for CIK {}: {}; using sample data", self.feed.name(), cik, e)
                    }
                    _ => warn!("Financials fetch from {} failed for CIK {}: {}; using sample data", self.feed.name(), cik, e),
                }
                Fetched {
                    data: self.sample.generate_periods(cik, quarters),
                    source: self.sample.name.clone(),
                    fallback: true,
                }
            }
        }
    }

    /// Companies matching `query`.
    pub async fn search(&self, query: &str) -> Fetched<Vec<Company>> {
        match self.directory.search(query).await {
            Ok(companies) => Fetched {
                data: companies,
                source: self.directory.name().to_string(),
                fallback: false,
            },
            Err(e) => {
                warn!("Company search via {} failed for '{}': {}; using popular companies", self.directory.name(), query, e);
                Fetched {
                    data: self.sample.search_popular(query),
                    source: self.sample.name.clone(),
                    fallback: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use qt_types::DataError;
    use rust_decimal_macros::dec;

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl FinancialFeed for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_periods(&self, _cik: &Cik, _quarters: usize) -> QtResult<Vec<FinancialPeriod>> {
            Err(DataError::Http {
                status: 503,
                url: "https://data.sec.gov".to_string(),
            }
            .into())
        }
    }

    #[async_trait]
    impl CompanyDirectory for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn search(&self, _query: &str) -> QtResult<Vec<Company>> {
            Err(DataError::Request {
                message: "connection refused".to_string(),
            }
            .into())
        }
    }

    #[derive(Debug)]
    struct FixedProvider(Vec<FinancialPeriod>);

    #[async_trait]
    impl FinancialFeed for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_periods(&self, _cik: &Cik, quarters: usize) -> QtResult<Vec<FinancialPeriod>> {
            Ok(self.0.iter().take(quarters).cloned().collect())
        }
    }

    fn sample() -> SampleProvider {
        SampleProvider::with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    fn failing_manager() -> DataManager {
        let failing = Arc::new(FailingProvider);
        DataManager::new(failing.clone(), failing).with_sample(sample())
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_sample_data() {
        let cik = Cik::parse("320193").unwrap();
        let fetched = failing_manager().load_financials(&cik, 8).await;

        assert!(fetched.fallback);
        assert_eq!(fetched.source, "Sample Data Provider");
        assert_eq!(fetched.data, sample().generate_periods(&cik, 8));
    }

    #[tokio::test]
    async fn failed_search_falls_back_to_popular_companies() {
        let fetched = failing_manager().search("apple").await;
        assert!(fetched.fallback);
        assert_eq!(fetched.data.len(), 1);
        assert_eq!(fetched.data[0].ticker, "AAPL");
    }

    #[tokio::test]
    async fn successful_fetch_is_passed_through() {
        let periods = vec![
            FinancialPeriod::new("Q2 2024").with_revenue(dec!(10)),
            FinancialPeriod::new("Q1 2024").with_revenue(dec!(9)),
        ];
        let manager = DataManager::new(
            Arc::new(FixedProvider(periods.clone())),
            Arc::new(sample()),
        );
        let fetched = manager.load_financials(&Cik::parse("1").unwrap(), 12).await;

        assert!(!fetched.fallback);
        assert_eq!(fetched.source, "fixed");
        assert_eq!(fetched.data, periods);
    }

    #[tokio::test]
    async fn offline_manager_uses_sample_provider() {
        let manager = DataManager::offline();
        let fetched = manager.search("meta").await;
        assert!(!fetched.fallback);
        assert_eq!(fetched.data[0].ticker, "META");

        let periods = manager.load_financials(&Cik::parse("1326801").unwrap(), 4).await;
        assert_eq!(periods.data.len(), 4);
        assert!(!periods.fallback);
    }
}
