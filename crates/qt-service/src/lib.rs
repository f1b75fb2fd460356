//! Report assembly for the Quarterly dashboard: company lookups, financial
//! periods with fallback, and risk findings in one response.

pub mod config;

pub use config::ServiceConfig;

use serde::Serialize;
use tracing::info;

use qt_data::{company_for, DataManager};
use qt_risk::{RiskAssessment, RiskEngine, RiskFinding};
use qt_types::{validation_error, Cik, Company, FinancialPeriod, QtResult};

/// Everything the company page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReport {
    pub company: Company,
    pub financials: Vec<FinancialPeriod>,
    pub risks: Vec<RiskFinding>,
    /// Outcome of every detector, including those that lacked data.
    pub assessment: RiskAssessment,
    pub source: String,
    #[serde(skip_serializing_if = "is_false")]
    pub fallback: bool,
}

/// Response body for a company search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Company>,
    pub count: usize,
    pub query: String,
    #[serde(skip_serializing_if = "is_false")]
    pub fallback: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Coordinates data retrieval and risk evaluation per request.
#[derive(Debug, Clone)]
pub struct ReportService {
    data: DataManager,
    engine: RiskEngine,
    quarters: usize,
}

impl ReportService {
    pub fn new(data: DataManager, engine: RiskEngine, quarters: usize) -> Self {
        Self {
            data,
            engine,
            quarters,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> QtResult<Self> {
        config.validate()?;
        let data = if config.offline {
            DataManager::offline()
        } else {
            DataManager::edgar(config.edgar.clone())?
        };
        Ok(Self::new(data, RiskEngine::new(config.risk.clone()), config.quarters))
    }

    pub fn quarters(&self) -> usize {
        self.quarters
    }

    /// Build the report for `cik` (digits, padded or not).
    pub async fn company_report(&self, cik: &str) -> QtResult<CompanyReport> {
        let cik = Cik::parse(cik)?;
        info!("Building company report for CIK {}", cik);

        let fetched = self.data.load_financials(&cik, self.quarters).await;
        let assessment = self.engine.assess(&fetched.data);
        let risks = assessment.findings();
        info!("Detected {} risks for CIK {}", risks.len(), cik);

        Ok(CompanyReport {
            company: company_for(&cik),
            financials: fetched.data,
            risks,
            assessment,
            source: fetched.source,
            fallback: fetched.fallback,
        })
    }

    /// Search companies by ticker or name.
    pub async fn search(&self, query: &str) -> QtResult<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(validation_error!("Query parameter is required"));
        }

        let fetched = self.data.search(query).await;
        Ok(SearchResponse {
            count: fetched.data.len(),
            results: fetched.data,
            query: query.to_string(),
            fallback: fetched.fallback,
        })
    }
}
