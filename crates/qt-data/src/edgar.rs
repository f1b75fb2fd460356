//! SEC EDGAR provider: ticker directory search and XBRL company facts.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use serde::Deserialize;

use qt_types::{quarter_label, Cik, Company, DataError, FinancialPeriod, QtError, QtResult};

use crate::directory::filter_companies;
use crate::providers::{CompanyDirectory, FinancialFeed};
use crate::sources::EdgarConfig;

/// Filing forms whose facts are used.
const ACCEPTED_FORMS: [&str; 2] = ["10-Q", "10-K"];

const REVENUE_CONCEPTS: [&str; 2] = [
    "Revenues",
    "RevenueFromContractWithCustomerExcludingAssessedTax",
];
const NET_INCOME: &str = "NetIncomeLoss";
const ASSETS: &str = "Assets";
const LIABILITIES: &str = "Liabilities";
const EQUITY: &str = "StockholdersEquity";
const CASH: &str = "CashAndCashEquivalentsAtCarryingValue";
const OPERATING_CASH_FLOW: &str = "NetCashProvidedByUsedInOperatingActivities";

/// Exchange label for companies found through the EDGAR directory.
const EDGAR_EXCHANGE: &str = "US Market";

/// Day span of a three-month duration fact, with slack for 52/53-week years.
const QUARTER_SPAN_DAYS: std::ops::RangeInclusive<i64> = 80..=100;

#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct CompanyFacts {
    #[serde(default)]
    facts: Taxonomies,
}

#[derive(Debug, Default, Deserialize)]
struct Taxonomies {
    #[serde(rename = "us-gaap", default)]
    us_gaap: HashMap<String, Concept>,
}

#[derive(Debug, Default, Deserialize)]
struct Concept {
    #[serde(default)]
    units: HashMap<String, Vec<Fact>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Fact {
    #[serde(default)]
    start: Option<NaiveDate>,
    end: NaiveDate,
    val: Decimal,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<NaiveDate>,
}

impl Fact {
    fn is_periodic_filing(&self) -> bool {
        self.form
            .as_deref()
            .map(|form| ACCEPTED_FORMS.contains(&form))
            .unwrap_or(false)
    }

    /// Instant facts (balance sheet) count as quarterly.
    fn is_quarterly(&self) -> bool {
        match self.start {
            Some(start) => QUARTER_SPAN_DAYS.contains(&(self.end - start).num_days()),
            None => true,
        }
    }

    /// Ranking among facts sharing an end date: a three-month span first,
    /// then the shortest span, then the most recent filing.
    fn preference(&self) -> (bool, Option<NaiveDate>, Option<NaiveDate>) {
        (self.is_quarterly(), self.start, self.filed)
    }
}

/// Parse `company_tickers.json` into companies in EDGAR's listing order.
pub fn parse_company_tickers(json: &str) -> QtResult<Vec<Company>> {
    let raw: HashMap<String, TickerEntry> =
        serde_json::from_str(json).map_err(|e| DataError::ParseError {
            message: format!("company_tickers.json: {}", e),
        })?;

    let mut entries: Vec<(u64, TickerEntry)> = raw
        .into_iter()
        .map(|(key, entry)| (key.parse::<u64>().unwrap_or(u64::MAX), entry))
        .collect();
    entries.sort_by_key(|(rank, _)| *rank);

    Ok(entries
        .into_iter()
        .map(|(_, entry)| {
            Company::new(Cik::from_number(entry.cik_str), &entry.title, &entry.ticker)
                .with_exchange(EDGAR_EXCHANGE)
        })
        .collect())
}

/// Values of one USD concept keyed by period end, restricted to 10-Q/10-K facts.
fn concept_by_end(us_gaap: &HashMap<String, Concept>, concept: &str) -> BTreeMap<NaiveDate, Decimal> {
    let mut best: BTreeMap<NaiveDate, Fact> = BTreeMap::new();
    let facts = us_gaap
        .get(concept)
        .and_then(|c| c.units.get("USD"))
        .map(Vec::as_slice)
        .unwrap_or_default();

    for fact in facts.iter().filter(|f| f.is_periodic_filing()) {
        match best.get(&fact.end) {
            Some(existing) if existing.preference() > fact.preference() => {}
            _ => {
                best.insert(fact.end, fact.clone());
            }
        }
    }

    best.into_iter().map(|(end, fact)| (end, fact.val)).collect()
}

/// Build most-recent-first periods from an XBRL `companyfacts` document.
///
/// Periods are keyed by the revenue fact end dates; every other concept is
/// joined on the same end date and left `None` when not reported. Where a
/// three-month fact exists for an end date it is used.
///
/// Filers usually report no separate fourth-quarter figure: at a fiscal
/// year-end the only revenue and income facts are the 10-K annual totals, so
/// that period carries twelve months of flow figures next to quarterly ones.
/// Comparisons that touch a fiscal year-end period (the leverage check
/// against the year-ago period) are skewed accordingly.
pub fn parse_company_facts(json: &str, cik: &Cik, quarters: usize) -> QtResult<Vec<FinancialPeriod>> {
    let document: CompanyFacts = serde_json::from_str(json).map_err(|e| DataError::ParseError {
        message: format!("companyfacts for CIK {}: {}", cik, e),
    })?;
    let us_gaap = &document.facts.us_gaap;

    let revenue = REVENUE_CONCEPTS
        .iter()
        .map(|concept| concept_by_end(us_gaap, concept))
        .find(|values| !values.is_empty())
        .ok_or_else(|| DataError::NoFinancialData {
            cik: cik.to_string(),
        })?;

    let net_income = concept_by_end(us_gaap, NET_INCOME);
    let assets = concept_by_end(us_gaap, ASSETS);
    let liabilities = concept_by_end(us_gaap, LIABILITIES);
    let equity = concept_by_end(us_gaap, EQUITY);
    let cash = concept_by_end(us_gaap, CASH);
    let operating_cash_flow = concept_by_end(us_gaap, OPERATING_CASH_FLOW);

    Ok(revenue
        .iter()
        .rev()
        .take(quarters)
        .map(|(end, value)| FinancialPeriod {
            period: quarter_label(*end),
            revenue: Some(*value),
            net_income: net_income.get(end).copied(),
            assets: assets.get(end).copied(),
            liabilities: liabilities.get(end).copied(),
            equity: equity.get(end).copied(),
            cash: cash.get(end).copied(),
            operating_cash_flow: operating_cash_flow.get(end).copied(),
        })
        .collect())
}

/// SEC EDGAR HTTP provider
#[derive(Debug)]
pub struct EdgarProvider {
    pub name: String,
    config: EdgarConfig,
    client: reqwest::Client,
}

impl EdgarProvider {
    pub fn new(config: EdgarConfig) -> QtResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Request {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            name: "SEC EDGAR".to_string(),
            config,
            client,
        })
    }

    pub fn config(&self) -> &EdgarConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> QtResult<String> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DataError::Request {
                message: format!("HTTP request to {} failed: {}", url, e),
            })?;

        if !response.status().is_success() {
            return Err(DataError::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| DataError::Request {
            message: format!("failed to read body from {}: {}", url, e),
        })?;
        Ok(body)
    }
}

#[async_trait]
impl FinancialFeed for EdgarProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_periods(&self, cik: &Cik, quarters: usize) -> QtResult<Vec<FinancialPeriod>> {
        let url = self.config.company_facts_url(cik);
        tracing::info!("Fetching company facts for CIK {}", cik);

        let body = match self.get_text(&url).await {
            Err(QtError::Data(DataError::Http { status: 404, .. })) => {
                return Err(DataError::CompanyNotFound {
                    cik: cik.to_string(),
                }
                .into())
            }
            other => other?,
        };
        let periods = parse_company_facts(&body, cik, quarters)?;

        tracing::info!("Parsed {} periods for CIK {}", periods.len(), cik);
        Ok(periods)
    }
}

#[async_trait]
impl CompanyDirectory for EdgarProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> QtResult<Vec<Company>> {
        let url = self.config.company_tickers_url();
        tracing::info!("Searching EDGAR directory for '{}'", query);

        let body = self.get_text(&url).await?;
        let companies = parse_company_tickers(&body)?;
        tracing::debug!("EDGAR directory lists {} companies", companies.len());

        let results = filter_companies(companies, query);
        tracing::info!("Found {} companies matching '{}'", results.len(), query);
        Ok(results)
    }
}
