use serde::{Deserialize, Serialize};

/// Host serving XBRL company facts and submissions.
pub const SEC_DATA_URL: &str = "https://data.sec.gov";
/// Host serving the public ticker directory.
pub const SEC_WWW_URL: &str = "https://www.sec.gov";
/// EDGAR rejects anonymous clients; requests must identify the caller.
pub const DEFAULT_USER_AGENT: &str = "Quarterly/0.1.0 (Financial risk dashboard; ops@quarterly.invalid)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the SEC EDGAR endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgarConfig {
    pub data_url: String,
    pub www_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            data_url: SEC_DATA_URL.to_string(),
            www_url: SEC_WWW_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EdgarConfig {
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Point both endpoints at one host (used for mirrors and local fixtures).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.data_url = base_url.to_string();
        self.www_url = base_url.to_string();
        self
    }

    pub fn company_tickers_url(&self) -> String {
        format!("{}/files/company_tickers.json", self.www_url.trim_end_matches('/'))
    }

    pub fn company_facts_url(&self, cik: &qt_types::Cik) -> String {
        format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            self.data_url.trim_end_matches('/'),
            cik
        )
    }
}
