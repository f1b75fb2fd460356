//! Risk engine: runs every detector over a period sequence in fixed order.
//!
//! [`RiskEngine::assess`] keeps one [`DetectorOutcome`] per detector so callers
//! can tell "no risk" apart from "could not evaluate"; [`detect_risks`] keeps
//! only the findings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qt_types::errors::QtResult;
use qt_types::financials::FinancialPeriod;
use qt_types::validation_error;

use crate::detectors::{
    CashFlowDiscrepancyDetector, LiquidityDetector, OperatingLeverageDetector, RiskDetector,
};
use crate::findings::{DetectorOutcome, RiskFinding, RiskFindingId};

/// Positional distance from the latest period to its "year-ago" comparison
/// period. Four quarters back when the feed supplies one period per quarter.
pub const YEAR_AGO_OFFSET: usize = 3;

/// How a reported zero is treated by the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    /// Only an absent value suppresses a check; zero is evaluated.
    #[default]
    PresenceAware,
    /// Zero is indistinguishable from absent, matching the dashboard's
    /// historical output.
    ZeroAsMissing,
}

impl ZeroPolicy {
    /// Apply the policy to a raw field value.
    pub fn resolve(self, value: Option<Decimal>) -> Option<Decimal> {
        match self {
            ZeroPolicy::PresenceAware => value,
            ZeroPolicy::ZeroAsMissing => value.filter(|v| !v.is_zero()),
        }
    }
}

/// Configuration for the risk engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskEngineConfig {
    /// Current ratio below which liquidity risk fires.
    pub liquidity_threshold: Decimal,
    /// Cash-flow vs net-income gap, in percent, above which a discrepancy fires.
    pub cash_flow_threshold_pct: Decimal,
    /// Absolute operating leverage above which leverage risk fires.
    pub leverage_threshold: Decimal,
    /// Index of the comparison period for the leverage detector.
    pub comparison_offset: usize,
    pub zero_policy: ZeroPolicy,
}

impl Default for RiskEngineConfig {
    fn default() -> Self {
        Self {
            liquidity_threshold: Decimal::new(15, 1),   // 1.5
            cash_flow_threshold_pct: Decimal::from(20), // 20%
            leverage_threshold: Decimal::new(30, 1),    // 3.0
            comparison_offset: YEAR_AGO_OFFSET,
            zero_policy: ZeroPolicy::PresenceAware,
        }
    }
}

impl RiskEngineConfig {
    /// Default thresholds with zero treated as missing.
    pub fn legacy() -> Self {
        Self {
            zero_policy: ZeroPolicy::ZeroAsMissing,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> QtResult<()> {
        if self.comparison_offset == 0 {
            return Err(validation_error!(
                "comparison_offset must be at least 1, got 0"
            ));
        }
        if self.liquidity_threshold.is_sign_negative()
            || self.cash_flow_threshold_pct.is_sign_negative()
            || self.leverage_threshold.is_sign_negative()
        {
            return Err(validation_error!("risk thresholds must not be negative"));
        }
        Ok(())
    }
}

/// Outcome of one detector within an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorReport {
    pub detector: RiskFindingId,
    pub outcome: DetectorOutcome,
}

/// Per-detector outcomes, in liquidity, cash-flow, leverage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub reports: Vec<DetectorReport>,
}

impl RiskAssessment {
    pub fn findings(&self) -> Vec<RiskFinding> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.finding().cloned())
            .collect()
    }

    pub fn into_findings(self) -> Vec<RiskFinding> {
        self.reports
            .into_iter()
            .filter_map(|r| r.outcome.into_finding())
            .collect()
    }

    pub fn outcome(&self, detector: RiskFindingId) -> Option<&DetectorOutcome> {
        self.reports
            .iter()
            .find(|r| r.detector == detector)
            .map(|r| &r.outcome)
    }
}

static DETECTORS: [&dyn RiskDetector; 3] = [
    &LiquidityDetector,
    &CashFlowDiscrepancyDetector,
    &OperatingLeverageDetector,
];

/// Stateless risk engine. Safe to share between concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskEngineConfig,
}

impl RiskEngine {
    pub fn new(config: RiskEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskEngineConfig {
        &self.config
    }

    /// Run every detector over `periods` (most recent first).
    pub fn assess(&self, periods: &[FinancialPeriod]) -> RiskAssessment {
        let reports = DETECTORS
            .iter()
            .map(|detector| {
                let outcome = detector.evaluate(periods, &self.config);
                match &outcome {
                    DetectorOutcome::Risk(finding) => {
                        info!(detector = %detector.id(), severity = %finding.severity, "{}", finding.description)
                    }
                    DetectorOutcome::InsufficientData { reason } => {
                        debug!(detector = %detector.id(), %reason, "detector skipped")
                    }
                    DetectorOutcome::Clear => debug!(detector = %detector.id(), "within threshold"),
                }
                DetectorReport {
                    detector: detector.id(),
                    outcome,
                }
            })
            .collect();

        RiskAssessment { reports }
    }

    /// Findings only, in fixed detector order.
    pub fn detect(&self, periods: &[FinancialPeriod]) -> Vec<RiskFinding> {
        if periods.is_empty() {
            return Vec::new();
        }
        self.assess(periods).into_findings()
    }
}

/// Detect risks with the default configuration. An absent sequence is an
/// empty slice and yields no findings.
pub fn detect_risks(periods: &[FinancialPeriod]) -> Vec<RiskFinding> {
    RiskEngine::default().detect(periods)
}
