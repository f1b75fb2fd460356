//! Threshold-based risk detection over quarterly financial periods.
//!
//! Provides:
//! - Liquidity check on the latest current ratio
//! - Cash-flow vs net-income discrepancy check
//! - Operating leverage check against the year-ago period
//! - Per-detector outcomes that separate "no risk" from "insufficient data"

pub mod detectors;
pub mod engine;
pub mod findings;
pub mod metrics;

pub use detectors::{
    CashFlowDiscrepancyDetector, LiquidityDetector, OperatingLeverageDetector, RiskDetector,
};
pub use engine::{
    detect_risks, DetectorReport, RiskAssessment, RiskEngine, RiskEngineConfig, ZeroPolicy,
    YEAR_AGO_OFFSET,
};
pub use findings::{DetectorOutcome, RiskFinding, RiskFindingId, RiskSeverity};
pub use metrics::FinancialMetrics;
