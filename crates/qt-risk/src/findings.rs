//! Risk finding types and severity levels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a risk finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskSeverity {
    /// Worth noting, no action implied.
    Low,
    /// Earnings quality concern that warrants a closer look.
    Medium,
    /// Solvency or earnings stability concern.
    High,
}

impl RiskSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::Low => "LOW",
            RiskSeverity::Medium => "MEDIUM",
            RiskSeverity::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of the detector that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFindingId {
    /// Current ratio below the liquidity threshold.
    LiquidityRisk,
    /// Operating cash flow diverging from net income.
    CashFlowDiscrepancy,
    /// Income moving disproportionately to revenue year over year.
    OperatingLeverage,
}

impl RiskFindingId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFindingId::LiquidityRisk => "liquidity-risk",
            RiskFindingId::CashFlowDiscrepancy => "cash-flow-discrepancy",
            RiskFindingId::OperatingLeverage => "operating-leverage",
        }
    }

    /// Human-readable title shown on the finding card.
    pub fn title(&self) -> &'static str {
        match self {
            RiskFindingId::LiquidityRisk => "Liquidity Risk",
            RiskFindingId::CashFlowDiscrepancy => "Cash Flow Discrepancy",
            RiskFindingId::OperatingLeverage => "Operating Leverage Risk",
        }
    }

    /// Label of the quantity the detector evaluates.
    pub fn metric(&self) -> &'static str {
        match self {
            RiskFindingId::LiquidityRisk => "Current Ratio",
            RiskFindingId::CashFlowDiscrepancy => "Cash Flow vs Net Income",
            RiskFindingId::OperatingLeverage => "Operating Leverage",
        }
    }
}

impl fmt::Display for RiskFindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected risk condition, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFinding {
    pub id: RiskFindingId,
    pub severity: RiskSeverity,
    pub title: String,
    pub description: String,
    pub metric: String,
    pub current_value: Decimal,
    pub threshold: Decimal,
    /// Raw inputs cited in support of the finding, in display order.
    pub evidence: Vec<String>,
}

impl RiskFinding {
    /// Create a finding whose title and metric label come from `id`.
    pub fn new(
        id: RiskFindingId,
        severity: RiskSeverity,
        description: String,
        current_value: Decimal,
        threshold: Decimal,
        evidence: Vec<String>,
    ) -> Self {
        Self {
            id,
            severity,
            title: id.title().to_string(),
            description,
            metric: id.metric().to_string(),
            current_value,
            threshold,
            evidence,
        }
    }
}

/// Result of running one detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectorOutcome {
    /// The condition was evaluated and breached its threshold.
    Risk(RiskFinding),
    /// The condition was evaluated and is within range.
    Clear,
    /// A required input was unknown or made the metric undefined.
    InsufficientData { reason: String },
}

impl DetectorOutcome {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        DetectorOutcome::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn finding(&self) -> Option<&RiskFinding> {
        match self {
            DetectorOutcome::Risk(finding) => Some(finding),
            _ => None,
        }
    }

    pub fn into_finding(self) -> Option<RiskFinding> {
        match self {
            DetectorOutcome::Risk(finding) => Some(finding),
            _ => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, DetectorOutcome::InsufficientData { .. })
    }
}
