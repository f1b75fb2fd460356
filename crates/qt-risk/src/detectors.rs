//! Threshold detectors over a most-recent-first period sequence.
//!
//! Each detector reads the periods it needs, computes one metric and compares
//! it with the threshold from [`RiskEngineConfig`]. Detectors never fail: a
//! missing input becomes [`DetectorOutcome::InsufficientData`].

use rust_decimal::Decimal;

use qt_types::financials::FinancialPeriod;
use qt_types::format::{format_currency, format_fixed};

use crate::engine::{RiskEngineConfig, ZeroPolicy};
use crate::findings::{DetectorOutcome, RiskFinding, RiskFindingId, RiskSeverity};
use crate::metrics::FinancialMetrics;

/// A single risk check.
pub trait RiskDetector: Send + Sync {
    /// Identifier attached to findings from this detector.
    fn id(&self) -> RiskFindingId;

    /// Evaluate `periods` (index 0 is the latest period).
    fn evaluate(&self, periods: &[FinancialPeriod], config: &RiskEngineConfig) -> DetectorOutcome;
}

/// Current ratio of the latest period below the liquidity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityDetector;

impl RiskDetector for LiquidityDetector {
    fn id(&self) -> RiskFindingId {
        RiskFindingId::LiquidityRisk
    }

    fn evaluate(&self, periods: &[FinancialPeriod], config: &RiskEngineConfig) -> DetectorOutcome {
        let Some(latest) = periods.first() else {
            return DetectorOutcome::insufficient("no periods supplied");
        };
        let policy = config.zero_policy;
        let (Some(assets), Some(liabilities)) =
            (policy.resolve(latest.assets), policy.resolve(latest.liabilities))
        else {
            return DetectorOutcome::insufficient("assets or liabilities unavailable");
        };

        // Zero liabilities: nothing owed, liquidity is unbounded.
        let Some(ratio) = FinancialMetrics::current_ratio(assets, liabilities) else {
            return DetectorOutcome::Clear;
        };

        let threshold = config.liquidity_threshold;
        if ratio >= threshold {
            return DetectorOutcome::Clear;
        }

        DetectorOutcome::Risk(RiskFinding::new(
            self.id(),
            RiskSeverity::High,
            format!(
                "Current ratio ({}) below threshold {}",
                format_fixed(ratio, 2),
                threshold.normalize()
            ),
            ratio,
            threshold,
            vec![
                format!("Assets: {}", format_currency(assets)),
                format!("Liabilities: {}", format_currency(liabilities)),
            ],
        ))
    }
}

/// Operating cash flow diverging from reported net income.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowDiscrepancyDetector;

impl RiskDetector for CashFlowDiscrepancyDetector {
    fn id(&self) -> RiskFindingId {
        RiskFindingId::CashFlowDiscrepancy
    }

    fn evaluate(&self, periods: &[FinancialPeriod], config: &RiskEngineConfig) -> DetectorOutcome {
        let Some(latest) = periods.first() else {
            return DetectorOutcome::insufficient("no periods supplied");
        };
        let policy = config.zero_policy;
        let (Some(net_income), Some(operating_cash_flow)) = (
            policy.resolve(latest.net_income),
            policy.resolve(latest.operating_cash_flow),
        ) else {
            return DetectorOutcome::insufficient("net income or operating cash flow unavailable");
        };

        let Some(discrepancy_pct) =
            FinancialMetrics::cash_flow_discrepancy_pct(net_income, operating_cash_flow)
        else {
            return DetectorOutcome::insufficient("net income is zero");
        };

        let threshold = config.cash_flow_threshold_pct;
        if discrepancy_pct <= threshold {
            return DetectorOutcome::Clear;
        }

        DetectorOutcome::Risk(RiskFinding::new(
            self.id(),
            RiskSeverity::Medium,
            format!(
                "Operating cash flow differs from net income by {}%",
                format_fixed(discrepancy_pct, 1)
            ),
            discrepancy_pct,
            threshold,
            vec![
                format!("Net Income: {}", format_currency(net_income)),
                format!("Operating Cash Flow: {}", format_currency(operating_cash_flow)),
            ],
        ))
    }
}

/// Income swinging disproportionately to revenue against the comparison period.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatingLeverageDetector;

impl OperatingLeverageDetector {
    /// Revenue and net income for (latest, prior), or the reason they are unusable.
    fn inputs(
        latest: &FinancialPeriod,
        prior: &FinancialPeriod,
        policy: ZeroPolicy,
    ) -> Result<[Decimal; 4], &'static str> {
        let fields = [
            latest.revenue,
            prior.revenue,
            latest.net_income,
            prior.net_income,
        ];
        match policy {
            ZeroPolicy::ZeroAsMissing => Ok(fields.map(Option::unwrap_or_default)),
            ZeroPolicy::PresenceAware => {
                let [Some(new_rev), Some(old_rev), Some(new_inc), Some(old_inc)] = fields else {
                    return Err("revenue or net income unavailable");
                };
                Ok([new_rev, old_rev, new_inc, old_inc])
            }
        }
    }
}

impl RiskDetector for OperatingLeverageDetector {
    fn id(&self) -> RiskFindingId {
        RiskFindingId::OperatingLeverage
    }

    fn evaluate(&self, periods: &[FinancialPeriod], config: &RiskEngineConfig) -> DetectorOutcome {
        let offset = config.comparison_offset;
        let (Some(latest), Some(prior)) = (periods.first(), periods.get(offset)) else {
            return DetectorOutcome::insufficient(format!(
                "needs at least {} periods, got {}",
                offset + 1,
                periods.len()
            ));
        };

        let [new_revenue, old_revenue, new_income, old_income] =
            match Self::inputs(latest, prior, config.zero_policy) {
                Ok(inputs) => inputs,
                Err(reason) => return DetectorOutcome::insufficient(reason),
            };

        if old_revenue.is_zero() || old_income.is_zero() {
            return DetectorOutcome::insufficient("prior-period revenue or net income is zero");
        }

        let (Some(revenue_change), Some(income_change)) = (
            FinancialMetrics::percent_change(old_revenue, new_revenue),
            FinancialMetrics::percent_change(old_income, new_income),
        ) else {
            return DetectorOutcome::insufficient("change percentage out of range");
        };
        let leverage = FinancialMetrics::operating_leverage(revenue_change, income_change);

        let threshold = config.leverage_threshold;
        if leverage.abs() <= threshold {
            return DetectorOutcome::Clear;
        }

        DetectorOutcome::Risk(RiskFinding::new(
            self.id(),
            RiskSeverity::High,
            format!("High operating leverage ({}x)", format_fixed(leverage, 2)),
            leverage,
            threshold,
            vec![
                format!("Revenue change: {}%", format_fixed(revenue_change, 1)),
                format!("Income change: {}%", format_fixed(income_change, 1)),
            ],
        ))
    }
}
