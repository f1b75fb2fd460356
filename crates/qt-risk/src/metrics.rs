//! Financial metrics computation.
//!
//! [`FinancialMetrics`] holds the ratio arithmetic shared by the detectors. All
//! functions use checked decimal arithmetic and return `None` where the metric
//! is undefined (zero denominator) instead of panicking.

use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Stateless calculator for period-level financial metrics.
pub struct FinancialMetrics;

impl FinancialMetrics {
    /// Assets divided by liabilities.
    pub fn current_ratio(assets: Decimal, liabilities: Decimal) -> Option<Decimal> {
        assets.checked_div(liabilities)
    }

    /// Gap between net income and operating cash flow as a percentage of
    /// absolute net income.
    pub fn cash_flow_discrepancy_pct(
        net_income: Decimal,
        operating_cash_flow: Decimal,
    ) -> Option<Decimal> {
        let discrepancy = net_income.checked_sub(operating_cash_flow)?.abs();
        discrepancy
            .checked_div(net_income.abs())?
            .checked_mul(HUNDRED)
    }

    /// Percentage change from `old` to `new`.
    pub fn percent_change(old: Decimal, new: Decimal) -> Option<Decimal> {
        new.checked_sub(old)?.checked_div(old)?.checked_mul(HUNDRED)
    }

    /// Percentage income change per percentage revenue change.
    ///
    /// Flat revenue yields 0 even when income moved; the true ratio is
    /// unbounded in that case.
    pub fn operating_leverage(revenue_change_pct: Decimal, income_change_pct: Decimal) -> Decimal {
        income_change_pct
            .checked_div(revenue_change_pct)
            .unwrap_or(Decimal::ZERO)
    }
}
