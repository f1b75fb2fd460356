use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One reporting period's snapshot of headline financial figures.
///
/// Every amount is presence-tagged: `None` means the figure is unknown for the
/// period, `Some(Decimal::ZERO)` is a reported zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriod {
    /// Display label such as "Q1 2024".
    pub period: String,
    #[serde(default)]
    pub revenue: Option<Decimal>,
    #[serde(default)]
    pub net_income: Option<Decimal>,
    #[serde(default)]
    pub assets: Option<Decimal>,
    #[serde(default)]
    pub liabilities: Option<Decimal>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    #[serde(default)]
    pub cash: Option<Decimal>,
    #[serde(default)]
    pub operating_cash_flow: Option<Decimal>,
}

impl FinancialPeriod {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            ..Self::default()
        }
    }

    pub fn with_revenue(mut self, value: Decimal) -> Self {
        self.revenue = Some(value);
        self
    }

    pub fn with_net_income(mut self, value: Decimal) -> Self {
        self.net_income = Some(value);
        self
    }

    pub fn with_assets(mut self, value: Decimal) -> Self {
        self.assets = Some(value);
        self
    }

    pub fn with_liabilities(mut self, value: Decimal) -> Self {
        self.liabilities = Some(value);
        self
    }

    pub fn with_equity(mut self, value: Decimal) -> Self {
        self.equity = Some(value);
        self
    }

    pub fn with_cash(mut self, value: Decimal) -> Self {
        self.cash = Some(value);
        self
    }

    pub fn with_operating_cash_flow(mut self, value: Decimal) -> Self {
        self.operating_cash_flow = Some(value);
        self
    }

    /// True when no amount at all is known for this period.
    pub fn is_empty(&self) -> bool {
        [
            self.revenue,
            self.net_income,
            self.assets,
            self.liabilities,
            self.equity,
            self.cash,
            self.operating_cash_flow,
        ]
        .iter()
        .all(Option::is_none)
    }
}

/// Calendar quarter label for a period ending on `end`, e.g. "Q3 2024".
pub fn quarter_label(end: NaiveDate) -> String {
    let quarter = end.month0() / 3 + 1;
    format!("Q{} {}", quarter, end.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn builder_sets_only_requested_fields() {
        let period = FinancialPeriod::new("Q1 2024")
            .with_assets(dec!(100))
            .with_liabilities(dec!(0));

        assert_eq!(period.assets, Some(dec!(100)));
        assert_eq!(period.liabilities, Some(dec!(0)));
        assert!(period.revenue.is_none());
        assert!(!period.is_empty());
        assert!(FinancialPeriod::new("Q2 2024").is_empty());
    }

    #[test]
    fn serializes_camel_case_and_accepts_missing_fields() {
        let period = FinancialPeriod::new("Q4 2023").with_operating_cash_flow(dec!(12.5));
        let json = serde_json::to_value(&period).unwrap();
        assert!(json.get("operatingCashFlow").is_some());
        assert!(json.get("netIncome").is_some());

        let parsed: FinancialPeriod =
            serde_json::from_str(r#"{"period":"Q1 2024","netIncome":"42"}"#).unwrap();
        assert_eq!(parsed.net_income, Some(dec!(42)));
        assert!(parsed.assets.is_none());
    }

    #[test]
    fn quarter_labels_follow_calendar_quarters() {
        let label = |y, m, d| quarter_label(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(label(2024, 3, 31), "Q1 2024");
        assert_eq!(label(2024, 6, 30), "Q2 2024");
        assert_eq!(label(2023, 9, 30), "Q3 2023");
        assert_eq!(label(2023, 12, 31), "Q4 2023");
    }
}
