use serde::Serialize;

use super::engineering::EngineeredRecord;

pub const CREDIT_SCORE_MIN: f64 = 0.0;
pub const CREDIT_SCORE_MAX: f64 = 1000.0;

/// Traffic-light band shared by the gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Red,
    Orange,
    Green,
}

impl GaugeBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Green => "Green",
        }
    }

    fn from_thresholds(value: f64, orange_above: f64, green_above: f64) -> Self {
        if value > green_above {
            Self::Green
        } else if value > orange_above {
            Self::Orange
        } else {
            Self::Red
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditScoreGauge {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub band: GaugeBand,
}

impl CreditScoreGauge {
    pub fn from_score(score: f64) -> Self {
        Self {
            value: score,
            min: CREDIT_SCORE_MIN,
            max: CREDIT_SCORE_MAX,
            band: GaugeBand::from_thresholds(score, 500.0, 700.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSlice {
    pub label: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseBreakdown {
    pub slices: Vec<ExpenseSlice>,
}

impl ExpenseBreakdown {
    /// Listed expenses: groceries, travel, school, college, other.
    pub fn listed(record: &EngineeredRecord) -> Self {
        Self {
            slices: vec![
                ExpenseSlice {
                    label: "Groceries",
                    amount: record.groceries_utilities(),
                },
                ExpenseSlice {
                    label: "Travel",
                    amount: record.travel_expenses(),
                },
                ExpenseSlice {
                    label: "School",
                    amount: record.school_fees(),
                },
                ExpenseSlice {
                    label: "College",
                    amount: record.college_fees(),
                },
                ExpenseSlice {
                    label: "Other",
                    amount: record.other_monthly_expenses(),
                },
            ],
        }
    }

    /// Listed expenses with rent as the leading slice.
    pub fn with_rent(record: &EngineeredRecord) -> Self {
        let mut breakdown = Self::listed(record);
        breakdown.slices.insert(
            0,
            ExpenseSlice {
                label: "Rent",
                amount: record.monthly_rent(),
            },
        );
        breakdown
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|slice| slice.amount).sum()
    }
}

/// Share of salary left after the predicted EMI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsGauge {
    pub savings_ratio: f64,
    pub percent: f64,
    pub band: GaugeBand,
}

impl SavingsGauge {
    pub fn new(monthly_salary: f64, predicted_emi: f64) -> Self {
        let savings_ratio = savings_ratio(monthly_salary, predicted_emi);
        Self {
            savings_ratio,
            percent: savings_ratio * 100.0,
            band: GaugeBand::from_thresholds(savings_ratio, 0.2, 0.4),
        }
    }
}

pub fn savings_ratio(monthly_salary: f64, predicted_emi: f64) -> f64 {
    1.0 - predicted_emi / (monthly_salary + 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryComparison {
    pub monthly_salary: f64,
    pub predicted_emi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityInsights {
    pub credit_score: CreditScoreGauge,
    pub expenses: ExpenseBreakdown,
}

impl EligibilityInsights {
    pub fn from_record(record: &EngineeredRecord) -> Self {
        Self {
            credit_score: CreditScoreGauge::from_score(record.credit_score()),
            expenses: ExpenseBreakdown::listed(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationInsights {
    pub salary_comparison: SalaryComparison,
    pub expenses: ExpenseBreakdown,
    pub savings: SavingsGauge,
}

impl EstimationInsights {
    pub fn from_estimate(record: &EngineeredRecord, predicted_emi: f64) -> Self {
        let monthly_salary = record.monthly_salary();
        Self {
            salary_comparison: SalaryComparison {
                monthly_salary,
                predicted_emi,
            },
            expenses: ExpenseBreakdown::with_rent(record),
            savings: SavingsGauge::new(monthly_salary, predicted_emi),
        }
    }
}
