use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::domain::BorrowerProfile;

pub const DEBT_TO_INCOME_RATIO: &str = "debt_to_income_ratio";
pub const EXPENSE_TO_INCOME_RATIO: &str = "expense_to_income_ratio";
pub const AFFORDABILITY_INDEX: &str = "affordability_index";
pub const EMPLOYMENT_STABILITY: &str = "employment_stability";
pub const DEPENDENTS_RATIO: &str = "dependents_ratio";
pub const HOUSING_COST_RATIO: &str = "housing_cost_ratio";
pub const RISK_SCORE: &str = "risk_score";

/// Share of salary treated as spendable when computing affordability.
const AFFORDABLE_SALARY_SHARE: f64 = 0.7;
const CREDIT_SCORE_CEILING: f64 = 1000.0;

const CREDIT_WEIGHT: f64 = 0.4;
const DEBT_WEIGHT: f64 = 0.3;
const EXPENSE_WEIGHT: f64 = 0.2;
const AFFORDABILITY_WEIGHT: f64 = 0.1;

/// Which prediction the record is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureVariant {
    /// Adds stability, dependents and housing ratios plus the composite risk score.
    Eligibility,
    Estimation,
}

/// Named, insertion-ordered feature columns for a single borrower.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineeredRecord {
    columns: Vec<(String, f64)>,
}

impl EngineeredRecord {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut record = Self::default();
        for (name, value) in pairs {
            record.insert(name, value);
        }
        record
    }

    pub fn from_profile(profile: &BorrowerProfile) -> Self {
        Self::from_pairs(profile.columns())
    }

    /// Sets a column, replacing the value in place when the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Replaces every non-finite value with zero. Returns how many were replaced.
    pub fn zero_non_finite(&mut self) -> usize {
        let mut replaced = 0;
        for (name, value) in self.columns.iter_mut() {
            if !value.is_finite() {
                debug!(column = %name, value = %value, "non-finite feature coerced to zero");
                *value = 0.0;
                replaced += 1;
            }
        }
        replaced
    }

    fn value_or_zero(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    pub fn credit_score(&self) -> f64 {
        self.value_or_zero("credit_score")
    }

    pub fn monthly_salary(&self) -> f64 {
        self.value_or_zero("monthly_salary")
    }

    pub fn monthly_rent(&self) -> f64 {
        self.value_or_zero("monthly_rent")
    }

    pub fn groceries_utilities(&self) -> f64 {
        self.value_or_zero("groceries_utilities")
    }

    pub fn travel_expenses(&self) -> f64 {
        self.value_or_zero("travel_expenses")
    }

    pub fn school_fees(&self) -> f64 {
        self.value_or_zero("school_fees")
    }

    pub fn college_fees(&self) -> f64 {
        self.value_or_zero("college_fees")
    }

    pub fn other_monthly_expenses(&self) -> f64 {
        self.value_or_zero("other_monthly_expenses")
    }

    pub fn risk_score(&self) -> Option<f64> {
        self.get(RISK_SCORE)
    }
}

impl Serialize for EngineeredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Derives the ratio features for `variant` on top of the base columns.
pub fn engineer(profile: &BorrowerProfile, variant: FeatureVariant) -> EngineeredRecord {
    let mut record = EngineeredRecord::from_profile(profile);

    let salary = profile.monthly_salary as f64;
    let income_base = salary + 1.0;
    let current_emi = profile.current_emi_amount as f64;
    let expenses = profile.listed_expenses();

    let debt_to_income = current_emi / income_base;
    let expense_to_income = expenses / income_base;
    let affordability =
        (AFFORDABLE_SALARY_SHARE * salary - (current_emi + expenses)) / income_base;

    record.insert(DEBT_TO_INCOME_RATIO, debt_to_income);
    record.insert(EXPENSE_TO_INCOME_RATIO, expense_to_income);
    record.insert(AFFORDABILITY_INDEX, affordability);

    if variant == FeatureVariant::Eligibility {
        record.insert(
            EMPLOYMENT_STABILITY,
            f64::from(profile.years_of_employment) / (f64::from(profile.age) + 1.0),
        );
        record.insert(
            DEPENDENTS_RATIO,
            f64::from(profile.dependents) / (f64::from(profile.family_size) + 1.0),
        );
        record.insert(HOUSING_COST_RATIO, profile.monthly_rent as f64 / income_base);
        record.insert(
            RISK_SCORE,
            risk_score(
                f64::from(profile.credit_score),
                debt_to_income,
                expense_to_income,
                affordability,
            ),
        );
    }

    record.zero_non_finite();
    record
}

/// Weighted composite in `[0, 1]`; every term is saturated to `[0, 1]` before weighting.
pub fn risk_score(
    credit_score: f64,
    debt_to_income: f64,
    expense_to_income: f64,
    affordability: f64,
) -> f64 {
    CREDIT_WEIGHT * unit_clip(credit_score / CREDIT_SCORE_CEILING)
        + DEBT_WEIGHT * unit_clip(1.0 - debt_to_income)
        + EXPENSE_WEIGHT * unit_clip(1.0 - expense_to_income)
        + AFFORDABILITY_WEIGHT * unit_clip(affordability)
}

fn unit_clip(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
