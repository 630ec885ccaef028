//! Shared description of the borrower input form.
//!
//! Presentation layers render their widgets from this table so both prediction pages offer
//! identical ranges and choices. The pipeline itself never validates against it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Slider {
        min: u64,
        max: u64,
        default: u64,
    },
    Number {
        min: u64,
        max: u64,
        default: u64,
        step: u64,
    },
    Select {
        choices: &'static [&'static str],
        default: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

const fn slider(
    name: &'static str,
    label: &'static str,
    min: u64,
    max: u64,
    default: u64,
) -> FormField {
    FormField {
        name,
        label,
        kind: FieldKind::Slider { min, max, default },
    }
}

const fn number(
    name: &'static str,
    label: &'static str,
    max: u64,
    default: u64,
    step: u64,
) -> FormField {
    FormField {
        name,
        label,
        kind: FieldKind::Number {
            min: 0,
            max,
            default,
            step,
        },
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    choices: &'static [&'static str],
) -> FormField {
    FormField {
        name,
        label,
        kind: FieldKind::Select {
            choices,
            default: choices[0],
        },
    }
}

const ONE_BILLION: u64 = 1_000_000_000;
const TEN_BILLION: u64 = 10_000_000_000;

pub const FORM_FIELDS: [FormField; 20] = [
    slider("age", "Age", 25, 60, 30),
    select("gender", "Gender", &["Male", "Female"]),
    select("marital_status", "Marital Status", &["Single", "Married"]),
    select(
        "education",
        "Education",
        &["High School", "Graduate", "Post Graduate", "Professional"],
    ),
    select(
        "employment_type",
        "Employment Type",
        &["Private", "Government", "Self-employed"],
    ),
    slider("years_of_employment", "Years of Employment", 0, 40, 5),
    FormField {
        name: "monthly_salary",
        label: "Monthly Salary (INR)",
        kind: FieldKind::Number {
            min: 15_000,
            max: 2_000_000_000,
            default: 50_000,
            step: 5_000,
        },
    },
    number(
        "current_emi_amount",
        "Current EMI Amount (INR)",
        ONE_BILLION,
        0,
        1_000,
    ),
    select("existing_loans", "Existing Loans", &["Yes", "No"]),
    slider("dependents", "Dependents", 0, 5, 1),
    slider("family_size", "Family Size", 1, 10, 3),
    number("monthly_rent", "Monthly Rent (INR)", ONE_BILLION, 10_000, 1_000),
    number("school_fees", "School Fees (INR)", TEN_BILLION, 5_000, 1_000),
    number("college_fees", "College Fees (INR)", TEN_BILLION, 3_000, 1_000),
    number(
        "travel_expenses",
        "Travel Expenses (INR)",
        TEN_BILLION,
        2_000,
        1_000,
    ),
    number(
        "groceries_utilities",
        "Groceries & Utilities (INR)",
        ONE_BILLION,
        4_000,
        1_000,
    ),
    number(
        "other_monthly_expenses",
        "Other Monthly Expenses (INR)",
        ONE_BILLION,
        2_000,
        1_000,
    ),
    slider("credit_score", "Credit Score", 0, 1000, 500),
    number("bank_balance", "Bank Balance (INR)", TEN_BILLION, 10_000, 1_000),
    number(
        "emergency_fund",
        "Emergency Fund (INR)",
        TEN_BILLION,
        5_000,
        1_000,
    ),
];

pub fn form_fields() -> &'static [FormField] {
    &FORM_FIELDS
}
