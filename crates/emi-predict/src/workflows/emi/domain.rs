use serde::{Deserialize, Serialize};

/// Raw form payload exactly as the input widgets produce it.
///
/// Numeric fields arrive range-constrained by the form; categorical fields carry the
/// display string of the selected choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerInput {
    pub age: u32,
    pub gender: String,
    pub marital_status: String,
    pub education: String,
    pub employment_type: String,
    pub years_of_employment: u32,
    pub monthly_salary: u64,
    pub current_emi_amount: u64,
    pub existing_loans: String,
    pub dependents: u32,
    pub family_size: u32,
    pub monthly_rent: u64,
    pub school_fees: u64,
    pub college_fees: u64,
    pub travel_expenses: u64,
    pub groceries_utilities: u64,
    pub other_monthly_expenses: u64,
    pub credit_score: u32,
    pub bank_balance: u64,
    pub emergency_fund: u64,
}

impl Default for BorrowerInput {
    /// Values the form is pre-filled with.
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male.label().to_string(),
            marital_status: MaritalStatus::Single.label().to_string(),
            education: Education::HighSchool.label().to_string(),
            employment_type: EmploymentType::Private.label().to_string(),
            years_of_employment: 5,
            monthly_salary: 50_000,
            current_emi_amount: 0,
            existing_loans: ExistingLoans::Yes.label().to_string(),
            dependents: 1,
            family_size: 3,
            monthly_rent: 10_000,
            school_fees: 5_000,
            college_fees: 3_000,
            travel_expenses: 2_000,
            groceries_utilities: 4_000,
            other_monthly_expenses: 2_000,
            credit_score: 500,
            bank_balance: 10_000,
            emergency_fund: 5_000,
        }
    }
}

/// Raised when a value falls outside the closed set of form choices.
///
/// The form cannot produce these, so seeing one means the caller and this crate disagree
/// about the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unsupported value '{value}' for {field} (expected one of: {expected})")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// Closed, form-defined choice set with a fixed integer encoding.
pub trait Categorical: Sized + Copy + 'static {
    const FIELD: &'static str;
    const CHOICES: &'static [Self];

    fn label(self) -> &'static str;
    fn code(self) -> u8;

    fn from_label(value: &str) -> Result<Self, ConfigurationError> {
        Self::CHOICES
            .iter()
            .copied()
            .find(|choice| choice.label() == value)
            .ok_or_else(|| ConfigurationError::UnknownCategory {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::CHOICES
                    .iter()
                    .map(|choice| choice.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Categorical for Gender {
    const FIELD: &'static str = "gender";
    const CHOICES: &'static [Self] = &[Gender::Male, Gender::Female];

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
}

impl Categorical for MaritalStatus {
    const FIELD: &'static str = "marital_status";
    const CHOICES: &'static [Self] = &[MaritalStatus::Single, MaritalStatus::Married];

    fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
        }
    }

    fn code(self) -> u8 {
        match self {
            MaritalStatus::Single => 0,
            MaritalStatus::Married => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    HighSchool,
    Graduate,
    PostGraduate,
    Professional,
}

impl Categorical for Education {
    const FIELD: &'static str = "education";
    const CHOICES: &'static [Self] = &[
        Education::HighSchool,
        Education::Graduate,
        Education::PostGraduate,
        Education::Professional,
    ];

    fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Graduate => "Graduate",
            Education::PostGraduate => "Post Graduate",
            Education::Professional => "Professional",
        }
    }

    fn code(self) -> u8 {
        match self {
            Education::HighSchool => 0,
            Education::Graduate => 1,
            Education::PostGraduate => 2,
            Education::Professional => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    Private,
    Government,
    SelfEmployed,
}

impl Categorical for EmploymentType {
    const FIELD: &'static str = "employment_type";
    const CHOICES: &'static [Self] = &[
        EmploymentType::Private,
        EmploymentType::Government,
        EmploymentType::SelfEmployed,
    ];

    fn label(self) -> &'static str {
        match self {
            EmploymentType::Private => "Private",
            EmploymentType::Government => "Government",
            EmploymentType::SelfEmployed => "Self-employed",
        }
    }

    fn code(self) -> u8 {
        match self {
            EmploymentType::Private => 0,
            EmploymentType::Government => 1,
            EmploymentType::SelfEmployed => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExistingLoans {
    Yes,
    No,
}

impl Categorical for ExistingLoans {
    const FIELD: &'static str = "existing_loans";
    const CHOICES: &'static [Self] = &[ExistingLoans::Yes, ExistingLoans::No];

    fn label(self) -> &'static str {
        match self {
            ExistingLoans::Yes => "Yes",
            ExistingLoans::No => "No",
        }
    }

    fn code(self) -> u8 {
        match self {
            ExistingLoans::Yes => 1,
            ExistingLoans::No => 0,
        }
    }
}

/// Column names of the base record, in the order the form collects them.
pub const BASE_COLUMNS: [&str; 20] = [
    "age",
    "gender",
    "marital_status",
    "education",
    "employment_type",
    "years_of_employment",
    "monthly_salary",
    "current_emi_amount",
    "existing_loans",
    "dependents",
    "family_size",
    "monthly_rent",
    "school_fees",
    "college_fees",
    "travel_expenses",
    "groceries_utilities",
    "other_monthly_expenses",
    "credit_score",
    "bank_balance",
    "emergency_fund",
];

/// Encoded borrower record with every categorical field mapped onto its closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub age: u32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub education: Education,
    pub employment_type: EmploymentType,
    pub years_of_employment: u32,
    pub monthly_salary: u64,
    pub current_emi_amount: u64,
    pub existing_loans: ExistingLoans,
    pub dependents: u32,
    pub family_size: u32,
    pub monthly_rent: u64,
    pub school_fees: u64,
    pub college_fees: u64,
    pub travel_expenses: u64,
    pub groceries_utilities: u64,
    pub other_monthly_expenses: u64,
    pub credit_score: u32,
    pub bank_balance: u64,
    pub emergency_fund: u64,
}

impl BorrowerProfile {
    /// Base columns as model inputs, named per [`BASE_COLUMNS`].
    pub fn columns(&self) -> [(&'static str, f64); 20] {
        let values = [
            f64::from(self.age),
            f64::from(self.gender.code()),
            f64::from(self.marital_status.code()),
            f64::from(self.education.code()),
            f64::from(self.employment_type.code()),
            f64::from(self.years_of_employment),
            self.monthly_salary as f64,
            self.current_emi_amount as f64,
            f64::from(self.existing_loans.code()),
            f64::from(self.dependents),
            f64::from(self.family_size),
            self.monthly_rent as f64,
            self.school_fees as f64,
            self.college_fees as f64,
            self.travel_expenses as f64,
            self.groceries_utilities as f64,
            self.other_monthly_expenses as f64,
            f64::from(self.credit_score),
            self.bank_balance as f64,
            self.emergency_fund as f64,
        ];

        let mut columns = [("", 0.0); 20];
        for (slot, (name, value)) in columns
            .iter_mut()
            .zip(BASE_COLUMNS.iter().zip(values))
        {
            *slot = (*name, value);
        }
        columns
    }

    /// Groceries, travel, school, college and other expenses. Rent is tracked separately.
    pub fn listed_expenses(&self) -> f64 {
        [
            self.groceries_utilities,
            self.travel_expenses,
            self.school_fees,
            self.college_fees,
            self.other_monthly_expenses,
        ]
        .iter()
        .map(|amount| *amount as f64)
        .sum()
    }
}
