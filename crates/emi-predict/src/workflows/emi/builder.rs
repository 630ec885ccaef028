use super::domain::{
    BorrowerInput, BorrowerProfile, Categorical, ConfigurationError, Education, EmploymentType,
    ExistingLoans, Gender, MaritalStatus,
};

/// Encodes the form payload into a [`BorrowerProfile`].
///
/// Ranges are enforced by the form; only the categorical choices are checked here.
pub fn build_profile(input: &BorrowerInput) -> Result<BorrowerProfile, ConfigurationError> {
    Ok(BorrowerProfile {
        age: input.age,
        gender: Gender::from_label(&input.gender)?,
        marital_status: MaritalStatus::from_label(&input.marital_status)?,
        education: Education::from_label(&input.education)?,
        employment_type: EmploymentType::from_label(&input.employment_type)?,
        years_of_employment: input.years_of_employment,
        monthly_salary: input.monthly_salary,
        current_emi_amount: input.current_emi_amount,
        existing_loans: ExistingLoans::from_label(&input.existing_loans)?,
        dependents: input.dependents,
        family_size: input.family_size,
        monthly_rent: input.monthly_rent,
        school_fees: input.school_fees,
        college_fees: input.college_fees,
        travel_expenses: input.travel_expenses,
        groceries_utilities: input.groceries_utilities,
        other_monthly_expenses: input.other_monthly_expenses,
        credit_score: input.credit_score,
        bank_balance: input.bank_balance,
        emergency_fund: input.emergency_fund,
    })
}
