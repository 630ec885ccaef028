use super::common::*;
use crate::workflows::emi::builder::build_profile;
use crate::workflows::emi::domain::{
    Categorical, ConfigurationError, Education, EmploymentType, ExistingLoans, Gender,
    MaritalStatus, BASE_COLUMNS,
};

#[test]
fn encodes_categorical_choices_with_fixed_codes() {
    let mut input = default_input();
    input.gender = "Female".to_string();
    input.marital_status = "Married".to_string();
    input.education = "Post Graduate".to_string();
    input.employment_type = "Self-employed".to_string();
    input.existing_loans = "No".to_string();

    let profile = build_profile(&input).expect("profile builds");

    assert_eq!(profile.gender, Gender::Female);
    assert_eq!(profile.marital_status, MaritalStatus::Married);
    assert_eq!(profile.education, Education::PostGraduate);
    assert_eq!(profile.employment_type, EmploymentType::SelfEmployed);
    assert_eq!(profile.existing_loans, ExistingLoans::No);

    let columns = profile.columns();
    let value = |name: &str| {
        columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
            .expect("column present")
    };
    assert_eq!(value("gender"), 0.0);
    assert_eq!(value("marital_status"), 1.0);
    assert_eq!(value("education"), 2.0);
    assert_eq!(value("employment_type"), 2.0);
    assert_eq!(value("existing_loans"), 0.0);
}

#[test]
fn every_choice_round_trips_through_its_label() {
    fn check<C: Categorical + PartialEq + std::fmt::Debug>() {
        for choice in C::CHOICES {
            assert_eq!(C::from_label(choice.label()).expect("label maps"), *choice);
            assert!(usize::from(choice.code()) < C::CHOICES.len());
        }
    }

    check::<Gender>();
    check::<MaritalStatus>();
    check::<Education>();
    check::<EmploymentType>();
    check::<ExistingLoans>();
}

#[test]
fn unknown_category_is_a_configuration_error() {
    let mut input = default_input();
    input.education = "PhD".to_string();

    let err = build_profile(&input).expect_err("unknown education");

    match err {
        ConfigurationError::UnknownCategory {
            field,
            value,
            expected,
        } => {
            assert_eq!(field, "education");
            assert_eq!(value, "PhD");
            assert!(expected.contains("Post Graduate"));
        }
    }
}

#[test]
fn labels_are_case_sensitive() {
    let mut input = default_input();
    input.gender = "male".to_string();

    assert!(build_profile(&input).is_err());
}

#[test]
fn base_columns_follow_form_order() {
    let profile = build_profile(&default_input()).expect("profile builds");
    let names: Vec<&str> = profile.columns().iter().map(|(name, _)| *name).collect();

    assert_eq!(names, BASE_COLUMNS.to_vec());
    assert_eq!(profile.columns()[6], ("monthly_salary", 50_000.0));
    assert_eq!(profile.listed_expenses(), 16_000.0);
}
