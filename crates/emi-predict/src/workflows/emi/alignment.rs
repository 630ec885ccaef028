use std::collections::HashSet;

use super::engineering::EngineeredRecord;

/// Projects `record` onto the ordered `expected` feature names.
///
/// Missing names become `0.0`, columns not listed are dropped, and the output order is the
/// order of `expected`. Scalers match purely by position, so this is the only place names
/// are resolved.
pub fn align<S: AsRef<str>>(record: &EngineeredRecord, expected: &[S]) -> Vec<f64> {
    expected
        .iter()
        .map(|name| record.get(name.as_ref()).unwrap_or(0.0))
        .collect()
}

/// Columns that [`align`] will zero-fill and columns it will drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentGaps {
    pub zero_filled: Vec<String>,
    pub dropped: Vec<String>,
}

impl AlignmentGaps {
    pub fn is_empty(&self) -> bool {
        self.zero_filled.is_empty() && self.dropped.is_empty()
    }
}

pub fn alignment_gaps<S: AsRef<str>>(record: &EngineeredRecord, expected: &[S]) -> AlignmentGaps {
    let wanted: HashSet<&str> = expected.iter().map(|name| name.as_ref()).collect();

    AlignmentGaps {
        zero_filled: as_strs(expected)
            .filter(|name| !record.contains(name))
            .map(str::to_string)
            .collect(),
        dropped: record
            .names()
            .filter(|name| !wanted.contains(name))
            .map(str::to_string)
            .collect(),
    }
}

fn as_strs<S: AsRef<str>>(names: &[S]) -> impl Iterator<Item = &str> {
    names.iter().map(|name| name.as_ref())
}

/// Schema defects in a declared feature list that zero-filling cannot paper over.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureSchemaError {
    #[error("expected feature list is empty")]
    Empty,
    #[error("feature '{0}' is declared more than once")]
    Duplicate(String),
    #[error("feature name at position {0} is blank")]
    Blank(usize),
}

/// Rejects feature lists that cannot be aligned against unambiguously.
pub fn check_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), FeatureSchemaError> {
    if names.is_empty() {
        return Err(FeatureSchemaError::Empty);
    }

    let mut seen = HashSet::with_capacity(names.len());
    for (position, name) in as_strs(names).enumerate() {
        if name.trim().is_empty() {
            return Err(FeatureSchemaError::Blank(position));
        }
        if !seen.insert(name) {
            return Err(FeatureSchemaError::Duplicate(name.to_string()));
        }
    }

    Ok(())
}
