use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use super::domain::BorrowerInput;
use super::inference::EligibilityLabel;

/// Borrower rows read from a CSV export whose headers are the form field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorrowerBatch {
    rows: Vec<BorrowerInput>,
}

impl BorrowerBatch {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BatchError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<BorrowerInput>() {
            rows.push(record?);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[BorrowerInput] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<BorrowerInput>> for BorrowerBatch {
    fn from(rows: Vec<BorrowerInput>) -> Self {
        Self { rows }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    Eligibility,
    Estimation,
}

/// Result for one batch row. Either the prediction fields for the mode or `error` are set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// 1-based data row, not counting the header.
    pub row: usize,
    pub label: Option<EligibilityLabel>,
    pub risk_score: Option<f64>,
    pub amount: Option<f64>,
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Writes outcomes as CSV with a header row.
pub fn write_outcomes<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        csv_writer.serialize(outcome)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read borrower batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid borrower CSV: {0}")]
    Csv(#[from] csv::Error),
}
