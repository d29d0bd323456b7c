use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::{Deserialize, Deserializer};

use super::domain::GradeEntry;
use super::records::{normalize_key, BEST_RANK, WORST_RANK};

#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    #[error("failed to read grade export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid grade CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: rank '{value}' is not a whole number between 1 and 9")]
    InvalidRank { row: usize, value: String },
    #[error("row {row}: subject is missing")]
    MissingSubject { row: usize },
}

/// Loads grade exports with `subject,rank,year,term` columns.
///
/// Header matching ignores case and surrounding whitespace. A blank rank marks the
/// grade as unranked.
pub struct GradeCsvImporter;

impl GradeCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<GradeEntry>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<GradeEntry>, RecordImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: StringRecord = csv_reader
            .headers()?
            .iter()
            .map(normalize_key)
            .collect();
        csv_reader.set_headers(headers);

        let mut grades = Vec::new();
        for (index, row) in csv_reader.deserialize::<GradeRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            grades.push(row.into_entry(index + 2)?);
        }

        Ok(grades)
    }
}

#[derive(Debug, Deserialize)]
struct GradeRow {
    subject: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    year: i32,
    term: u8,
}

impl GradeRow {
    fn into_entry(self, row: usize) -> Result<GradeEntry, RecordImportError> {
        if self.subject.trim().is_empty() {
            return Err(RecordImportError::MissingSubject { row });
        }

        let rank = match self.rank {
            None => None,
            Some(value) => match value.parse::<u8>() {
                Ok(rank) if (BEST_RANK..=WORST_RANK).contains(&rank) => Some(rank),
                _ => return Err(RecordImportError::InvalidRank { row, value }),
            },
        };

        Ok(GradeEntry {
            subject: self.subject,
            rank,
            year: self.year,
            term: self.term,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
