//! CSV bulk import — turns an uploaded catalog sheet into validated postings.
//!
//! Expected header (camelCase, order free):
//! `title, sector, orgName, description, city, state, pin, remote, minEducation,
//!  requiredSkills, stipendMin, stipendMax, applicationUrl, deadline, active`
//!
//! `requiredSkills` is `;`-separated. `active` defaults to true when absent or blank.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::validation::{normalize_input, validate_input};
use crate::errors::AppError;
use crate::models::internship::InternshipInput;

const REQUIRED_HEADERS: &[&str] = &["title", "sector", "orgName", "applicationUrl"];

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    #[error("No valid internships found in CSV")]
    NoValidRows,
}

impl From<CsvImportError> for AppError {
    fn from(err: CsvImportError) -> Self {
        match err {
            CsvImportError::NoValidRows => AppError::UnprocessableEntity(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// A row that could not be turned into a posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// A valid row left out because the posting already exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub title: String,
    pub org_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub rows: Vec<(u64, InternshipInput)>,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub accepted: Vec<InternshipInput>,
    pub skipped: Vec<SkippedRow>,
    pub rejected: Vec<RejectedRow>,
}

/// Parses and validates every data row. Blank lines are ignored.
pub fn parse_internships_csv(text: &str) -> Result<ParsedCsv, CsvImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();
    for &required in REQUIRED_HEADERS {
        if !columns.contains_key(required) {
            return Err(CsvImportError::MissingColumn(required));
        }
    }

    let mut parsed = ParsedCsv::default();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.iter().all(str::is_empty) {
            continue;
        }

        match parse_row(&record, &columns) {
            Ok(input) => {
                let input = normalize_input(input);
                let problems = validate_input(&input);
                if problems.is_empty() {
                    parsed.rows.push((line, input));
                } else {
                    parsed.rejected.push(RejectedRow {
                        line,
                        reason: problems.join("; "),
                    });
                }
            }
            Err(reason) => parsed.rejected.push(RejectedRow { line, reason }),
        }
    }

    Ok(parsed)
}

/// Drops rows whose `(title, org_name)` is already in the catalog or appeared
/// earlier in the same file.
pub fn plan_import(parsed: ParsedCsv, existing: &HashSet<(String, String)>) -> ImportPlan {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut plan = ImportPlan {
        rejected: parsed.rejected,
        ..ImportPlan::default()
    };

    for (line, input) in parsed.rows {
        let key = input.duplicate_key();
        if existing.contains(&key) || !seen.insert(key) {
            plan.skipped.push(SkippedRow {
                line,
                title: input.title,
                org_name: input.org_name,
            });
        } else {
            plan.accepted.push(input);
        }
    }

    plan
}

fn parse_row(record: &StringRecord, columns: &HashMap<&str, usize>) -> Result<InternshipInput, String> {
    let cell = |name: &str| -> Option<String> {
        columns
            .get(name)
            .and_then(|&i| record.get(i))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let required_skills = cell("requiredSkills")
        .map(|v| v.split(';').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();

    let deadline = cell("deadline")
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| format!("deadline '{v}' is not a YYYY-MM-DD date"))
        })
        .transpose()?;

    Ok(InternshipInput {
        title: cell("title").unwrap_or_default(),
        org_name: cell("orgName").unwrap_or_default(),
        sector: cell("sector").unwrap_or_default(),
        description: cell("description").unwrap_or_default(),
        city: cell("city"),
        state: cell("state"),
        pin: cell("pin"),
        remote: cell("remote").is_some_and(|v| v.eq_ignore_ascii_case("true")),
        min_education: cell("minEducation"),
        required_skills,
        stipend_min: parse_stipend(cell("stipendMin"), "stipendMin")?,
        stipend_max: parse_stipend(cell("stipendMax"), "stipendMax")?,
        application_url: cell("applicationUrl").unwrap_or_default(),
        deadline,
        active: cell("active").map_or(true, |v| v.eq_ignore_ascii_case("true")),
    })
}

fn parse_stipend(value: Option<String>, column: &str) -> Result<Option<i32>, String> {
    value
        .map(|v| {
            v.parse::<i32>()
                .map_err(|_| format!("{column} '{v}' is not a whole number"))
        })
        .transpose()
}
