//! CSV decoding for lead uploads.
//!
//! The header row must name all six lead columns; other columns are ignored and
//! empty cells become absent fields.

use crate::errors::AppError;
use crate::models::Lead;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = Lead::FIELDS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "CSV must contain the following columns: {}. Missing: {}",
            Lead::FIELDS.join(", "),
            missing.join(", ")
        )));
    }

    let mut leads = Vec::new();
    for record in csv_reader.deserialize::<LeadRow>() {
        leads.push(record?.into());
    }

    Ok(leads)
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    linkedin_bio: Option<String>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            name: row.name,
            role: row.role,
            company: row.company,
            industry: row.industry,
            location: row.location,
            linkedin_bio: row.linkedin_bio,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.is_empty()))
}

/// True when a multipart part's declared type is CSV (parameters such as charset allowed).
pub fn is_csv_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(CSV_CONTENT_TYPE))
        .unwrap_or(false)
}
