use crate::error::{ConvertError, Result};
use crate::structs::Record;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Risk above which an app is flagged as a likely impersonation.
pub const HIGH_RISK_THRESHOLD: u32 = 60;
/// Risk at or below which an app is considered a close match.
pub const LOW_RISK_THRESHOLD: u32 = 30;

/// A record scored against a brand name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    pub name_score: u32,
    pub pkg_score: u32,
    pub pub_score: u32,
    pub avg: u32,
    pub risk: u32,
}

impl ScoredRecord {
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_risk(self.risk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_risk(risk: u32) -> Self {
        if risk > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if risk > LOW_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Result of scanning an inventory for one brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub brand: String,
    pub count: usize,
    pub results: Vec<ScoredRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Inventory {
    Bare(Vec<Record>),
    Wrapped { results: Vec<Record> },
}

/// Loads an inventory JSON file as written by [`crate::load::write_json`].
///
/// Accepts either a bare array of records or an object whose `results`
/// field holds the array.
///
/// # Arguments
/// * `path` - Path to the inventory JSON file
///
/// # Returns
/// Returns the records in file order.
///
/// # Errors
/// Returns `ConvertError::InputNotFound` if the file does not exist, and an
/// I/O or JSON error if it cannot be read or matches neither shape.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    let records = match serde_json::from_str::<Inventory>(&raw)? {
        Inventory::Bare(records) => records,
        Inventory::Wrapped { results } => {
            debug!("Unwrapped {} records from results field", results.len());
            results
        }
    };
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Percentage of positions holding the same character, ignoring case.
///
/// Characters are compared position by position over the shorter string and
/// the count is divided by the longer length. Either string empty gives 0.
pub fn similarity(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    let longest = a.len().max(b.len());
    ((matches as f64 / longest as f64) * 100.0).floor() as u32
}

/// Scores every record against `brand` and orders them by risk.
///
/// # Arguments
/// * `brand` - Brand name to compare against; surrounding whitespace is ignored
/// * `records` - Inventory records to score
///
/// # Returns
/// Returns one `ScoredRecord` per input record, highest risk first. Records
/// with equal risk keep their input order.
///
/// # Scoring
/// - `name_score`: similarity of the brand to `app_name`
/// - `pkg_score`: similarity of `com.<brand lowercased>` to `package`
/// - `pub_score`: similarity of the brand to `publisher`
/// - `avg`: floored mean of the three, `risk`: `100 - avg`
///
/// # Errors
/// Returns `ConvertError::MissingBrand` if the brand is blank.
pub fn score_records(brand: &str, records: &[Record]) -> Result<Vec<ScoredRecord>> {
    let brand = brand.trim();
    if brand.is_empty() {
        return Err(ConvertError::MissingBrand);
    }
    let package_brand = format!("com.{}", brand.to_lowercase());

    let mut scored: Vec<ScoredRecord> = records
        .iter()
        .map(|record| {
            let name_score = similarity(brand, &record.app_name);
            let pkg_score = similarity(&package_brand, &record.package);
            let pub_score = similarity(brand, &record.publisher);
            let avg = (name_score + pkg_score + pub_score) / 3;
            ScoredRecord {
                record: record.clone(),
                name_score,
                pkg_score,
                pub_score,
                avg,
                risk: 100u32.saturating_sub(avg),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.risk.cmp(&a.risk));
    Ok(scored)
}

/// Scores `records` and wraps them with the brand and count.
pub fn scan(brand: &str, records: &[Record]) -> Result<ScanReport> {
    let results = score_records(brand, records)?;
    Ok(ScanReport {
        brand: brand.trim().to_string(),
        count: results.len(),
        results,
    })
}
