//! Load household members from CSV
//!
//! Expected columns (header row required):
//! `household_id` (batch files only), `name`, `age`, `condition`, `studies`,
//! `income_work`, `income_pension`, `income_capital`.
//!
//! Amounts are entered the way people type them ("$1.200.000", "850,000"):
//! currency signs and thousands separators are stripped, blanks count as zero
//! and negative values are clamped to zero.

use super::{Household, HouseholdError, Member};
use crate::assumptions::{AgeBand, CoefficientTable, Condition};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One CSV row before validation
#[derive(Debug, Deserialize)]
struct RawMemberRecord {
    #[serde(default)]
    household_id: Option<String>,
    name: String,
    age: String,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    studies: String,
    #[serde(default)]
    income_work: String,
    #[serde(default)]
    income_pension: String,
    #[serde(default)]
    income_capital: String,
}

/// Parse a user-entered monetary amount.
///
/// Returns `None` for text that is not a number once `$`, `.` and `,` are removed.
/// There is no upper bound on the number of digits.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '.' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Some(0.0);
    }

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Digit-only text always parses as f64, whatever its length
    let value: f64 = digits.parse().ok()?;
    if negative && value > 0.0 {
        log::warn!("Negative amount '{}' clamped to 0", raw.trim());
        return Some(0.0);
    }
    Some(value)
}

/// Parse a yes/no column. Blank means no.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Some(false),
        "1" | "true" | "yes" | "y" | "si" | "sí" | "s" | "x" => Some(true),
        _ => None,
    }
}

fn to_member(
    raw: RawMemberRecord,
    line: usize,
    coefficients: &CoefficientTable,
) -> Result<(Option<String>, Member), HouseholdError> {
    let name = raw.name.trim().to_string();

    let age: u32 = raw.age.trim().parse().map_err(|_| HouseholdError::InvalidAge {
        line,
        member: name.clone(),
        value: raw.age.clone(),
    })?;

    let studies = parse_flag(&raw.studies).ok_or_else(|| HouseholdError::InvalidFlag {
        line,
        member: name.clone(),
        value: raw.studies.clone(),
    })?;

    let amount = |field: &'static str, value: &str| {
        parse_amount(value).ok_or_else(|| HouseholdError::InvalidAmount {
            line,
            member: name.clone(),
            field,
            value: value.to_string(),
        })
    };
    let income_work = amount("income_work", &raw.income_work)?;
    let income_pension = amount("income_pension", &raw.income_pension)?;
    let income_capital = amount("income_capital", &raw.income_capital)?;

    // A blank condition takes the band's first option, as a selection form would
    let band = AgeBand::from_age(age);
    let condition = if raw.condition.trim().is_empty() {
        coefficients.default_condition(band)
    } else {
        let parsed = Condition::from_label(&raw.condition);
        if parsed.is_none() {
            log::warn!(
                "Line {}: unknown condition '{}' for {}, coefficient will be 0",
                line,
                raw.condition.trim(),
                name
            );
        }
        parsed
    };

    let household_id = raw
        .household_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    Ok((
        household_id,
        Member {
            name,
            age,
            condition,
            studies,
            income_work,
            income_pension,
            income_capital,
        },
    ))
}

fn read_records<R: Read>(
    reader: R,
    coefficients: &CoefficientTable,
) -> Result<Vec<(usize, Option<String>, Member)>, HouseholdError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawMemberRecord>().enumerate() {
        // Line 1 is the header
        let line = idx + 2;
        let (household_id, member) = to_member(result?, line, coefficients)?;
        records.push((line, household_id, member));
    }
    Ok(records)
}

/// Load the members of a single household from any CSV reader
pub fn load_members_from_reader<R: Read>(
    reader: R,
    coefficients: &CoefficientTable,
) -> Result<Vec<Member>, HouseholdError> {
    let members: Vec<Member> = read_records(reader, coefficients)?
        .into_iter()
        .map(|(_, _, member)| member)
        .collect();
    log::debug!("Loaded {} household members", members.len());
    Ok(members)
}

/// Load a single household from a CSV file, rejecting an empty file
pub fn load_household<P: AsRef<Path>>(
    path: P,
    coefficients: &CoefficientTable,
) -> Result<Household, HouseholdError> {
    let file = File::open(path)?;
    Household::new(load_members_from_reader(file, coefficients)?)
}

/// Load many households from a CSV reader with a `household_id` column.
///
/// Households are returned in order of first appearance.
pub fn load_households_from_reader<R: Read>(
    reader: R,
    coefficients: &CoefficientTable,
) -> Result<Vec<(String, Household)>, HouseholdError> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<Member>> = HashMap::new();

    for (line, household_id, member) in read_records(reader, coefficients)? {
        let id = household_id.ok_or(HouseholdError::MissingHouseholdId { line })?;
        if !grouped.contains_key(&id) {
            order.push(id.clone());
        }
        grouped.entry(id).or_default().push(member);
    }

    let households = order
        .into_iter()
        .map(|id| {
            let members = grouped.remove(&id).unwrap_or_default();
            Household::new(members).map(|household| (id, household))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Loaded {} households", households.len());
    Ok(households)
}

/// Load many households from a CSV file
pub fn load_households<P: AsRef<Path>>(
    path: P,
    coefficients: &CoefficientTable,
) -> Result<Vec<(String, Household)>, HouseholdError> {
    let file = File::open(path)?;
    load_households_from_reader(file, coefficients)
}
