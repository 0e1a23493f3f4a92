use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::normalize_field;

/// One roster row after lexical cleanup, before domain mapping.
#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) applied_role: String,
    pub(crate) team: String,
    pub(crate) normalized_status: String,
    pub(crate) normalized_volunteer_type: String,
    pub(crate) normalized_cpt_opt: Option<String>,
    pub(crate) hr_interview_date: Option<NaiveDate>,
    pub(crate) pm_interview_date: Option<NaiveDate>,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) end_date: Option<NaiveDate>,
    pub(crate) notes: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row?;
        records.push(RosterRecord {
            normalized_status: normalize_field(&row.status),
            normalized_volunteer_type: normalize_field(&row.volunteer_type),
            normalized_cpt_opt: row.cpt_opt_status.as_deref().map(normalize_field),
            name: row.name,
            email: row.email,
            phone: row.phone,
            applied_role: row.applied_role,
            team: row.team,
            hr_interview_date: row.hr_interview_date.as_deref().and_then(parse_date),
            pm_interview_date: row.pm_interview_date.as_deref().and_then(parse_date),
            start_date: row.start_date.as_deref().and_then(parse_date),
            end_date: row.end_date.as_deref().and_then(parse_date),
            notes: row.notes,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Applied Role")]
    applied_role: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Volunteer Type")]
    volunteer_type: String,
    #[serde(
        rename = "CPT/OPT Status",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    cpt_opt_status: Option<String>,
    #[serde(
        rename = "HR Interview Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    hr_interview_date: Option<String>,
    #[serde(
        rename = "PM Interview Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pm_interview_date: Option<String>,
    #[serde(
        rename = "Start Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    start_date: Option<String>,
    #[serde(rename = "End Date", default, deserialize_with = "empty_string_as_none")]
    end_date: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Export tools write dates either as ISO dates or US-style slashes.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
